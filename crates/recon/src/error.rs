use std::fmt;

/// Errors at the config/ingestion boundary.
///
/// The matching core itself never fails: malformed business data degrades
/// into pending/discrepant/unmatched classifications instead.
#[derive(Debug)]
pub enum ReconError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (bad threshold, weights, etc.).
    ConfigValidation(String),
    /// Missing required column in input data.
    MissingColumn { source: String, column: String },
    /// Date parse error.
    DateParse { source: String, record_id: String, value: String },
    /// Amount parse error.
    AmountParse { source: String, record_id: String, value: String },
    /// IO error (file read, etc.).
    Io(String),
}

impl fmt::Display for ReconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::MissingColumn { source, column } => {
                write!(f, "source '{source}': missing column '{column}'")
            }
            Self::DateParse { source, record_id, value } => {
                write!(f, "source '{source}', record '{record_id}': cannot parse date '{value}'")
            }
            Self::AmountParse { source, record_id, value } => {
                write!(f, "source '{source}', record '{record_id}': cannot parse amount '{value}'")
            }
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for ReconError {}
