use serde::Deserialize;

use crate::error::ReconError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ReconConfig {
    pub name: String,
    pub sources: Sources,
    #[serde(default)]
    pub thresholds: Thresholds,
    #[serde(default)]
    pub output: OutputConfig,
}

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct Sources {
    pub bank: BankSource,
    pub erp: ErpSource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BankSource {
    pub file: String,
    #[serde(default)]
    pub columns: BankColumns,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErpSource {
    pub file: String,
    #[serde(default)]
    pub columns: ErpColumns,
}

/// Column headers in the bank CSV. Defaults match the upstream export.
#[derive(Debug, Clone, Deserialize)]
pub struct BankColumns {
    #[serde(default = "col_reference")]
    pub reference: String,
    #[serde(default = "col_beneficiary")]
    pub beneficiary: String,
    #[serde(default = "col_amount")]
    pub amount: String,
    #[serde(default = "col_date")]
    pub date: String,
    #[serde(default = "col_status")]
    pub status: String,
}

impl Default for BankColumns {
    fn default() -> Self {
        Self {
            reference: col_reference(),
            beneficiary: col_beneficiary(),
            amount: col_amount(),
            date: col_date(),
            status: col_status(),
        }
    }
}

/// Column headers in the ERP payables CSV. Defaults match the upstream export.
#[derive(Debug, Clone, Deserialize)]
pub struct ErpColumns {
    #[serde(default = "col_invoice_id")]
    pub invoice_id: String,
    #[serde(default = "col_supplier")]
    pub supplier: String,
    #[serde(default = "col_amount")]
    pub amount: String,
    #[serde(default = "col_due_date")]
    pub due_date: String,
    #[serde(default = "col_status")]
    pub status: String,
}

impl Default for ErpColumns {
    fn default() -> Self {
        Self {
            invoice_id: col_invoice_id(),
            supplier: col_supplier(),
            amount: col_amount(),
            due_date: col_due_date(),
            status: col_status(),
        }
    }
}

fn col_reference() -> String {
    "reference".into()
}
fn col_beneficiary() -> String {
    "beneficiary".into()
}
fn col_invoice_id() -> String {
    "invoice_id".into()
}
fn col_supplier() -> String {
    "supplier".into()
}
fn col_amount() -> String {
    "amount".into()
}
fn col_date() -> String {
    "date".into()
}
fn col_due_date() -> String {
    "due_date".into()
}
fn col_status() -> String {
    "status".into()
}

// ---------------------------------------------------------------------------
// Thresholds
// ---------------------------------------------------------------------------

/// Matching and classification knobs. Defaults are the production values
/// the classifier's issue texts were written against.
#[derive(Debug, Clone, Deserialize)]
pub struct Thresholds {
    /// Candidates below this Jaro-Winkler similarity are never considered.
    #[serde(default = "default_sim_threshold")]
    pub sim_threshold: f64,
    /// Weight of name similarity in the selection score.
    #[serde(default = "default_name_weight")]
    pub name_weight: f64,
    /// Weight of amount closeness in the selection score.
    #[serde(default = "default_amount_weight")]
    pub amount_weight: f64,
    /// Minimum similarity for a clean "matched" classification.
    #[serde(default = "default_matched_sim")]
    pub matched_sim: f64,
    /// Relative amount difference allowed for a clean match.
    #[serde(default = "default_matched_amount_tolerance")]
    pub matched_amount_tolerance: f64,
    /// Relative amount difference still classified as pending.
    #[serde(default = "default_pending_amount_tolerance")]
    pub pending_amount_tolerance: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            sim_threshold: default_sim_threshold(),
            name_weight: default_name_weight(),
            amount_weight: default_amount_weight(),
            matched_sim: default_matched_sim(),
            matched_amount_tolerance: default_matched_amount_tolerance(),
            pending_amount_tolerance: default_pending_amount_tolerance(),
        }
    }
}

fn default_sim_threshold() -> f64 {
    0.72
}
fn default_name_weight() -> f64 {
    0.6
}
fn default_amount_weight() -> f64 {
    0.4
}
fn default_matched_sim() -> f64 {
    0.90
}
fn default_matched_amount_tolerance() -> f64 {
    0.01
}
fn default_pending_amount_tolerance() -> f64 {
    0.05
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub json: Option<String>,
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl ReconConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let config: ReconConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        let t = &self.thresholds;

        for (label, value) in [
            ("sim_threshold", t.sim_threshold),
            ("matched_sim", t.matched_sim),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ReconError::ConfigValidation(format!(
                    "{label} must be within [0, 1], got {value}"
                )));
            }
        }

        if t.name_weight < 0.0 || t.amount_weight < 0.0 {
            return Err(ReconError::ConfigValidation(
                "score weights must be non-negative".into(),
            ));
        }
        if (t.name_weight + t.amount_weight - 1.0).abs() > 1e-9 {
            return Err(ReconError::ConfigValidation(format!(
                "name_weight + amount_weight must sum to 1, got {}",
                t.name_weight + t.amount_weight
            )));
        }

        if t.matched_amount_tolerance < 0.0 || t.pending_amount_tolerance < 0.0 {
            return Err(ReconError::ConfigValidation(
                "amount tolerances must be non-negative".into(),
            ));
        }
        if t.matched_amount_tolerance > t.pending_amount_tolerance {
            return Err(ReconError::ConfigValidation(format!(
                "matched_amount_tolerance ({}) must not exceed pending_amount_tolerance ({})",
                t.matched_amount_tolerance, t.pending_amount_tolerance
            )));
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
