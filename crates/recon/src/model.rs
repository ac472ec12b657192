use chrono::NaiveDate;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// A single bank-statement payment, as loaded from the bank CSV.
///
/// `beneficiary_normalized` is the comparison form of the display name
/// (see [`crate::normalize::normalize_name`]); the matcher never looks at
/// the raw `beneficiary`.
#[derive(Debug, Clone, Serialize)]
pub struct BankTransaction {
    pub reference: String,
    pub beneficiary: String,
    pub beneficiary_normalized: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub status: String,
}

/// A single ERP accounts-payable entry.
///
/// `idx` is matching bookkeeping only: a stable position assigned at load
/// time so a per-run "claimed" set can refer to entries without cloning.
/// It carries no business meaning.
#[derive(Debug, Clone, Serialize)]
pub struct ErpPayable {
    pub idx: usize,
    pub invoice_id: String,
    pub supplier: String,
    pub supplier_normalized: String,
    pub amount: f64,
    pub due_date: NaiveDate,
    pub status: String,
}

/// Pre-loaded records for one reconciliation run.
///
/// Both sides default to empty; an absent side yields only unmatched rows.
#[derive(Debug, Default)]
pub struct ReconInput {
    pub bank: Vec<BankTransaction>,
    pub erp: Vec<ErpPayable>,
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Matched,
    Pending,
    Discrepant,
    UnmatchedBank,
    UnmatchedErp,
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Matched => write!(f, "matched"),
            Self::Pending => write!(f, "pending"),
            Self::Discrepant => write!(f, "discrepant"),
            Self::UnmatchedBank => write!(f, "unmatched_bank"),
            Self::UnmatchedErp => write!(f, "unmatched_erp"),
        }
    }
}

/// One classified reconciliation row: at most one bank transaction united
/// with at most one ERP payable.
///
/// `name_similarity` and `amount_diff_pct` are present only when a candidate
/// was found; `match_score` only for matched/pending/discrepant rows.
/// `amount_variance` is signed, bank minus ERP.
#[derive(Debug, Clone, Serialize)]
pub struct MatchResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank: Option<BankTransaction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub erp: Option<ErpPayable>,
    pub match_status: MatchStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_similarity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_diff_pct: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_variance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_score: Option<f64>,
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReconStats {
    pub total_bank: usize,
    pub total_erp: usize,
    pub matched: usize,
    pub pending: usize,
    pub discrepant: usize,
    pub unmatched_bank: usize,
    pub unmatched_erp: usize,
    pub total_at_risk_usd: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconMeta {
    pub config_name: String,
    pub engine_version: String,
    pub run_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconResult {
    pub meta: ReconMeta,
    pub stats: ReconStats,
    pub results: Vec<MatchResult>,
}

// ---------------------------------------------------------------------------
// Rounding
// ---------------------------------------------------------------------------

/// Round half away from zero at `places` decimal places.
///
/// The single rounding rule for everything the engine returns: similarity
/// and score at 4 places, monetary amounts and percentages at 2.
pub fn round_dp(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
