//! Terminal classification of selector outcomes.
//!
//! Each bank transaction and each ERP payable is classified exactly once;
//! there are no further transitions.

use crate::config::Thresholds;
use crate::model::{round_dp, BankTransaction, ErpPayable, MatchResult, MatchStatus};
use crate::selector::Candidate;

/// Classify one bank transaction given its selected candidate, if any.
///
/// Output fields are rounded here, at the boundary: similarity and score
/// to 4 decimals, percentages and monetary variance to 2.
pub fn classify_bank(
    tx: &BankTransaction,
    candidate: Option<(&ErpPayable, &Candidate)>,
    thresholds: &Thresholds,
) -> MatchResult {
    let Some((inv, c)) = candidate else {
        return MatchResult {
            bank: Some(tx.clone()),
            erp: None,
            match_status: MatchStatus::UnmatchedBank,
            name_similarity: None,
            amount_diff_pct: None,
            amount_variance: None,
            issue: Some("No ERP payable found for this bank transaction".into()),
            match_score: None,
        };
    };

    let diff_pct = c.amount_diff * 100.0;
    let pending_pct = thresholds.pending_amount_tolerance * 100.0;

    let (status, issue) = if c.amount_diff <= thresholds.matched_amount_tolerance
        && c.similarity >= thresholds.matched_sim
    {
        (MatchStatus::Matched, None)
    } else if c.amount_diff <= thresholds.pending_amount_tolerance {
        let issue = if c.amount_diff > thresholds.matched_amount_tolerance {
            format!(
                "Amount variance {:.2}% (within {:.0}% tolerance)",
                round_dp(diff_pct, 2),
                pending_pct,
            )
        } else {
            // Amount is fine; the name score is what held this back.
            format!(
                "Name fuzzy match {}% — verify company identity",
                (c.similarity * 100.0).round() as i64,
            )
        };
        (MatchStatus::Pending, Some(issue))
    } else {
        (
            MatchStatus::Discrepant,
            Some(format!(
                "Amount variance {:.2}% exceeds {:.0}% threshold",
                round_dp(diff_pct, 2),
                pending_pct,
            )),
        )
    };

    MatchResult {
        bank: Some(tx.clone()),
        erp: Some(inv.clone()),
        match_status: status,
        name_similarity: Some(round_dp(c.similarity, 4)),
        amount_diff_pct: Some(round_dp(diff_pct, 2)),
        amount_variance: Some(round_dp(tx.amount - inv.amount, 2)),
        issue,
        match_score: Some(round_dp(c.score, 4)),
    }
}

/// Classify an ERP payable that no bank transaction ever claimed.
pub fn classify_leftover_erp(inv: &ErpPayable) -> MatchResult {
    MatchResult {
        bank: None,
        erp: Some(inv.clone()),
        match_status: MatchStatus::UnmatchedErp,
        name_similarity: None,
        amount_diff_pct: None,
        amount_variance: None,
        issue: Some("No bank transaction found for this ERP payable".into()),
        match_score: None,
    }
}
