use std::collections::HashSet;

use crate::config::Thresholds;
use crate::model::{BankTransaction, ErpPayable};
use crate::similarity::jaro_winkler;

/// Floor for the relative-difference denominator so near-zero amounts do
/// not divide by zero.
const AMOUNT_EPSILON: f64 = 0.01;

/// Best unused ERP candidate for one bank transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub idx: usize,
    pub similarity: f64,
    pub amount_diff: f64,
    pub score: f64,
}

/// Greedy scan over the not-yet-claimed payables for the best candidate.
///
/// Name similarity below `sim_threshold` disqualifies a payable outright.
/// Ties keep the earliest-scanned candidate (strict `>` comparison). The
/// winner's `idx` is inserted into `used` before returning, so no later
/// bank transaction can reclaim it, even with a better score.
pub fn select_candidate(
    tx: &BankTransaction,
    payables: &[ErpPayable],
    used: &mut HashSet<usize>,
    thresholds: &Thresholds,
) -> Option<Candidate> {
    let mut best: Option<Candidate> = None;

    for inv in payables {
        if used.contains(&inv.idx) {
            continue;
        }

        let sim = jaro_winkler(&tx.beneficiary_normalized, &inv.supplier_normalized);
        if sim < thresholds.sim_threshold {
            continue;
        }

        let denom = tx.amount.max(inv.amount).max(AMOUNT_EPSILON);
        let amount_diff = (tx.amount - inv.amount).abs() / denom;
        let score = thresholds.name_weight * sim
            + thresholds.amount_weight * (1.0 - amount_diff.min(1.0));

        let better = match best {
            Some(ref b) => score > b.score,
            None => true,
        };
        if better {
            best = Some(Candidate {
                idx: inv.idx,
                similarity: sim,
                amount_diff,
                score,
            });
        }
    }

    if let Some(ref candidate) = best {
        used.insert(candidate.idx);
    }
    best
}
