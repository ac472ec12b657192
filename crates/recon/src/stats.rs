use crate::model::{round_dp, MatchResult, MatchStatus, ReconStats};

/// Tally per-status counts and the total monetary amount at risk.
///
/// A row contributes to `total_at_risk_usd` when its status is anything
/// but matched. Exposure is the absolute amount variance when present,
/// falling back to the bank amount, then the ERP amount, then zero.
pub fn compute_stats(results: &[MatchResult], total_bank: usize, total_erp: usize) -> ReconStats {
    let mut stats = ReconStats {
        total_bank,
        total_erp,
        ..ReconStats::default()
    };
    let mut at_risk = 0.0;

    for r in results {
        match r.match_status {
            MatchStatus::Matched => stats.matched += 1,
            MatchStatus::Pending => stats.pending += 1,
            MatchStatus::Discrepant => stats.discrepant += 1,
            MatchStatus::UnmatchedBank => stats.unmatched_bank += 1,
            MatchStatus::UnmatchedErp => stats.unmatched_erp += 1,
        }

        if r.match_status != MatchStatus::Matched {
            at_risk += r
                .amount_variance
                .map(f64::abs)
                .or_else(|| r.bank.as_ref().map(|b| b.amount.abs()))
                .or_else(|| r.erp.as_ref().map(|e| e.amount.abs()))
                .unwrap_or(0.0);
        }
    }

    stats.total_at_risk_usd = round_dp(at_risk, 2);
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BankTransaction, ErpPayable};
    use chrono::NaiveDate;

    fn result(status: MatchStatus) -> MatchResult {
        MatchResult {
            bank: None,
            erp: None,
            match_status: status,
            name_similarity: None,
            amount_diff_pct: None,
            amount_variance: None,
            issue: None,
            match_score: None,
        }
    }

    fn bank(amount: f64) -> BankTransaction {
        BankTransaction {
            reference: "TXN-00001".into(),
            beneficiary: "Acme Corp".into(),
            beneficiary_normalized: "acme corp".into(),
            amount,
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            status: "completed".into(),
        }
    }

    fn erp(amount: f64) -> ErpPayable {
        ErpPayable {
            idx: 0,
            invoice_id: "INV-00001".into(),
            supplier: "Acme Corporation".into(),
            supplier_normalized: "acme corporation".into(),
            amount,
            due_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            status: "outstanding".into(),
        }
    }

    #[test]
    fn counts_every_status() {
        let results = vec![
            result(MatchStatus::Matched),
            result(MatchStatus::Matched),
            result(MatchStatus::Pending),
            result(MatchStatus::Discrepant),
            result(MatchStatus::UnmatchedBank),
            result(MatchStatus::UnmatchedErp),
        ];
        let stats = compute_stats(&results, 4, 3);
        assert_eq!(stats.total_bank, 4);
        assert_eq!(stats.total_erp, 3);
        assert_eq!(stats.matched, 2);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.discrepant, 1);
        assert_eq!(stats.unmatched_bank, 1);
        assert_eq!(stats.unmatched_erp, 1);
    }

    #[test]
    fn missing_statuses_default_to_zero() {
        let stats = compute_stats(&[], 0, 0);
        assert_eq!(stats, ReconStats::default());
    }

    #[test]
    fn at_risk_prefers_variance_then_bank_then_erp() {
        let mut variance_row = result(MatchStatus::Discrepant);
        variance_row.amount_variance = Some(-20.0);
        variance_row.bank = Some(bank(100.0));
        variance_row.erp = Some(erp(120.0));

        let mut bank_row = result(MatchStatus::UnmatchedBank);
        bank_row.bank = Some(bank(55.5));

        let mut erp_row = result(MatchStatus::UnmatchedErp);
        erp_row.erp = Some(erp(44.25));

        let stats = compute_stats(&[variance_row, bank_row, erp_row], 2, 2);
        assert_eq!(stats.total_at_risk_usd, 119.75);
    }

    #[test]
    fn matched_rows_carry_no_risk() {
        let mut matched = result(MatchStatus::Matched);
        matched.amount_variance = Some(0.5);
        matched.bank = Some(bank(1000.0));

        let stats = compute_stats(&[matched], 1, 1);
        assert_eq!(stats.total_at_risk_usd, 0.0);
    }
}
