use std::collections::HashSet;

use crate::classify::{classify_bank, classify_leftover_erp};
use crate::config::{BankColumns, ErpColumns, ReconConfig};
use crate::error::ReconError;
use crate::model::{BankTransaction, ErpPayable, ReconInput, ReconMeta, ReconResult};
use crate::normalize::normalize_name;
use crate::selector::select_candidate;
use crate::stats::compute_stats;

/// Run one reconciliation pass over pre-loaded input.
///
/// Single-threaded, synchronous, O(bank x erp). Bank transactions are
/// processed in input order; each claim of an ERP payable is permanent for
/// the rest of the run, so reordering the bank side can change outcomes.
/// Given identical inputs in identical order, the output is bit-identical.
pub fn run(config: &ReconConfig, input: &ReconInput) -> ReconResult {
    // Run-scoped claim set, keyed on ErpPayable::idx. Discarded afterward.
    let mut used: HashSet<usize> = HashSet::new();
    let mut results = Vec::with_capacity(input.bank.len() + input.erp.len());

    for tx in &input.bank {
        let candidate = select_candidate(tx, &input.erp, &mut used, &config.thresholds);
        let pair = candidate
            .as_ref()
            .and_then(|c| input.erp.iter().find(|inv| inv.idx == c.idx).map(|inv| (inv, c)));
        results.push(classify_bank(tx, pair, &config.thresholds));
    }

    for inv in &input.erp {
        if !used.contains(&inv.idx) {
            results.push(classify_leftover_erp(inv));
        }
    }

    let stats = compute_stats(&results, input.bank.len(), input.erp.len());

    ReconResult {
        meta: ReconMeta {
            config_name: config.name.clone(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        },
        stats,
        results,
    }
}

/// Load bank transactions from CSV text, applying the column mapping and
/// filling the normalized beneficiary name.
pub fn load_bank_rows(csv_data: &str, columns: &BankColumns) -> Result<Vec<BankTransaction>, ReconError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(csv_data.as_bytes());

    let headers = read_headers(&mut reader)?;
    let idx = |name: &str| column_index(&headers, "bank", name);

    let reference_idx = idx(&columns.reference)?;
    let beneficiary_idx = idx(&columns.beneficiary)?;
    let amount_idx = idx(&columns.amount)?;
    let date_idx = idx(&columns.date)?;
    let status_idx = idx(&columns.status)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| ReconError::Io(e.to_string()))?;
        let reference = field(&record, reference_idx);
        let beneficiary = field(&record, beneficiary_idx);

        rows.push(BankTransaction {
            beneficiary_normalized: normalize_name(&beneficiary),
            amount: parse_amount(&record, amount_idx, "bank", &reference)?,
            date: parse_date(&record, date_idx, "bank", &reference)?,
            status: field(&record, status_idx),
            reference,
            beneficiary,
        });
    }

    Ok(rows)
}

/// Load ERP payables from CSV text. `idx` is assigned from row position and
/// is the identity the matcher's claim set uses.
pub fn load_erp_rows(csv_data: &str, columns: &ErpColumns) -> Result<Vec<ErpPayable>, ReconError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(csv_data.as_bytes());

    let headers = read_headers(&mut reader)?;
    let idx = |name: &str| column_index(&headers, "erp", name);

    let invoice_idx = idx(&columns.invoice_id)?;
    let supplier_idx = idx(&columns.supplier)?;
    let amount_idx = idx(&columns.amount)?;
    let due_date_idx = idx(&columns.due_date)?;
    let status_idx = idx(&columns.status)?;

    let mut rows = Vec::new();
    for (row_idx, record) in reader.records().enumerate() {
        let record = record.map_err(|e| ReconError::Io(e.to_string()))?;
        let invoice_id = field(&record, invoice_idx);
        let supplier = field(&record, supplier_idx);

        rows.push(ErpPayable {
            idx: row_idx,
            supplier_normalized: normalize_name(&supplier),
            amount: parse_amount(&record, amount_idx, "erp", &invoice_id)?,
            due_date: parse_date(&record, due_date_idx, "erp", &invoice_id)?,
            status: field(&record, status_idx),
            invoice_id,
            supplier,
        });
    }

    Ok(rows)
}

fn read_headers(reader: &mut csv::Reader<&[u8]>) -> Result<Vec<String>, ReconError> {
    Ok(reader
        .headers()
        .map_err(|e| ReconError::Io(e.to_string()))?
        .iter()
        .map(|h| h.to_string())
        .collect())
}

fn column_index(headers: &[String], source: &str, name: &str) -> Result<usize, ReconError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| ReconError::MissingColumn {
            source: source.into(),
            column: name.into(),
        })
}

fn field(record: &csv::StringRecord, idx: usize) -> String {
    record.get(idx).unwrap_or("").to_string()
}

fn parse_amount(
    record: &csv::StringRecord,
    idx: usize,
    source: &str,
    record_id: &str,
) -> Result<f64, ReconError> {
    let value = record.get(idx).unwrap_or("");
    value.trim().parse().map_err(|_| ReconError::AmountParse {
        source: source.into(),
        record_id: record_id.into(),
        value: value.into(),
    })
}

fn parse_date(
    record: &csv::StringRecord,
    idx: usize,
    source: &str,
    record_id: &str,
) -> Result<chrono::NaiveDate, ReconError> {
    let value = record.get(idx).unwrap_or("");
    chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| ReconError::DateParse {
        source: source.into(),
        record_id: record_id.into(),
        value: value.into(),
    })
}
