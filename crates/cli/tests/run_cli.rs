//! Spawns the `payrec` binary against tempdir fixtures and checks the
//! shell contract: exit codes, stdout JSON, stderr summary.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn payrec(args: &[&str], dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_payrec"))
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to spawn payrec")
}

fn write_fixtures(dir: &Path, bank_csv: &str, erp_csv: &str) {
    fs::write(dir.join("bank_transactions.csv"), bank_csv).unwrap();
    fs::write(dir.join("erp_payables.csv"), erp_csv).unwrap();
    fs::write(
        dir.join("recon.toml"),
        r#"
name = "CLI Test"

[sources.bank]
file = "bank_transactions.csv"

[sources.erp]
file = "erp_payables.csv"
"#,
    )
    .unwrap();
}

const CLEAN_BANK: &str = "\
date,amount,beneficiary,reference,status
2024-03-01,100.00,Acme Corp,TXN-00001,completed
";

const CLEAN_ERP: &str = "\
invoice_id,supplier,amount,due_date,status
INV-00001,Acme Corporation,100.00,2024-03-15,outstanding
";

const DISCREPANT_ERP: &str = "\
invoice_id,supplier,amount,due_date,status
INV-00001,Acme Corporation,120.00,2024-03-15,outstanding
";

#[test]
fn clean_run_exits_zero_with_json() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path(), CLEAN_BANK, CLEAN_ERP);

    let out = payrec(&["run", "recon.toml", "--json"], dir.path());
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["meta"]["config_name"], "CLI Test");
    assert_eq!(json["stats"]["matched"], 1);
    assert_eq!(json["results"][0]["match_status"], "matched");

    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("1 matched"), "stderr: {stderr}");
}

#[test]
fn discrepant_run_exits_five() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path(), CLEAN_BANK, DISCREPANT_ERP);

    let out = payrec(&["run", "recon.toml"], dir.path());
    assert_eq!(out.status.code(), Some(5));

    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("discrepancies found"), "stderr: {stderr}");
}

#[test]
fn run_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path(), CLEAN_BANK, CLEAN_ERP);

    let out = payrec(&["run", "recon.toml", "--output", "result.json"], dir.path());
    assert!(out.status.success());

    let written = fs::read_to_string(dir.path().join("result.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(json["stats"]["total_bank"], 1);
}

#[test]
fn validate_accepts_good_config() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path(), CLEAN_BANK, CLEAN_ERP);

    let out = payrec(&["validate", "recon.toml"], dir.path());
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("valid:"));
}

#[test]
fn validate_rejects_bad_thresholds() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("bad.toml"),
        r#"
name = "Bad"

[sources.bank]
file = "bank.csv"

[sources.erp]
file = "erp.csv"

[thresholds]
sim_threshold = 2.0
"#,
    )
    .unwrap();

    let out = payrec(&["validate", "bad.toml"], dir.path());
    assert_eq!(out.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&out.stderr).contains("sim_threshold"));
}

#[test]
fn missing_csv_exits_four() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("recon.toml"),
        r#"
name = "Missing"

[sources.bank]
file = "nope.csv"

[sources.erp]
file = "also_nope.csv"
"#,
    )
    .unwrap();

    let out = payrec(&["run", "recon.toml"], dir.path());
    assert_eq!(out.status.code(), Some(4));
}
