// payrec CLI - bank-to-ERP accounts-payable reconciliation

mod exit_codes;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use exit_codes::{EXIT_RECON_DISCREPANT, EXIT_RECON_INVALID_CONFIG, EXIT_RECON_RUNTIME, EXIT_SUCCESS};
use payrec_recon::engine::{load_bank_rows, load_erp_rows};
use payrec_recon::{ReconConfig, ReconInput, ReconResult};

#[derive(Parser)]
#[command(name = "payrec")]
#[command(about = "Reconcile bank transactions against ERP accounts payable")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run reconciliation from a TOML config file
    #[command(after_help = "\
Examples:
  payrec run recon.toml
  payrec run recon.toml --json
  payrec run recon.toml --output result.json")]
    Run {
        /// Path to the recon.toml config file
        config: PathBuf,

        /// Output JSON to stdout instead of human summary only
        #[arg(long)]
        json: bool,

        /// Write JSON output to file
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Validate a recon config without running
    #[command(after_help = "\
Examples:
  payrec validate recon.toml")]
    Validate {
        /// Path to the recon.toml config file
        config: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        None => {
            // No subcommand = show help
            eprintln!("Usage: payrec <command> [options]");
            eprintln!("       payrec --help for more information");
            Ok(())
        }
        Some(Commands::Run { config, json, output }) => cmd_run(config, json, output),
        Some(Commands::Validate { config }) => cmd_validate(config),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    fn config(msg: impl Into<String>) -> Self {
        Self { code: EXIT_RECON_INVALID_CONFIG, message: msg.into(), hint: None }
    }

    fn runtime(msg: impl Into<String>) -> Self {
        Self { code: EXIT_RECON_RUNTIME, message: msg.into(), hint: None }
    }

    fn discrepant(msg: impl Into<String>) -> Self {
        Self { code: EXIT_RECON_DISCREPANT, message: msg.into(), hint: None }
    }
}

// ============================================================================
// run
// ============================================================================

fn cmd_run(config_path: PathBuf, json_output: bool, output_file: Option<PathBuf>) -> Result<(), CliError> {
    let config_str = std::fs::read_to_string(&config_path)
        .map_err(|e| CliError::runtime(format!("cannot read config: {e}")))?;

    let config = ReconConfig::from_toml(&config_str).map_err(|e| CliError::config(e.to_string()))?;

    // Resolve CSV paths relative to the config file's directory.
    let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));

    let bank_csv = read_source(base_dir, &config.sources.bank.file)?;
    let erp_csv = read_source(base_dir, &config.sources.erp.file)?;

    let input = ReconInput {
        bank: load_bank_rows(&bank_csv, &config.sources.bank.columns)
            .map_err(|e| CliError::runtime(e.to_string()))?,
        erp: load_erp_rows(&erp_csv, &config.sources.erp.columns)
            .map_err(|e| CliError::runtime(e.to_string()))?,
    };

    let result = payrec_recon::run(&config, &input);

    let json_str = serde_json::to_string_pretty(&result)
        .map_err(|e| CliError::runtime(format!("JSON serialization error: {e}")))?;

    // Config-level [output].json, then --output override.
    let json_target = output_file.or_else(|| config.output.json.as_ref().map(|p| base_dir.join(p)));
    if let Some(ref path) = json_target {
        std::fs::write(path, &json_str)
            .map_err(|e| CliError::runtime(format!("cannot write output: {e}")))?;
        eprintln!("wrote {}", path.display());
    }

    if json_output {
        println!("{json_str}");
    }

    print_summary(&result);

    let s = &result.stats;
    if s.discrepant > 0 || s.unmatched_bank > 0 || s.unmatched_erp > 0 {
        return Err(CliError::discrepant("discrepancies found"));
    }
    // pending-only runs pass
    Ok(())
}

fn read_source(base_dir: &Path, file: &str) -> Result<String, CliError> {
    let path = base_dir.join(file);
    std::fs::read_to_string(&path)
        .map_err(|e| CliError::runtime(format!("cannot read {}: {e}", path.display())))
}

/// Human summary to stderr; stdout stays reserved for JSON.
fn print_summary(result: &ReconResult) {
    let s = &result.stats;
    eprintln!(
        "recon '{}': {} bank x {} erp — {} matched, {} pending, {} discrepant, {} unmatched",
        result.meta.config_name,
        s.total_bank,
        s.total_erp,
        s.matched,
        s.pending,
        s.discrepant,
        s.unmatched_bank + s.unmatched_erp,
    );
    eprintln!("at risk: ${:.2}", s.total_at_risk_usd);
}

// ============================================================================
// validate
// ============================================================================

fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config_str = std::fs::read_to_string(&config_path)
        .map_err(|e| CliError::runtime(format!("cannot read config: {e}")))?;

    match ReconConfig::from_toml(&config_str) {
        Ok(config) => {
            eprintln!(
                "valid: recon '{}' (bank: {}, erp: {}, sim_threshold: {})",
                config.name,
                config.sources.bank.file,
                config.sources.erp.file,
                config.thresholds.sim_threshold,
            );
            Ok(())
        }
        Err(e) => Err(CliError::config(e.to_string())),
    }
}
