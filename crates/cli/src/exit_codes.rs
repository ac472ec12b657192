//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract — scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Range | Domain    | Description                              |
//! |-------|-----------|------------------------------------------|
//! | 0     | Universal | Success                                  |
//! | 1     | Universal | General error (unspecified)              |
//! | 2     | Universal | CLI usage error (bad args, missing file) |
//! | 3-9   | recon     | Reconciliation-specific codes            |

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
#[allow(dead_code)]
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
#[allow(dead_code)]
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Recon (3-9)
// =============================================================================

/// Config failed to parse or validate.
pub const EXIT_RECON_INVALID_CONFIG: u8 = 3;

/// Runtime failure: unreadable input, CSV parse error, unwritable output.
pub const EXIT_RECON_RUNTIME: u8 = 4;

/// Reconciliation ran but found discrepant or unmatched records.
/// Pending-only runs pass, like `diff(1)` exiting 0 on equal files.
pub const EXIT_RECON_DISCREPANT: u8 = 5;
