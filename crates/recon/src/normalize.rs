//! Vendor-name normalization applied at load time.
//!
//! The matcher only ever compares normalized names; display names are
//! carried through untouched for reporting.

/// Collapse a vendor display name into its comparison form: lowercased,
/// punctuation dropped, whitespace runs collapsed to single spaces.
///
/// Deliberately not locale-aware. Abbreviations are kept as written
/// ("corp" stays "corp"), so "Acme Corp" and "Acme Corporation" remain
/// distinct strings for the similarity stage to score.
pub fn normalize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_space = false;
    for ch in name.to_lowercase().chars() {
        if ch.is_alphanumeric() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(ch);
        } else {
            // Whitespace and punctuation alike separate words.
            pending_space = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_strips_punctuation() {
        assert_eq!(normalize_name("ACME Corp."), "acme corp");
        assert_eq!(normalize_name("Beta System Inc."), "beta system inc");
        assert_eq!(normalize_name("Delta Trdg. Co"), "delta trdg co");
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(normalize_name("  Tech  Soft   Ltd. "), "tech soft ltd");
    }

    #[test]
    fn separators_become_single_spaces() {
        assert_eq!(normalize_name("Smith & Sons, Ltd"), "smith sons ltd");
        assert_eq!(normalize_name("Tech-Soft Ltd"), "tech soft ltd");
    }

    #[test]
    fn empty_and_punctuation_only() {
        assert_eq!(normalize_name(""), "");
        assert_eq!(normalize_name("  .,-  "), "");
    }
}
