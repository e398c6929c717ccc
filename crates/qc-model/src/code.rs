//! Instrument code normalization.

/// Suffix the analyzer appends to corrected readings (e.g. `CHOL-C`).
const CORRECTED_SUFFIX: &str = "-C";

/// Canonicalizes a raw matched code into a registry key.
///
/// The corrected-reading suffix is stripped before hyphens are removed, so
/// `TBIL-C` becomes `TBIL` while a vendor spelling such as `T-BILC` becomes
/// `TBILC`. The result may or may not be a registered code.
pub fn normalize_code(raw: &str) -> String {
    let trimmed = raw.trim();
    let base = trimmed.strip_suffix(CORRECTED_SUFFIX).unwrap_or(trimmed);
    base.chars().filter(|&c| c != '-').collect()
}
