//! Report date extraction.

use qc_model::ReportDate;

/// Label preceding the report date. Truncated so the accented first letter
/// of `Índice` never has to match.
pub const DEFAULT_DATE_ANCHOR: &str = "NDICE";

/// Finds the report date using [`DEFAULT_DATE_ANCHOR`].
pub fn extract_report_date<S: AsRef<str>>(lines: &[S]) -> Option<ReportDate> {
    extract_report_date_with_anchor(lines, DEFAULT_DATE_ANCHOR)
}

/// Finds the first line containing `anchor` (case-insensitive) and turns the
/// next whitespace-delimited token into a [`ReportDate`].
///
/// Only the first anchored line is considered, even if its token is empty.
pub fn extract_report_date_with_anchor<S: AsRef<str>>(
    lines: &[S],
    anchor: &str,
) -> Option<ReportDate> {
    let anchor = anchor.to_ascii_uppercase();
    if anchor.is_empty() {
        return None;
    }
    let line = lines
        .iter()
        .map(AsRef::as_ref)
        .find(|line| line.to_ascii_uppercase().contains(&anchor))?;

    // ASCII upper-casing keeps byte offsets aligned with the original line.
    let offset = line.to_ascii_uppercase().find(&anchor)? + anchor.len();
    let token = line[offset..].split_whitespace().next()?;
    ReportDate::from_token(token)
}
