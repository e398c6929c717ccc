use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Report date as a filename fragment, e.g. `05_31_2025`.
///
/// The printout token is kept verbatim apart from `/` becoming `_`; it is
/// not required to be a valid calendar date.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ReportDate(String);

impl ReportDate {
    /// Builds a date fragment from a printout token such as `05/31/2025`.
    ///
    /// Returns `None` for an empty token.
    pub fn from_token(token: &str) -> Option<Self> {
        let token = token.trim();
        if token.is_empty() {
            return None;
        }
        Some(Self(token.replace('/', "_")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Interprets the fragment as `MM_DD_YYYY`.
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.0, "%m_%d_%Y").ok()
    }
}

impl fmt::Display for ReportDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
