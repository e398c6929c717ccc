use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// Level digit outside the three control tiers.
    #[error("invalid control level {0} (expected 1, 2 or 3)")]
    InvalidLevel(u8),

    /// The report table and the registry disagree about an analyte row.
    #[error("expected exactly one row for analyte id {analyte_id}, found {matches}")]
    RowLookup { analyte_id: u32, matches: usize },
}

pub type Result<T> = std::result::Result<T, ModelError>;
