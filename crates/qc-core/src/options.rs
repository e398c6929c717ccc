//! Extraction options.

use qc_ingest::{CaptureMarkers, DEFAULT_DATE_ANCHOR};

/// Markers and anchors that drive line scanning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Capture window start and stop markers.
    pub markers: CaptureMarkers,
    /// Label that precedes the report date.
    pub date_anchor: String,
}

impl ExtractOptions {
    /// Replaces the capture markers.
    #[must_use]
    pub fn with_markers(mut self, markers: CaptureMarkers) -> Self {
        self.markers = markers;
        self
    }

    /// Replaces the date anchor.
    #[must_use]
    pub fn with_date_anchor(mut self, anchor: impl Into<String>) -> Self {
        self.date_anchor = anchor.into();
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            markers: CaptureMarkers::default(),
            date_anchor: DEFAULT_DATE_ANCHOR.to_string(),
        }
    }
}
