//! Printout reading with legacy single-byte decoding.
//!
//! Analyzer exports are Latin-1 text; section headers carry accented
//! characters (`Índice`) that are not valid UTF-8.

use std::path::Path;

use encoding_rs::mem::decode_latin1;

use crate::error::{IngestError, Result};

/// Reads a printout and splits it into lines.
pub fn read_report_lines(path: &Path) -> Result<Vec<String>> {
    let bytes = std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    let text = decode_report(&bytes);
    tracing::trace!(path = %path.display(), bytes = bytes.len(), "decoded printout");

    Ok(text.lines().map(str::to_string).collect())
}

/// Decodes ISO-8859-1 bytes. Every byte maps to the code point of the same
/// value, so decoding cannot fail.
pub fn decode_report(bytes: &[u8]) -> String {
    decode_latin1(bytes).into_owned()
}
