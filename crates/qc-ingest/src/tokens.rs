//! Value token extraction.
//!
//! Readings look like `GLU - 1 95.0:` or `CHOL-C - 2 180:`; several can sit
//! on one line and spacing around the separators is irregular.

use std::sync::LazyLock;

use regex::Regex;

/// `<CODE> - <LEVEL DIGIT> <VALUE>:` with optional whitespace around the parts.
static VALUE_TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Z\-]+)\s*-\s*(\d)\s*([0-9]+(?:\.[0-9]+)?):")
        .expect("Invalid value token regex")
});

/// One reading found on a line.
///
/// `level` is the raw digit; range checks happen when the reading is
/// applied to a report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueToken<'a> {
    pub raw_code: &'a str,
    pub level: u8,
    pub value: f64,
}

/// Lazily yields every non-overlapping reading on an upper-cased line.
pub fn value_tokens(line: &str) -> impl Iterator<Item = ValueToken<'_>> {
    VALUE_TOKEN_REGEX.captures_iter(line).filter_map(|caps| {
        let raw_code = caps.get(1)?.as_str();
        let level = caps.get(2)?.as_str().parse::<u8>().ok()?;
        let value = caps.get(3)?.as_str().parse::<f64>().ok()?;
        Some(ValueToken {
            raw_code,
            level,
            value,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(line: &str) -> Vec<(String, u8, f64)> {
        value_tokens(line)
            .map(|t| (t.raw_code.to_string(), t.level, t.value))
            .collect()
    }

    #[test]
    fn extracts_multiple_tokens() {
        let tokens = collect("GLU - 1 95.0: CHOL-C - 2 180:");
        assert_eq!(
            tokens,
            vec![
                ("GLU".to_string(), 1, 95.0),
                ("CHOL-C".to_string(), 2, 180.0),
            ]
        );
    }

    #[test]
    fn tolerates_missing_spaces() {
        let tokens = collect("ALT-3 41.25:  K -1 4.1:");
        assert_eq!(
            tokens,
            vec![("ALT".to_string(), 3, 41.25), ("K".to_string(), 1, 4.1)]
        );
    }

    #[test]
    fn passes_through_out_of_range_levels() {
        let tokens = collect("GLU - 7 12:");
        assert_eq!(tokens, vec![("GLU".to_string(), 7, 12.0)]);
    }

    #[test]
    fn requires_trailing_colon() {
        assert!(collect("GLU - 1 95.0").is_empty());
        assert!(collect("no readings here").is_empty());
    }

    #[test]
    fn ignores_lowercase_text() {
        assert!(collect("glu - 1 95.0:").is_empty());
    }
}
