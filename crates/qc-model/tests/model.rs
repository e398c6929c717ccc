//! Tests for qc-model types.

use proptest::prelude::*;
use qc_model::{Level, Report, normalize_code, registry};

#[test]
fn report_rows_follow_registry_order() {
    let report = Report::new("printout.txt");
    let ids: Vec<u32> = report.rows().iter().map(|row| row.analyte_id).collect();
    let expected: Vec<u32> = registry().definitions().iter().map(|d| d.id).collect();
    assert_eq!(ids, expected);
    assert_eq!(report.rows()[0].analyte_name, "Glucosa");
    assert_eq!(report.rows().last().unwrap().analyte_name, "Colesterol HDL (HDL-C)");
}

#[test]
fn corrected_cholesterol_resolves_to_panel_entry() {
    let key = normalize_code("CHOL-C");
    let definition = registry().lookup(&key).expect("CHOL registered");
    assert_eq!(definition.id, 2);
    assert_eq!(definition.name, "Colesterol Total (CHOL)");
}

proptest! {
    #[test]
    fn row_count_is_fixed(
        writes in proptest::collection::vec((0u32..40, 1u8..=3, 0.0f64..500.0), 0..60)
    ) {
        let mut report = Report::new("printout.txt");
        for (id, digit, value) in writes {
            let level = Level::from_digit(digit).unwrap();
            let _ = report.set_level(id, level, value);
        }
        prop_assert_eq!(report.rows().len(), registry().len());
    }
}
