//! The analyte panel tracked on the QC printouts.
//!
//! The registry is built once on first use and is read-only afterwards.
//! Codes are the canonical keys produced by [`crate::normalize_code`].

use std::collections::HashMap;
use std::sync::LazyLock;

/// One tracked analyte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyteDefinition {
    /// Canonical instrument code (e.g. "GLU").
    pub code: &'static str,
    /// Stable numeric identifier used as the CSV `ID` column.
    pub id: u32,
    /// Display name written to the CSV `ANALITO` column.
    pub name: &'static str,
}

/// Panel entries as (code, id, name), ordered by id.
const PANEL: &[(&str, u32, &str)] = &[
    ("GLU", 1, "Glucosa"),
    ("CHOL", 2, "Colesterol Total (CHOL)"),
    ("ALB", 3, "Albúmina"),
    ("ALT", 4, "ALT/TGP (Alanino aminotransferasa)"),
    ("GGT", 7, "GGT (Gamma Glutamiltransferasa)"),
    ("MG", 9, "Magnesio"),
    ("CALA", 10, "Calcio"),
    ("BUN", 11, "Urea nitrogenada (BUN)"),
    ("TRIG", 13, "Triglicéridos"),
    ("TP", 14, "Proteínas Totales (TP)"),
    ("AST", 15, "AST/TGO (Aspartato aminotransferasa)"),
    ("AMY", 16, "Amilasa"),
    ("NA", 18, "Sodio"),
    ("CK", 19, "Creatin cinasa (CK)"),
    ("CRE", 20, "Creatinina"),
    ("TBILC", 21, "Bilirrubina Total/TBIL"),
    ("ALP", 22, "Fosfatasa Alcalina"),
    ("LIP", 23, "Lipasa"),
    ("K", 24, "Potasio"),
    ("IRON", 25, "Hierro"),
    ("UA", 26, "Acido Urico"),
    ("LDL", 27, "Colesterol LDL (LDL-C)"),
    ("DBILC", 28, "Bilirrubina Directa (DBIL)"),
    ("LDH", 29, "Deshidrogenasa Láctica (LDH)"),
    ("PHOS", 31, "Fósforo"),
    ("CL", 32, "Cloro (CL)"),
    ("HDL", 33, "Colesterol HDL (HDL-C)"),
];

static REGISTRY: LazyLock<AnalyteRegistry> = LazyLock::new(|| AnalyteRegistry::from_panel(PANEL));

/// Returns the process-wide analyte registry.
pub fn registry() -> &'static AnalyteRegistry {
    &REGISTRY
}

/// Lookup table from canonical code to analyte definition.
#[derive(Debug)]
pub struct AnalyteRegistry {
    definitions: Vec<AnalyteDefinition>,
    by_code: HashMap<&'static str, usize>,
}

impl AnalyteRegistry {
    fn from_panel(panel: &[(&'static str, u32, &'static str)]) -> Self {
        let mut definitions: Vec<AnalyteDefinition> = panel
            .iter()
            .map(|&(code, id, name)| AnalyteDefinition { code, id, name })
            .collect();
        definitions.sort_by_key(|definition| definition.id);

        let by_code = definitions
            .iter()
            .enumerate()
            .map(|(index, definition)| (definition.code, index))
            .collect();

        Self {
            definitions,
            by_code,
        }
    }

    /// Looks up a canonical code. Unknown codes return `None`.
    pub fn lookup(&self, code: &str) -> Option<&AnalyteDefinition> {
        self.by_code
            .get(code)
            .map(|&index| &self.definitions[index])
    }

    /// All definitions, sorted by ascending id.
    pub fn definitions(&self) -> &[AnalyteDefinition] {
        &self.definitions
    }

    /// Finds a definition by its display name.
    pub fn by_name(&self, name: &str) -> Option<&AnalyteDefinition> {
        self.definitions
            .iter()
            .find(|definition| definition.name == name)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn definitions_are_sorted_by_id() {
        let ids: Vec<u32> = registry().definitions().iter().map(|d| d.id).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn ids_and_codes_are_unique() {
        let definitions = registry().definitions();
        let ids: HashSet<u32> = definitions.iter().map(|d| d.id).collect();
        let codes: HashSet<&str> = definitions.iter().map(|d| d.code).collect();
        assert_eq!(ids.len(), definitions.len());
        assert_eq!(codes.len(), definitions.len());
    }

    #[test]
    fn lookup_known_and_unknown_codes() {
        let glucose = registry().lookup("GLU").expect("GLU registered");
        assert_eq!(glucose.id, 1);
        assert_eq!(glucose.name, "Glucosa");

        assert!(registry().lookup("XYZ").is_none());
        assert!(registry().lookup("glu").is_none());
    }

    #[test]
    fn panel_size() {
        assert_eq!(registry().len(), 27);
        assert!(!registry().is_empty());
    }

    #[test]
    fn finds_by_display_name() {
        let hdl = registry()
            .by_name("Colesterol HDL (HDL-C)")
            .expect("HDL by name");
        assert_eq!(hdl.code, "HDL");
        assert!(registry().by_name("Glucose").is_none());
    }
}
