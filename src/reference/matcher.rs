use super::database::ReferenceDatabase;
use super::normalize_label;

/// Labels shorter than this (after normalization) never match.
const MIN_LABEL_LEN: usize = 3;

/// Maps free-text row labels to canonical test keys.
///
/// Keys are tried in database insertion order, built-in tests before
/// override-only ones, and the first key with an alias inside the label
/// wins. Within a key, longer aliases are tried first.
#[derive(Debug, Clone)]
pub struct NameMatcher {
    /// (canonical key, aliases longest first), in insertion order.
    keys: Vec<(String, Vec<String>)>,
}

impl NameMatcher {
    pub fn new(db: &ReferenceDatabase) -> Self {
        let keys = db
            .entries()
            .iter()
            .map(|e| {
                let mut aliases: Vec<String> = e.aliases.iter().filter(|a| !a.is_empty()).cloned().collect();
                aliases.sort_by(|a, b| b.len().cmp(&a.len()));
                (e.key.clone(), aliases)
            })
            .collect();
        Self { keys }
    }

    /// Canonical key for a label, or `None` if it is not a known test.
    pub fn match_label(&self, label: &str) -> Option<&str> {
        let norm = normalize_label(label);
        if norm.chars().count() < MIN_LABEL_LEN {
            return None;
        }
        self.keys
            .iter()
            .find(|(_, aliases)| aliases.iter().any(|alias| norm.contains(alias.as_str())))
            .map(|(key, _)| key.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::builtin::{TestDefinition, BUILTIN_TESTS};

    fn matcher() -> NameMatcher {
        NameMatcher::new(&ReferenceDatabase::from_definitions(BUILTIN_TESTS))
    }

    #[test]
    fn matches_simple_alias() {
        let m = matcher();
        assert_eq!(m.match_label("Haemoglobin"), Some("HAEMOGLOBIN"));
        assert_eq!(m.match_label("HEMOGLOBIN (Hb)"), Some("HAEMOGLOBIN"));
        assert_eq!(m.match_label("Serum   Creatinine"), Some("CREATININE"));
    }

    #[test]
    fn free_t3_beats_t3() {
        let m = matcher();
        assert_eq!(m.match_label("Free T3 (FT3)"), Some("FREE T3"));
        assert_eq!(m.match_label("T3"), None); // too short
        assert_eq!(m.match_label("T3 - Total"), Some("TOTAL T3"));
    }

    #[test]
    fn first_key_in_insertion_order_wins() {
        static DEFS: &[TestDefinition] = &[
            TestDefinition { key: "T3", aliases: &["t3"], valid: (0.1, 10.0) },
            TestDefinition { key: "FT3", aliases: &["free t3"], valid: (0.5, 20.0) },
        ];
        let m = NameMatcher::new(&ReferenceDatabase::from_definitions(DEFS));
        assert_eq!(m.match_label("free t3 serum"), Some("T3"));
        assert_eq!(m.match_label("serum t3"), Some("T3"));
    }

    #[test]
    fn blood_urea_nitrogen_is_urea() {
        let m = matcher();
        assert_eq!(m.match_label("Blood Urea Nitrogen"), Some("UREA"));
        assert_eq!(m.match_label("Blood Urea"), Some("UREA"));
        assert_eq!(m.match_label("Serum BUN"), Some("BUN"));
    }

    #[test]
    fn short_labels_rejected() {
        let m = matcher();
        assert_eq!(m.match_label(""), None);
        assert_eq!(m.match_label(" : "), None);
        assert_eq!(m.match_label("Hb"), None);
    }

    #[test]
    fn unknown_label_is_none() {
        let m = matcher();
        assert_eq!(m.match_label("Patient Name: John"), None);
        assert_eq!(m.match_label("Page 1 of 2"), None);
    }

    #[test]
    fn longer_alias_tried_first_within_key() {
        static DEFS: &[TestDefinition] = &[TestDefinition {
            key: "SODIUM",
            aliases: &["sodium", "serum sodium"],
            valid: (100.0, 200.0),
        }];
        let m = NameMatcher::new(&ReferenceDatabase::from_definitions(DEFS));
        assert_eq!(m.keys[0].1, vec!["serum sodium".to_string(), "sodium".to_string()]);
        assert_eq!(m.match_label("Serum Sodium"), Some("SODIUM"));
    }

    #[test]
    fn override_only_alias_matches() {
        let mut db = ReferenceDatabase::from_definitions(BUILTIN_TESTS);
        db.apply_overrides("testname,lowvalue,uppervalue\nSerum Ferritin,30,400\n".as_bytes())
            .unwrap();
        let m = NameMatcher::new(&db);
        assert_eq!(m.match_label("Serum Ferritin"), Some("SERUM FERRITIN"));
    }

    #[test]
    fn builtin_key_beats_longer_override_only_alias() {
        let mut db = ReferenceDatabase::from_definitions(BUILTIN_TESTS);
        db.apply_overrides("testname,lowvalue,uppervalue\nGlycosylated Haemoglobin,4.0,5.6\n".as_bytes())
            .unwrap();
        let m = NameMatcher::new(&db);

        let key = m.match_label("Glycosylated Haemoglobin (HbA1c)").unwrap();
        assert_eq!(key, "HBA1C");
        assert_eq!(db.get(key).unwrap().valid, (3.0, 20.0));
    }
}
