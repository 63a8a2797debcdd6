/// Narrative templates for the patient summary.
/// Plain language, test names only: no values are ever quoted.
pub struct MessageTemplates;

/// Mild deviations named individually before "and N more tests".
pub const MILD_NAMED_LIMIT: usize = 4;

impl MessageTemplates {
    /// Every result within range.
    pub fn all_stable() -> String {
        "All systems look stable. All extracted tests are within the expected range \
         for your age and gender."
            .to_string()
    }

    /// Critical results, named.
    pub fn critical_alert(names: &[&str]) -> String {
        format!(
            "Important alert: Some results such as {} are significantly outside the \
             reference range and should be reviewed by your doctor soon.",
            names.join(", "),
        )
    }

    /// Mild deviations, at most [`MILD_NAMED_LIMIT`] named.
    pub fn mild_changes(names: &[&str]) -> String {
        let shown = &names[..names.len().min(MILD_NAMED_LIMIT)];
        let rest = names.len() - shown.len();
        let suffix = if rest > 0 {
            format!(" and {rest} more tests")
        } else {
            String::new()
        };
        format!(
            "Mild changes: A few readings ({}{}) are slightly above or below the ideal \
             range and may need routine monitoring or lifestyle changes.",
            shown.join(", "),
            suffix,
        )
    }

    pub fn next_steps(has_critical: bool) -> &'static str {
        if has_critical {
            "Consult doctor immediately for critical values."
        } else {
            "Maintain healthy lifestyle. Routine checkup advised."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn critical_lists_all_names() {
        let msg = MessageTemplates::critical_alert(&["TSH", "CREATININE"]);
        assert!(msg.starts_with("Important alert:"));
        assert!(msg.contains("such as TSH, CREATININE are"));
    }

    #[test]
    fn mild_caps_named_tests() {
        let msg = MessageTemplates::mild_changes(&["A", "B", "C", "D", "E", "F"]);
        assert!(msg.contains("(A, B, C, D and 2 more tests)"));
    }

    #[test]
    fn mild_without_suffix() {
        let msg = MessageTemplates::mild_changes(&["HDL"]);
        assert!(msg.contains("(HDL)"));
        assert!(!msg.contains("more tests"));
    }

    #[test]
    fn next_steps_by_severity() {
        assert!(MessageTemplates::next_steps(true).contains("critical"));
        assert!(MessageTemplates::next_steps(false).contains("Routine"));
    }
}
