use std::path::{Path, PathBuf};

/// Application-level constants
pub const APP_NAME: &str = "labsum";

/// File name of the optional reference-range table looked up next to the input.
pub const REFERENCE_TABLE_FILENAME: &str = "test_and_values.csv";

/// Placeholder for any patient field or date that could not be extracted.
pub const UNKNOWN: &str = "Unknown";

/// Default tracing filter when `RUST_LOG` is not set.
pub fn default_log_filter() -> String {
    format!("{}=info,warn", APP_NAME)
}

/// Default tracing filter for verbose runs (`-v`).
pub fn verbose_log_filter() -> String {
    format!("{}=debug,info", APP_NAME)
}

/// Reference table path used when none is given explicitly:
/// `test_and_values.csv` in the same directory as the input document.
pub fn default_reference_path(input: &Path) -> PathBuf {
    input
        .parent()
        .map(|dir| dir.join(REFERENCE_TABLE_FILENAME))
        .unwrap_or_else(|| PathBuf::from(REFERENCE_TABLE_FILENAME))
}
