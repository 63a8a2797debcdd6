//! Numeric token parsing.
//!
//! Result cells carry flag markers ("14.2 H", "<0.5", "≥90") and thousands
//! separators ("1,50,000"). These helpers strip the decoration and read the
//! first signed decimal, returning `None` instead of failing.

use std::sync::LazyLock;

use regex::Regex;

/// First signed decimal in a string.
static DECIMAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[-+]?\d*\.?\d+").unwrap());

/// A token that is a number and nothing else, allowing comparison
/// operators in front and flag letters behind.
static NUMERIC_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[<>≤≥=]*[-+]?(?:\d+(?:,\d+)*(?:\.\d+)?|\.\d+)[HhLl*]*$").unwrap()
});

/// Flag letters, comparison operators and thousands separators.
fn is_decoration(c: char) -> bool {
    matches!(c, 'H' | 'h' | 'L' | 'l' | '<' | '>' | '≥' | '≤' | '=' | '*' | ',')
}

/// Parse a result token to a number, or `None` if it holds no number.
pub fn parse_number(token: &str) -> Option<f64> {
    let clean: String = token.chars().filter(|c| !is_decoration(*c)).collect();
    DECIMAL
        .find(&clean)
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// True when the whole token is a (possibly flagged) number, as opposed to
/// a word that merely contains digits ("B12", "10^3/uL", "13.0-17.0").
pub fn is_numeric_token(token: &str) -> bool {
    NUMERIC_TOKEN.is_match(token.trim())
}

/// Every signed decimal in a line of text, in order of appearance.
pub fn find_numbers(line: &str) -> Vec<f64> {
    DECIMAL
        .find_iter(line)
        .filter_map(|m| m.as_str().parse::<f64>().ok())
        .collect()
}

/// Plausible calendar year in the range the layout pass treats as a decoy.
pub fn is_layout_year(value: f64) -> bool {
    (2000.0..=2030.0).contains(&value)
}

/// Plausible report year, rejected as a result candidate.
pub fn is_report_year(value: f64) -> bool {
    (2020.0..=2030.0).contains(&value)
}
