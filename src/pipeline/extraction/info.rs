//! Patient and report metadata from the document's full text.
//!
//! Each field is an independent labeled search: the value runs from the
//! label to the next known label or the end of the line. Fields with no
//! match keep "Unknown".

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::config::UNKNOWN;
use crate::models::PatientInfo;

static NAME_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:patient\s*name|name)\b[ \t]*[:\-]?[ \t]*(?P<value>[^\n]*)").unwrap()
});
static NAME_STOP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:age|gender|sex|treatment|ref|mobile|lab)").unwrap());

static AGE_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:age\s*/\s*gender|age|gender)\b[ \t]*[:\-]?[ \t]*(?P<value>[^\n]*)").unwrap()
});
static AGE_STOP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:mobile|ref|date|patient)").unwrap());
static GENDER_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bgender\b").unwrap());

static DOCTOR_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:ref\.?\s*by|referred\s*by|consultant)\b[ \t]*[:\-]?[ \t]*(?P<value>[^\n]*)").unwrap()
});
static DOCTOR_STOP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:date|lab|sample|patient)").unwrap());

static TREATMENT_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:lab\s*id|treatment\s*id|sample\s*id|reg(?:istration)?\.?\s*no|patient\s*id)\b\.?[ \t]*[:\-]?[ \t]*(?P<value>[A-Za-z0-9][A-Za-z0-9\-/]*)",
    )
    .unwrap()
});

static REPORT_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:report(?:ed)?\s*(?:on|date)|collect(?:ion|ed)\s*(?:on|date)|date)\b[ \t]*[:\-]?[ \t]*(?P<value>\d{1,2}[/\-.]\d{1,2}[/\-.]\d{2,4}|\d{4}-\d{1,2}-\d{1,2}|\d{1,2}[ \-][A-Za-z]{3,9}[ \-,]+\d{4})",
    )
    .unwrap()
});

/// Extract patient metadata from the concatenated text of all pages.
pub fn extract_info(full_text: &str) -> PatientInfo {
    let mut info = PatientInfo::default();

    if let Some(name) = labeled_value(full_text, &NAME_LABEL, &NAME_STOP) {
        info.patient_name = name;
    }
    if let Some(age) = labeled_value(full_text, &AGE_LABEL, &AGE_STOP) {
        let age = collapse(&GENDER_WORD.replace_all(&age, ""));
        if !age.is_empty() {
            info.age_gender = age;
        }
    }
    if let Some(doctor) = labeled_value(full_text, &DOCTOR_LABEL, &DOCTOR_STOP) {
        info.doctor = doctor;
    }
    if let Some(id) = first_capture(full_text, &TREATMENT_ID) {
        info.treatment_id = id;
    }
    if let Some(date) = first_capture(full_text, &REPORT_DATE) {
        info.date = date;
    }

    debug!(
        has_name = info.patient_name != UNKNOWN,
        has_doctor = info.doctor != UNKNOWN,
        has_date = info.has_date(),
        "Report info extracted"
    );
    info
}

/// Value after the first occurrence of `label` that is non-empty once cut
/// at the next `stop` label.
fn labeled_value(text: &str, label: &Regex, stop: &Regex) -> Option<String> {
    label.captures_iter(text).find_map(|caps| {
        let rest = caps.name("value")?.as_str();
        let end = stop.find(rest).map_or(rest.len(), |m| m.start());
        let value = collapse(&rest[..end]);
        (!value.is_empty()).then_some(value)
    })
}

fn first_capture(text: &str, pattern: &Regex) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|caps| caps.name("value"))
        .map(|m| m.as_str().to_string())
}

/// Single-spaced value without trailing separators.
fn collapse(value: &str) -> String {
    value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim_end_matches([',', ';', '|', ':', '-', '/'])
        .trim_end()
        .to_string()
}
