//! Patient/study metadata recovery from the text layer of a gait report.
//!
//! Reports are loosely structured: each field sits on a line behind a
//! keyword anchor ("Patient ID", "Study Date", ...) with inconsistent
//! delimiters. Every line is checked against every anchor independently,
//! so one line may fill several fields, and a later line overwrites an
//! earlier one for the same field.

use std::sync::LazyLock;

use regex::Regex;

use super::sanitize::document_lines;
use super::types::PageText;
use crate::models::{PatientField, PatientRecord};

/// `DD-MM-YYYY`, kept verbatim.
static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{2}-\d{2}-\d{4}").unwrap());

/// `H:MM` / `HH:MM`, tolerant of spaces around the colon.
static TIME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{1,2})\s*:\s*(\d{2})").unwrap());

const NAME_ANCHOR: &str = "Patient Name";
const ID_ANCHOR: &str = "Patient ID";
const GENDER_ANCHOR: &str = "Gender";
const HEIGHT_ANCHOR: &str = "Height";
const DOB_ANCHOR: &str = "DOB";
const STUDY_ANCHOR: &str = "Study";
const STUDY_DATE_ANCHOR: &str = "Study Date";
const STUDY_TIME_ANCHOR: &str = "Study Time";
const STUDY_TYPE_ANCHOR: &str = "Study Type";
const DIAGNOSIS_ANCHOR: &str = "Diagnosis";
const DEPARTMENT_ANCHOR: &str = "Department";
const CONSULTING_ANCHOR: &str = "Consulting";
const DOCTOR_MARKER: &str = "Dr";

/// Build a patient record from the raw page texts of one report.
///
/// Never fails: a report without a text layer yields the all-default record.
pub fn extract_patient(pages: &[PageText]) -> PatientRecord {
    let lines = document_lines(pages);
    let record = extract_patient_from_lines(lines.iter().map(String::as_str));

    tracing::debug!(
        lines = lines.len(),
        populated = record.populated_count(),
        "Patient metadata extracted"
    );

    record
}

/// Same as [`extract_patient`] over already-cleaned lines.
pub fn extract_patient_from_lines<'a, I>(lines: I) -> PatientRecord
where
    I: IntoIterator<Item = &'a str>,
{
    let mut record = PatientRecord::default();
    for line in lines {
        apply_line(&mut record, line);
    }
    record
}

fn apply_line(record: &mut PatientRecord, line: &str) {
    if line.is_empty() {
        return;
    }

    if let Some(rest) = after_last(line, NAME_ANCHOR) {
        record.set(PatientField::Name, strip_colons(rest));
    }

    if let Some(rest) = after_last(line, ID_ANCHOR) {
        let value = strip_colons(rest);
        // Only the first token: the ID often shares its line with the next label.
        if let Some(id) = value.split_whitespace().next() {
            record.set(PatientField::PatientId, id);
        }
    }

    if line.contains('/') {
        if let Some(rest) = after_last(line, GENDER_ANCHOR) {
            apply_gender_age(record, rest);
        }
        if let Some(rest) = after_last(line, HEIGHT_ANCHOR) {
            apply_height_weight(record, rest);
        }
    }

    if line.contains(DOB_ANCHOR) {
        if let Some(m) = DATE_PATTERN.find(line) {
            record.set(PatientField::Dob, m.as_str());
        }
    }

    if line.contains(STUDY_DATE_ANCHOR) {
        if let Some(m) = DATE_PATTERN.find(line) {
            record.set(PatientField::StudyDate, m.as_str());
        }
    }

    if line.contains(STUDY_TIME_ANCHOR) {
        if let Some(caps) = TIME_PATTERN.captures(line) {
            record.set(PatientField::StudyTime, format!("{}:{}", &caps[1], &caps[2]));
        }
    }

    if let Some(rest) = after_last(line, STUDY_TYPE_ANCHOR) {
        record.set(PatientField::StudyType, strip_colons(rest));
    }

    if let Some(rest) = after_last(line, DIAGNOSIS_ANCHOR) {
        let diagnosis: String = rest.chars().filter(|c| !matches!(c, ':' | '/')).collect();
        record.set(PatientField::Diagnosis, diagnosis.trim());
    }

    if let Some(rest) = after_last(line, DEPARTMENT_ANCHOR) {
        record.set(
            PatientField::Department,
            strip_colons(before_first(rest, CONSULTING_ANCHOR)),
        );
    }

    if line.contains(DOCTOR_MARKER) {
        if let Some(rest) = after_last(line, CONSULTING_ANCHOR) {
            record.set(PatientField::ConsultingDoctor, strip_colons(rest));
        }
    }
}

/// "Gender / :Male / 39 Study Protocol" -> Gender "Male", Age "39".
fn apply_gender_age(record: &mut PatientRecord, rest: &str) {
    let segment = strip_colons(before_first(rest, STUDY_ANCHOR));
    for token in slash_tokens(&segment) {
        if token.eq_ignore_ascii_case("male") || token.eq_ignore_ascii_case("female") {
            record.set(PatientField::Gender, token);
        }
        if is_digits(token) {
            record.set(PatientField::Age, token);
        }
    }
}

/// "Height (cm) / :170 / 90 Study Date" -> Height "170", Weight "90".
fn apply_height_weight(record: &mut PatientRecord, rest: &str) {
    let segment = strip_colons(before_first(rest, STUDY_ANCHOR));
    let numbers: Vec<&str> = slash_tokens(&segment).filter(|t| is_digits(t)).collect();
    if let [height, weight, ..] = numbers.as_slice() {
        record.set(PatientField::Height, *height);
        record.set(PatientField::Weight, *weight);
    }
}

/// Text after the last occurrence of `anchor`, if the anchor is present.
fn after_last<'a>(line: &'a str, anchor: &str) -> Option<&'a str> {
    line.rsplit_once(anchor).map(|(_, after)| after)
}

/// Text before the first occurrence of `anchor` (all of it when absent).
fn before_first<'a>(text: &'a str, anchor: &str) -> &'a str {
    match text.find(anchor) {
        Some(idx) => &text[..idx],
        None => text,
    }
}

fn strip_colons(text: &str) -> String {
    text.replace(':', "").trim().to_string()
}

fn slash_tokens(segment: &str) -> impl Iterator<Item = &str> {
    segment.split('/').map(str::trim).filter(|t| !t.is_empty())
}

fn is_digits(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_digit())
}
