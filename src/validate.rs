//! Structural validation of records
//!
//! Works on the JSON form so that records coming back from the tailoring step,
//! which may have lost keys or changed types, can be checked the same way as
//! freshly extracted ones.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::document::CvRecord;

/// Sidebar sections a complete CV is expected to fill
pub const EXPECTED_SECTIONS: [&str; 5] = ["skills", "languages", "tools", "certifications", "industries"];

const IDENTITY_FIELDS: [&str; 4] = ["title", "full_name", "first_name", "last_name"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Problems that block downstream use
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl CvRecord {
    pub fn validate(&self) -> ValidationReport {
        validate_value(&serde_json::to_value(self).unwrap_or_default())
    }
}

fn is_blank(value: Option<&Value>) -> bool {
    value
        .and_then(Value::as_str)
        .is_none_or(|text| text.trim().is_empty())
}

fn is_empty_list(value: Option<&Value>) -> bool {
    value.and_then(Value::as_array).is_none_or(Vec::is_empty)
}

pub fn validate_value(record: &Value) -> ValidationReport {
    let mut report = ValidationReport::default();
    check_identity(record, &mut report);
    check_sidebar(record, &mut report);
    check_experiences(record, &mut report);
    report
}

fn check_identity(record: &Value, report: &mut ValidationReport) {
    let identity = record.get("identity");
    let missing: Vec<&str> = IDENTITY_FIELDS
        .into_iter()
        .filter(|field| is_blank(identity.and_then(|i| i.get(*field))))
        .collect();

    if !missing.is_empty() {
        report
            .errors
            .push(format!("identity incomplete: missing {}", missing.join(", ")));
    }
}

fn check_sidebar(record: &Value, report: &mut ValidationReport) {
    let Some(sidebar) = record.get("sidebar").and_then(Value::as_object) else {
        report.errors.push("sidebar missing".to_string());
        return;
    };

    let mut empty_expected = 0;
    for key in EXPECTED_SECTIONS {
        match sidebar.get(key) {
            None => report.warnings.push(format!("sidebar section '{key}' missing")),
            Some(section) if is_empty_list(Some(section)) => {
                empty_expected += 1;
                report.warnings.push(format!("sidebar section '{key}' empty"));
            }
            Some(_) => {}
        }
    }

    if sidebar.values().all(|section| is_empty_list(Some(section))) {
        report.errors.push("sidebar is empty".to_string());
    } else if empty_expected == EXPECTED_SECTIONS.len() {
        report
            .errors
            .push("every expected sidebar section is empty".to_string());
    }
}

fn check_experiences(record: &Value, report: &mut ValidationReport) {
    let entries = match record.get("experiences").and_then(Value::as_array) {
        Some(entries) if !entries.is_empty() => entries,
        _ => {
            report.errors.push("no experience entries".to_string());
            return;
        }
    };

    let mut issues = BTreeSet::new();
    let mut has_detail = false;
    let mut environment_not_list = false;

    for entry in entries {
        if is_blank(entry.get("heading")) {
            issues.insert("missing heading");
        }
        if is_blank(entry.get("description")) {
            issues.insert("missing description");
        }
        if !is_empty_list(entry.get("bullets")) {
            has_detail = true;
        }
        match entry.get("environment") {
            None | Some(Value::Null) => {}
            Some(Value::Array(tokens)) => has_detail |= !tokens.is_empty(),
            Some(_) => environment_not_list = true,
        }
    }

    if !issues.is_empty() {
        let issues: Vec<_> = issues.into_iter().collect();
        report
            .warnings
            .push(format!("experience entries with issues: {}", issues.join(", ")));
    }
    if !has_detail {
        report
            .warnings
            .push("no experience has bullets or an environment list".to_string());
    }
    if environment_not_list {
        report
            .warnings
            .push("environment value present but not a list".to_string());
    }
}
