//! Structural comparison for round-trip verification
//!
//! Deep-diffs two JSON trees and reports every difference as a path-qualified
//! finding. Lists under an `environment` key are compared as token multisets,
//! so separator, case and spacing differences are not findings.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::document::CvRecord;

static ENVIRONMENT_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[,;|·•▪●]|\s[-•]\s").unwrap());

const ENVIRONMENT_KEY: &str = "environment";

/// Outcome of a comparison; `ok` iff `findings` is empty
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    pub ok: bool,
    pub findings: Vec<String>,
}

/// Compare two trees
pub fn compare(left: &Value, right: &Value) -> Comparison {
    let mut findings = Vec::new();
    diff(left, right, "$", None, &mut findings);
    Comparison {
        ok: findings.is_empty(),
        findings,
    }
}

/// Compare two extracted records through their JSON form
pub fn compare_records(left: &CvRecord, right: &CvRecord) -> Comparison {
    let left = serde_json::to_value(left).unwrap_or_default();
    let right = serde_json::to_value(right).unwrap_or_default();
    compare(&left, &right)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "mapping",
    }
}

fn diff(left: &Value, right: &Value, path: &str, key: Option<&str>, findings: &mut Vec<String>) {
    if type_name(left) != type_name(right) {
        findings.push(format!(
            "{path}: type mismatch ({} vs {})",
            type_name(left),
            type_name(right)
        ));
        return;
    }

    match (left, right) {
        (Value::Object(l), Value::Object(r)) => {
            let mut left_keys: Vec<&String> = l.keys().collect();
            left_keys.sort();
            let mut right_keys: Vec<&String> = r.keys().collect();
            right_keys.sort();

            for k in left_keys.iter().filter(|k| !r.contains_key(k.as_str())) {
                findings.push(format!("{path}: missing key '{k}'"));
            }
            for k in right_keys.iter().filter(|k| !l.contains_key(k.as_str())) {
                findings.push(format!("{path}: extra key '{k}'"));
            }
            for k in left_keys.iter().filter(|k| r.contains_key(k.as_str())) {
                let child = format!("{path}.{k}");
                diff(&l[k.as_str()], &r[k.as_str()], &child, Some(k.as_str()), findings);
            }
        }
        (Value::Array(l), Value::Array(r)) if key == Some(ENVIRONMENT_KEY) => {
            let left_tokens = environment_tokens(l);
            let right_tokens = environment_tokens(r);
            if left_tokens != right_tokens {
                findings.push(format!(
                    "{path}: environment mismatch ([{}] vs [{}])",
                    left_tokens.join(", "),
                    right_tokens.join(", ")
                ));
            }
        }
        (Value::Array(l), Value::Array(r)) => {
            if l.len() != r.len() {
                findings.push(format!(
                    "{path}: list length mismatch ({} vs {})",
                    l.len(),
                    r.len()
                ));
                return;
            }
            for (index, (a, b)) in l.iter().zip(r).enumerate() {
                diff(a, b, &format!("{path}[{index}]"), None, findings);
            }
        }
        _ => {
            if left != right {
                findings.push(format!("{path}: value mismatch ({left} vs {right})"));
            }
        }
    }
}

/// Sorted, lower-cased tokens of an environment list
fn environment_tokens(items: &[Value]) -> Vec<String> {
    let mut tokens = Vec::new();

    for item in items {
        match item {
            Value::String(text) => tokens.extend(
                ENVIRONMENT_SEPARATOR
                    .split(text)
                    .map(|token| token.trim().to_lowercase())
                    .filter(|token| !token.is_empty()),
            ),
            other => tokens.push(other.to_string().trim().to_lowercase()),
        }
    }

    tokens.sort();
    tokens
}
