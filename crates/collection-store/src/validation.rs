//! Shallow payload validation against per-collection field rules

use serde::Serialize;
use serde_json::{Map, Value};

/// Type constraint a rule can impose on a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Any JSON value is accepted.
    Any,
    /// The value must be a JSON integer.
    Integer,
}

/// One validation rule for one payload field.
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub field: String,
    pub required: bool,
    pub field_type: FieldType,
}

impl FieldRule {
    /// The field must be present; any value is accepted.
    pub fn required(field: &str) -> Self {
        Self {
            field: field.to_string(),
            required: true,
            field_type: FieldType::Any,
        }
    }

    /// The field must be present and hold an integer.
    pub fn required_integer(field: &str) -> Self {
        Self {
            field: field.to_string(),
            required: true,
            field_type: FieldType::Integer,
        }
    }
}

/// A single validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

/// Check a raw payload against a rule set.
///
/// Returns one entry per unmet rule, in rule order. A missing required
/// field and a present-but-ill-typed field are separate failures. The
/// check is shallow: it inspects the payload only, never storage.
pub fn validate(payload: &Map<String, Value>, rules: &[FieldRule]) -> Vec<Violation> {
    let mut violations = Vec::new();

    for rule in rules {
        match payload.get(&rule.field) {
            None => {
                if rule.required {
                    violations.push(Violation {
                        field: rule.field.clone(),
                        message: format!("{} is a mandatory field", rule.field),
                    });
                }
            }
            Some(value) => {
                if rule.field_type == FieldType::Integer && !is_integer(value) {
                    violations.push(Violation {
                        field: rule.field.clone(),
                        message: format!("{} must be an integer", rule.field),
                    });
                }
            }
        }
    }

    violations
}

fn is_integer(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.is_i64() || n.is_u64(),
        _ => false,
    }
}
