//! Add-schema loading: JSON body -> validated `NewComment`.

use crate::config::{AddSchema, FieldKind, FieldRule};
use crate::error::AppError;
use crate::model::NewComment;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

pub struct RequestValidator;

impl RequestValidator {
    /// Load a parsed JSON body through the add schema.
    pub fn load(body: &Value, schema: &AddSchema) -> Result<NewComment, AppError> {
        let fields = Self::validate(body, schema)?;
        serde_json::from_value(Value::Object(fields)).map_err(|e| AppError::Validation(e.to_string()))
    }

    /// Check the body against per-column rules. Every failing column is reported, sorted by name.
    pub fn validate(value: &Value, schema: &AddSchema) -> Result<Map<String, Value>, AppError> {
        let body = match value {
            Value::Object(m) => m,
            _ => return Err(AppError::Validation("Invalid input type.".into())),
        };
        let mut errors: BTreeMap<&str, Vec<String>> = BTreeMap::new();

        for key in body.keys() {
            if !schema.columns.contains_key(key) {
                errors.entry(key.as_str()).or_default().push("Unknown field.".into());
            }
        }
        for (col, rule) in &schema.columns {
            match body.get(col) {
                None | Some(Value::Null) if rule.required => {
                    errors.entry(col.as_str()).or_default().push("Missing data for required field.".into());
                }
                None | Some(Value::Null) => {}
                Some(v) => {
                    if let Err(msg) = validate_field(v, rule) {
                        errors.entry(col.as_str()).or_default().push(msg);
                    }
                }
            }
        }

        if !errors.is_empty() {
            let message = errors
                .iter()
                .map(|(col, msgs)| format!("{}: {}", col, msgs.join(" ")))
                .collect::<Vec<_>>()
                .join("; ");
            return Err(AppError::Validation(message));
        }
        Ok(body
            .iter()
            .filter(|(_, v)| !v.is_null())
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }
}

fn validate_field(v: &Value, rule: &FieldRule) -> Result<(), String> {
    match rule.kind {
        FieldKind::String => {
            let s = v.as_str().ok_or_else(|| "Not a valid string.".to_string())?;
            if let Some(max) = rule.max_length {
                if s.chars().count() > max {
                    return Err(format!("Longer than maximum length {}.", max));
                }
            }
        }
    }
    Ok(())
}
