/*
[INPUT]:  FormFieldDefinition snapshot and operator-entered values
[OUTPUT]: Seeded form state, per-field validation errors, typed outputs
[POS]:    Domain logic - schema-driven form engine
[UPDATE]: When field kinds or validation rules change
*/

use std::collections::BTreeMap;

use flowdesk_adapter::{FieldKind, FormFieldDefinition};
use serde_json::{Map, Number, Value};

/// Value of one form field. Boolean fields hold a checkbox state; every
/// other kind is edited as text and coerced at payload-build time.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Bool(bool),
    Text(String),
}

impl FieldValue {
    pub fn as_text(&self) -> &str {
        match self {
            FieldValue::Text(text) => text,
            FieldValue::Bool(_) => "",
        }
    }

    pub fn as_bool(&self) -> bool {
        matches!(self, FieldValue::Bool(true))
    }
}

/// Mutable form state for one open action dialog: the value map seeded
/// from the field definitions plus the standing validation errors.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    values: BTreeMap<String, FieldValue>,
    errors: BTreeMap<String, String>,
}

impl FormState {
    /// Seed values from the task's field definitions: `defaultValue` when
    /// declared, otherwise `false` for booleans and `""` for the rest.
    pub fn seed(fields: &[FormFieldDefinition]) -> Self {
        let values = fields
            .iter()
            .map(|field| {
                let value = if field.kind.is_boolean() {
                    let checked = field
                        .default_value
                        .as_deref()
                        .is_some_and(|raw| raw.eq_ignore_ascii_case("true"));
                    FieldValue::Bool(checked)
                } else {
                    FieldValue::Text(field.default_value.clone().unwrap_or_default())
                };
                (field.key.clone(), value)
            })
            .collect();
        Self {
            values,
            errors: BTreeMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn value(&self, key: &str) -> Option<&FieldValue> {
        self.values.get(key)
    }

    /// Record an edit. Clears only this field's standing error so the
    /// operator gets immediate feedback without a full re-validation.
    pub fn set_value(&mut self, key: &str, value: FieldValue) {
        self.values.insert(key.to_string(), value);
        self.errors.remove(key);
    }

    pub fn error(&self, key: &str) -> Option<&str> {
        self.errors.get(key).map(String::as_str)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Run the validator and store the failing-field map. Returns whether
    /// the form is valid.
    pub fn validate(&mut self, fields: &[FormFieldDefinition]) -> bool {
        self.errors = validate(fields, &self.values);
        self.errors.is_empty()
    }

    /// Build the `outputs` payload map. Integer/float fields that parse are
    /// emitted as JSON numbers; everything else keeps its entered shape.
    pub fn outputs(&self, fields: &[FormFieldDefinition]) -> Map<String, Value> {
        let mut outputs = Map::new();
        for field in fields {
            let Some(value) = self.values.get(&field.key) else {
                continue;
            };
            let json = match (field.kind, value) {
                (FieldKind::Boolean, FieldValue::Bool(flag)) => Value::Bool(*flag),
                (FieldKind::Integer, FieldValue::Text(text)) => text
                    .trim()
                    .parse::<i64>()
                    .map(|n| Value::Number(n.into()))
                    .unwrap_or_else(|_| Value::String(text.clone())),
                (FieldKind::Float, FieldValue::Text(text)) => text
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .and_then(Number::from_f64)
                    .map(Value::Number)
                    .unwrap_or_else(|| Value::String(text.clone())),
                (_, FieldValue::Text(text)) => Value::String(text.clone()),
                (_, FieldValue::Bool(flag)) => Value::Bool(*flag),
            };
            outputs.insert(field.key.clone(), json);
        }
        outputs
    }
}

/// Pure validation over field definitions and values. Returns a map of
/// failing keys to messages; an empty map means the form is valid.
pub fn validate(
    fields: &[FormFieldDefinition],
    values: &BTreeMap<String, FieldValue>,
) -> BTreeMap<String, String> {
    let mut errors = BTreeMap::new();
    for field in fields {
        if !field.required {
            continue;
        }
        let value = values.get(&field.key);
        if field.kind.is_boolean() {
            // An unchecked required checkbox fails even though `false` is a
            // legitimate value for non-required booleans.
            let checked = value.is_some_and(FieldValue::as_bool);
            if !checked {
                errors.insert(
                    field.key.clone(),
                    format!("{} is required to be checked.", field.label),
                );
            }
        } else {
            let text = value.map(FieldValue::as_text).unwrap_or("");
            if text.trim().is_empty() {
                errors.insert(field.key.clone(), format!("{} is required.", field.label));
            }
        }
    }
    errors
}
