use indexmap::IndexMap;

use super::rules::FieldRules;
use super::values::{FieldValue, FormValues};
use crate::schema::{FieldDefinition, FieldType, FormConfig};

/// Starting value for a field: unticked checkbox, no file, empty text.
pub fn initial_value(field: &FieldDefinition) -> FieldValue {
    match field.field_type {
        FieldType::Checkbox => FieldValue::Bool(false),
        FieldType::File => FieldValue::File(None),
        _ => FieldValue::Text(String::new()),
    }
}

pub fn initial_values(config: &FormConfig) -> FormValues {
    let mut values = FormValues::new();
    for field in config {
        values.set(field.label.clone(), initial_value(field));
    }
    values
}

/// One rule chain per field, in config order.
pub fn validation_schema(config: &FormConfig) -> Vec<FieldRules> {
    config.iter().map(FieldRules::derive).collect()
}

/// A field without a condition is always shown.
pub fn is_visible(field: &FieldDefinition, values: &FormValues) -> bool {
    field
        .condition
        .as_ref()
        .map_or(true, |cond| cond.evaluate(values))
}

/// Run every visible field's rule chain. Returns label → message for the
/// fields that fail.
pub fn validate(
    fields: &[FieldDefinition],
    schema: &[FieldRules],
    values: &FormValues,
) -> IndexMap<String, String> {
    let mut errors = IndexMap::new();
    for (field, rules) in fields.iter().zip(schema) {
        if !is_visible(field, values) {
            continue;
        }
        let fallback = initial_value(field);
        let value = values.get(&field.label).unwrap_or(&fallback);
        if let Some(msg) = rules.check(value) {
            errors.entry(field.label.clone()).or_insert(msg);
        }
    }
    errors
}
