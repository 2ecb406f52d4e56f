//! Declarative visibility conditions.
//!
//! A condition is a small expression tree over the current form values. It
//! serializes to plain JSON so it survives export/import:
//!
//! ```json
//! { "field": "Qualification", "operator": "equals", "value": "Graduate" }
//! { "all": [ {..}, {..} ] }
//! { "any": [ {..}, {..} ] }
//! { "not": {..} }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::form::values::{FieldValue, FormValues};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Equals,
    NotEquals,
    Contains,
    IsEmpty,
    IsNotEmpty,
    IsTrue,
    IsFalse,
}

/// Leaf test against a single field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub field: String,
    pub operator: Operator,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<JsonValue>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Condition {
    All { all: Vec<Condition> },
    Any { any: Vec<Condition> },
    Not { not: Box<Condition> },
    Compare(Comparison),
}

impl Condition {
    pub fn compare(field: impl Into<String>, operator: Operator, value: Option<JsonValue>) -> Self {
        Condition::Compare(Comparison {
            field: field.into(),
            operator,
            value,
        })
    }

    pub fn equals(field: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        Self::compare(field, Operator::Equals, Some(value.into()))
    }

    pub fn is_true(field: impl Into<String>) -> Self {
        Self::compare(field, Operator::IsTrue, None)
    }

    pub fn negate(self) -> Self {
        Condition::Not { not: Box::new(self) }
    }

    /// Evaluate against the live values. Unknown fields read as empty text.
    pub fn evaluate(&self, values: &FormValues) -> bool {
        match self {
            Condition::All { all } => all.iter().all(|c| c.evaluate(values)),
            Condition::Any { any } => any.iter().any(|c| c.evaluate(values)),
            Condition::Not { not } => !not.evaluate(values),
            Condition::Compare(cmp) => cmp.evaluate(values),
        }
    }

    /// Labels this condition reads, in first-seen order.
    pub fn referenced_fields(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_fields(&mut out);
        out
    }

    fn collect_fields<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Condition::All { all: list } | Condition::Any { any: list } => {
                for c in list {
                    c.collect_fields(out);
                }
            }
            Condition::Not { not } => not.collect_fields(out),
            Condition::Compare(cmp) => {
                if !out.contains(&cmp.field.as_str()) {
                    out.push(&cmp.field);
                }
            }
        }
    }
}

impl Comparison {
    fn evaluate(&self, values: &FormValues) -> bool {
        let empty = FieldValue::Text(String::new());
        let actual = values.get(&self.field).unwrap_or(&empty);

        match self.operator {
            Operator::Equals => matches_json(actual, self.value.as_ref()),
            Operator::NotEquals => !matches_json(actual, self.value.as_ref()),
            Operator::Contains => match self.value.as_ref() {
                Some(JsonValue::String(needle)) => actual.as_text().contains(needle.as_str()),
                Some(other) => actual.as_text().contains(&other.to_string()),
                None => false,
            },
            Operator::IsEmpty => actual.is_empty(),
            Operator::IsNotEmpty => !actual.is_empty(),
            Operator::IsTrue => actual.as_bool(),
            Operator::IsFalse => !actual.as_bool(),
        }
    }
}

fn matches_json(actual: &FieldValue, expected: Option<&JsonValue>) -> bool {
    match expected {
        None | Some(JsonValue::Null) => actual.is_empty(),
        Some(JsonValue::Bool(b)) => actual.as_bool() == *b,
        Some(JsonValue::String(s)) => actual.as_text() == s.as_str(),
        Some(JsonValue::Number(n)) => {
            let text = actual.as_text();
            match (text.trim().parse::<f64>(), n.as_f64()) {
                (Ok(a), Some(b)) => a == b,
                _ => text == n.to_string(),
            }
        }
        Some(other) => actual.as_text() == other.to_string(),
    }
}
