use std::path::PathBuf;

use indexmap::IndexMap;
use serde::Serialize;

/// A file picked for a `file` field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FileValue {
    pub name: String,
    #[serde(skip)]
    pub path: PathBuf,
    /// Size in bytes.
    pub size: u64,
    /// Guessed from the extension; empty when unknown.
    #[serde(rename = "type")]
    pub mime: String,
}

impl FileValue {
    pub fn size_kb(&self) -> f64 {
        self.size as f64 / 1024.0
    }

    pub fn is_image(&self) -> bool {
        self.mime.starts_with("image/")
    }
}

/// Current value of one form field.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Bool(bool),
    File(Option<FileValue>),
}

impl FieldValue {
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Bool(b) => !b,
            FieldValue::File(f) => f.is_none(),
        }
    }

    /// String view used by length rules and condition comparisons.
    pub fn as_text(&self) -> std::borrow::Cow<'_, str> {
        match self {
            FieldValue::Text(s) => s.as_str().into(),
            FieldValue::Bool(b) => b.to_string().into(),
            FieldValue::File(Some(f)) => f.name.as_str().into(),
            FieldValue::File(None) => "".into(),
        }
    }

    pub fn as_bool(&self) -> bool {
        match self {
            FieldValue::Bool(b) => *b,
            FieldValue::Text(s) => s == "true",
            FieldValue::File(f) => f.is_some(),
        }
    }
}

/// Values keyed by field label, in form order.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FormValues {
    entries: IndexMap<String, FieldValue>,
}

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, label: &str) -> Option<&FieldValue> {
        self.entries.get(label)
    }

    pub fn set(&mut self, label: impl Into<String>, value: FieldValue) {
        self.entries.insert(label.into(), value);
    }

    pub fn with(mut self, label: &str, value: FieldValue) -> Self {
        self.set(label, value);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, FieldValue> {
        self.entries.iter()
    }

    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_in_insertion_order() {
        let values = FormValues::new()
            .with("Name", FieldValue::Text("Alice".into()))
            .with("Bio", FieldValue::Text(String::new()))
            .with("Agree", FieldValue::Bool(true))
            .with("Avatar", FieldValue::File(None));
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"{"Name":"Alice","Bio":"","Agree":true,"Avatar":null}"#);
    }

    #[test]
    fn emptiness_per_kind() {
        assert!(FieldValue::Text(String::new()).is_empty());
        assert!(FieldValue::Bool(false).is_empty());
        assert!(FieldValue::File(None).is_empty());
        assert!(!FieldValue::Text("x".into()).is_empty());
    }
}
