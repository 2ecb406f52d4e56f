use std::fmt::Display;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize};

use super::condition::Condition;

// ─── FieldType ────────────────────────────────────────────────────────────────

/// Kind of control a field renders as. Serialized as the lowercase name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    #[default]
    Text,
    Textarea,
    Dropdown,
    Checkbox,
    Radio,
    File,
    Email,
    Phone,
}

impl FieldType {
    pub const ALL: [FieldType; 8] = [
        FieldType::Text,
        FieldType::Textarea,
        FieldType::Dropdown,
        FieldType::Checkbox,
        FieldType::Radio,
        FieldType::File,
        FieldType::Email,
        FieldType::Phone,
    ];

    /// Human readable name used by the builder's type selector.
    pub fn display_name(self) -> &'static str {
        match self {
            FieldType::Text => "Text Input",
            FieldType::Textarea => "Text Area",
            FieldType::Dropdown => "Dropdown",
            FieldType::Checkbox => "Checkbox",
            FieldType::Radio => "Radio Button",
            FieldType::File => "File Upload",
            FieldType::Email => "Email",
            FieldType::Phone => "Phone",
        }
    }

    /// The wire name, as written to `form-config.json`.
    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Textarea => "textarea",
            FieldType::Dropdown => "dropdown",
            FieldType::Checkbox => "checkbox",
            FieldType::Radio => "radio",
            FieldType::File => "file",
            FieldType::Email => "email",
            FieldType::Phone => "phone",
        }
    }

    /// Dropdown and radio pick from `options`.
    pub fn has_options(self) -> bool {
        matches!(self, FieldType::Dropdown | FieldType::Radio)
    }

    /// Types whose value is a string and therefore take length bounds.
    pub fn is_textual(self) -> bool {
        matches!(
            self,
            FieldType::Text
                | FieldType::Textarea
                | FieldType::Email
                | FieldType::Phone
                | FieldType::Dropdown
                | FieldType::Radio
        )
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── FieldDefinition ──────────────────────────────────────────────────────────

/// One entry of a [`FormConfig`].
///
/// The label doubles as the key under which the field's value is stored, so
/// two fields with the same label share a value. The builder refuses such
/// drafts but imported configs are taken as they are.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    #[serde(default)]
    pub label: String,
    #[serde(rename = "type", default)]
    pub field_type: FieldType,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub file_types: Vec<String>,
    /// Upper bound in kilobytes for uploaded files.
    #[serde(default, deserialize_with = "lenient_number")]
    pub max_size: Option<u64>,
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub min_length: Option<usize>,
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
}

impl FieldDefinition {
    pub fn new(label: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            label: label.into(),
            field_type,
            ..Self::default()
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_file_types<I, S>(mut self, file_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.file_types = file_types.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_max_size(mut self, kilobytes: u64) -> Self {
        self.max_size = Some(kilobytes);
        self
    }

    pub fn with_length(mut self, min: Option<usize>, max: Option<usize>) -> Self {
        self.min_length = min;
        self.max_length = max;
        self
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }
}

/// Numeric inputs of browser-built configs arrive as the raw input text.
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText<T> {
    Number(T),
    Text(String),
}

/// Accept `12`, `"12"`, `""` and `null`; blank text and `null` read as unset.
fn lenient_number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: Display,
{
    match Option::<NumberOrText<T>>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrText::Number(n)) => Ok(Some(n)),
        Some(NumberOrText::Text(raw)) => {
            let raw = raw.trim();
            if raw.is_empty() {
                return Ok(None);
            }
            raw.parse()
                .map(Some)
                .map_err(|e| de::Error::custom(format!("invalid number '{raw}': {e}")))
        }
    }
}

// ─── FormConfig ───────────────────────────────────────────────────────────────

/// The ordered field list shared by the builder and the renderer. Serializes
/// as a bare JSON array.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormConfig {
    fields: Vec<FieldDefinition>,
}

impl FormConfig {
    pub fn new(fields: Vec<FieldDefinition>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldDefinition> {
        self.fields.iter()
    }

    pub fn contains_label(&self, label: &str) -> bool {
        self.fields.iter().any(|f| f.label == label)
    }

    pub fn push(&mut self, field: FieldDefinition) {
        self.fields.push(field);
    }

    /// Remove the field at `index`. Out-of-range indices leave the list
    /// untouched and return `None`.
    pub fn remove(&mut self, index: usize) -> Option<FieldDefinition> {
        if index < self.fields.len() {
            Some(self.fields.remove(index))
        } else {
            None
        }
    }
}

impl From<Vec<FieldDefinition>> for FormConfig {
    fn from(fields: Vec<FieldDefinition>) -> Self {
        Self::new(fields)
    }
}

impl<'a> IntoIterator for &'a FormConfig {
    type Item = &'a FieldDefinition;
    type IntoIter = std::slice::Iter<'a, FieldDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn serializes_with_camel_case_keys() {
        let field = FieldDefinition::new("Avatar", FieldType::File)
            .with_file_types(["image/png"])
            .with_max_size(512);
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "label": "Avatar",
                "type": "file",
                "options": [],
                "required": false,
                "fileTypes": ["image/png"],
                "maxSize": 512
            })
        );
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let field: FieldDefinition =
            serde_json::from_str(r#"{"label":"Bio","type":"textarea","minLength":3}"#).unwrap();
        assert_eq!(field.field_type, FieldType::Textarea);
        assert!(field.options.is_empty());
        assert!(!field.required);
        assert_eq!(field.min_length, Some(3));
        assert_eq!(field.max_size, None);
    }

    #[test]
    fn numeric_keys_accept_input_text() {
        let field: FieldDefinition = serde_json::from_str(
            r#"{"label":"CV","type":"file","maxSize":"256","minLength":"","maxLength":null}"#,
        )
        .unwrap();
        assert_eq!(field.max_size, Some(256));
        assert_eq!((field.min_length, field.max_length), (None, None));

        let field: FieldDefinition =
            serde_json::from_str(r#"{"label":"CV","type":"file","maxSize":" 12 "}"#).unwrap();
        assert_eq!(field.max_size, Some(12));

        let bad = serde_json::from_str::<FieldDefinition>(r#"{"label":"CV","maxSize":"big"}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn unknown_type_is_rejected() {
        let res = serde_json::from_str::<FieldDefinition>(r#"{"label":"X","type":"slider"}"#);
        assert!(res.is_err());
    }

    #[test]
    fn remove_out_of_range_is_noop() {
        let mut config = FormConfig::from(vec![FieldDefinition::new("A", FieldType::Text)]);
        assert!(config.remove(3).is_none());
        assert_eq!(config.len(), 1);
    }
}
