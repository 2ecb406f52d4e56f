use thiserror::Error;

use super::field::{FieldDefinition, FieldType, FormConfig};

/// Reasons a draft cannot become a [`FieldDefinition`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("Field label must not be empty")]
    EmptyLabel,
    #[error("A field labelled '{0}' already exists")]
    DuplicateLabel(String),
    #[error("A {0} field needs at least one option")]
    MissingOptions(FieldType),
    #[error("Option {} is blank", .0 + 1)]
    BlankOption(usize),
    #[error("{field} must be a whole number, got '{value}'")]
    InvalidNumber { field: &'static str, value: String },
    #[error("Minimum length {min} is greater than maximum length {max}")]
    LengthBounds { min: usize, max: usize },
}

/// The in-progress field held by the builder.
///
/// Numeric inputs are kept as the raw text the user typed and only parsed in
/// [`FieldDraft::build`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldDraft {
    pub label: String,
    pub field_type: FieldType,
    pub options: Vec<String>,
    pub required: bool,
    pub file_types: Vec<String>,
    pub max_size: String,
    pub min_length: String,
    pub max_length: String,
}

impl FieldDraft {
    /// Check the draft against `existing` and produce the definition.
    ///
    /// Options are only carried for choice types, file constraints only for
    /// file fields and length bounds only for string-valued fields.
    pub fn build(&self, existing: &FormConfig) -> Result<FieldDefinition, DraftError> {
        let label = self.label.trim();
        if label.is_empty() {
            return Err(DraftError::EmptyLabel);
        }
        if existing.contains_label(label) {
            return Err(DraftError::DuplicateLabel(label.to_string()));
        }

        let mut field = FieldDefinition::new(label, self.field_type).required(self.required);

        if self.field_type.has_options() {
            if self.options.is_empty() {
                return Err(DraftError::MissingOptions(self.field_type));
            }
            if let Some(idx) = self.options.iter().position(|o| o.trim().is_empty()) {
                return Err(DraftError::BlankOption(idx));
            }
            field.options = self.options.iter().map(|o| o.trim().to_string()).collect();
        }

        if self.field_type == FieldType::File {
            field.file_types = self
                .file_types
                .iter()
                .map(|t| t.trim())
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect();
            field.max_size = parse_optional("Max file size", &self.max_size)?;
        }

        if self.field_type.is_textual() {
            let min = parse_optional::<usize>("Minimum length", &self.min_length)?.filter(|n| *n > 0);
            let max = parse_optional::<usize>("Maximum length", &self.max_length)?.filter(|n| *n > 0);
            if let (Some(min), Some(max)) = (min, max) {
                if min > max {
                    return Err(DraftError::LengthBounds { min, max });
                }
            }
            field.min_length = min;
            field.max_length = max;
        }

        Ok(field)
    }
}

fn parse_optional<T: std::str::FromStr>(
    field: &'static str,
    raw: &str,
) -> Result<Option<T>, DraftError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<T>()
        .map(Some)
        .map_err(|_| DraftError::InvalidNumber {
            field,
            value: raw.to_string(),
        })
}
