//! Validation rules derived from field metadata.
//!
//! Each field gets an ordered chain of [`Rule`]s; the first one that fails
//! produces the field's error message. Empty values only ever fail the
//! `Required` rule, so optional fields left blank always pass.

use once_cell::sync::Lazy;
use regex::Regex;

use super::file::matches_pattern;
use super::values::FieldValue;
use crate::schema::{FieldDefinition, FieldType};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email pattern is valid")
});

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{10}$").expect("phone pattern is valid"));

#[derive(Clone, Debug, PartialEq)]
pub enum Rule {
    Required,
    MinLength(usize),
    MaxLength(usize),
    Email,
    Phone,
    /// Kilobytes.
    MaxFileSize(u64),
    FileTypes(Vec<String>),
}

/// The rule chain for one field.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldRules {
    pub label: String,
    pub rules: Vec<Rule>,
}

impl FieldRules {
    /// Build the chain in a fixed order: required, min, max, format, file.
    pub fn derive(field: &FieldDefinition) -> Self {
        let mut rules = Vec::new();
        if field.required {
            rules.push(Rule::Required);
        }
        if let Some(min) = field.min_length.filter(|n| *n > 0) {
            rules.push(Rule::MinLength(min));
        }
        if let Some(max) = field.max_length.filter(|n| *n > 0) {
            rules.push(Rule::MaxLength(max));
        }
        match field.field_type {
            FieldType::Email => rules.push(Rule::Email),
            FieldType::Phone => rules.push(Rule::Phone),
            FieldType::File => {
                if let Some(kb) = field.max_size.filter(|kb| *kb > 0) {
                    rules.push(Rule::MaxFileSize(kb));
                }
                if !field.file_types.is_empty() {
                    rules.push(Rule::FileTypes(field.file_types.clone()));
                }
            }
            _ => {}
        }
        Self {
            label: field.label.clone(),
            rules,
        }
    }

    /// First failing rule's message, or `None` when the value is valid.
    pub fn check(&self, value: &FieldValue) -> Option<String> {
        self.rules
            .iter()
            .find_map(|rule| rule.check(&self.label, value))
    }
}

impl Rule {
    /// Check one value. Empty values only fail `Required`: a blank optional
    /// phone or length-bounded field passes, where a bare `^\d{10}$` match
    /// would reject the empty string.
    fn check(&self, label: &str, value: &FieldValue) -> Option<String> {
        if value.is_empty() {
            return match self {
                Rule::Required => Some(format!("{label} is required")),
                _ => None,
            };
        }

        match (self, value) {
            (Rule::Required, _) => None,
            (Rule::MinLength(min), FieldValue::Text(s)) if s.chars().count() < *min => Some(
                format!("{label} must be at least {min} characters"),
            ),
            (Rule::MaxLength(max), FieldValue::Text(s)) if s.chars().count() > *max => Some(
                format!("{label} must be at most {max} characters"),
            ),
            (Rule::Email, FieldValue::Text(s)) if !EMAIL_RE.is_match(s) => {
                Some("Invalid email address".to_string())
            }
            (Rule::Phone, FieldValue::Text(s)) if !PHONE_RE.is_match(s) => {
                Some("Phone number must be 10 digits".to_string())
            }
            (Rule::MaxFileSize(kb), FieldValue::File(Some(f)))
                if f.size > kb.saturating_mul(1024) =>
            {
                Some("File size is too large".to_string())
            }
            (Rule::FileTypes(patterns), FieldValue::File(Some(f)))
                if !patterns.iter().any(|p| matches_pattern(f, p)) =>
            {
                Some("Unsupported Format".to_string())
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::values::FileValue;
    use std::path::PathBuf;

    fn text(s: &str) -> FieldValue {
        FieldValue::Text(s.to_string())
    }

    #[test]
    fn required_text_message() {
        let rules = FieldRules::derive(&FieldDefinition::new("Name", FieldType::Text).required(true));
        assert_eq!(rules.check(&text("")), Some("Name is required".to_string()));
        assert_eq!(rules.check(&text("Alice")), None);
    }

    #[test]
    fn email_format() {
        let rules = FieldRules::derive(&FieldDefinition::new("Mail", FieldType::Email));
        assert_eq!(
            rules.check(&text("not-an-email")),
            Some("Invalid email address".to_string())
        );
        assert_eq!(rules.check(&text("a@b.com")), None);
        assert_eq!(rules.check(&text("")), None);
    }

    #[test]
    fn phone_format() {
        let rules = FieldRules::derive(&FieldDefinition::new("Phone", FieldType::Phone));
        assert_eq!(
            rules.check(&text("12345")),
            Some("Phone number must be 10 digits".to_string())
        );
        assert_eq!(rules.check(&text("1234567890")), None);
        assert!(rules.check(&text("123456789a")).is_some());
    }

    #[test]
    fn length_bounds_in_order() {
        let field = FieldDefinition::new("Bio", FieldType::Textarea)
            .required(true)
            .with_length(Some(3), Some(5));
        let rules = FieldRules::derive(&field);
        assert_eq!(
            rules.rules,
            vec![Rule::Required, Rule::MinLength(3), Rule::MaxLength(5)]
        );
        assert_eq!(
            rules.check(&text("ab")),
            Some("Bio must be at least 3 characters".to_string())
        );
        assert_eq!(
            rules.check(&text("abcdef")),
            Some("Bio must be at most 5 characters".to_string())
        );
        assert_eq!(rules.check(&text("héllo")), None);
    }

    #[test]
    fn required_checkbox_must_be_ticked() {
        let rules =
            FieldRules::derive(&FieldDefinition::new("Agree", FieldType::Checkbox).required(true));
        assert!(rules.check(&FieldValue::Bool(false)).is_some());
        assert!(rules.check(&FieldValue::Bool(true)).is_none());
    }

    #[test]
    fn file_size_and_type() {
        let field = FieldDefinition::new("Avatar", FieldType::File)
            .with_file_types(["image/*"])
            .with_max_size(1);
        let rules = FieldRules::derive(&field);
        let small_png = FileValue {
            name: "a.png".into(),
            path: PathBuf::from("a.png"),
            size: 512,
            mime: "image/png".into(),
        };
        assert_eq!(rules.check(&FieldValue::File(Some(small_png.clone()))), None);

        let big_png = FileValue {
            size: 4096,
            ..small_png.clone()
        };
        assert_eq!(
            rules.check(&FieldValue::File(Some(big_png))),
            Some("File size is too large".to_string())
        );

        let pdf = FileValue {
            name: "a.pdf".into(),
            mime: "application/pdf".into(),
            ..small_png
        };
        assert_eq!(
            rules.check(&FieldValue::File(Some(pdf))),
            Some("Unsupported Format".to_string())
        );
        assert_eq!(rules.check(&FieldValue::File(None)), None);
    }

    #[test]
    fn file_size_limit_is_inclusive_and_never_overflows() {
        let file = |size| {
            FieldValue::File(Some(FileValue {
                name: "cv.pdf".into(),
                path: PathBuf::from("cv.pdf"),
                size,
                mime: "application/pdf".into(),
            }))
        };
        let rules = FieldRules::derive(&FieldDefinition::new("CV", FieldType::File).with_max_size(2));
        assert_eq!(rules.check(&file(2048)), None);
        assert!(rules.check(&file(2049)).is_some());

        let huge = FieldRules::derive(
            &FieldDefinition::new("CV", FieldType::File).with_max_size(u64::MAX / 1024 + 1),
        );
        assert_eq!(huge.check(&file(10)), None);
        assert_eq!(huge.check(&file(u64::MAX)), None);
    }

    #[test]
    fn zero_length_bounds_are_ignored() {
        let field = FieldDefinition::new("Bio", FieldType::Textarea).with_length(Some(0), Some(0));
        let rules = FieldRules::derive(&field);
        assert!(rules.rules.is_empty());
        assert_eq!(rules.check(&text("anything")), None);
    }
}
