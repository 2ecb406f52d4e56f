use std::collections::HashSet;

use indexmap::IndexMap;

use super::derive;
use super::rules::FieldRules;
use super::values::{FieldValue, FormValues};
use crate::schema::{FieldDefinition, FormConfig};

/// Display state of a single field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldState {
    Untouched,
    Valid,
    Invalid,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SubmitOutcome {
    /// The handler ran with these values.
    Submitted(FormValues),
    /// Validation failed; label → message for each failing field.
    Blocked(IndexMap<String, String>),
}

/// Live state of the rendered form, derived from one config version.
///
/// A new session is built whenever the config changes; nothing carries over
/// from the previous one.
#[derive(Debug, Clone, Default)]
pub struct FormSession {
    version: u64,
    fields: Vec<FieldDefinition>,
    schema: Vec<FieldRules>,
    initial: FormValues,
    values: FormValues,
    touched: HashSet<String>,
    errors: IndexMap<String, String>,
}

impl FormSession {
    pub fn new(config: &FormConfig, version: u64) -> Self {
        let initial = derive::initial_values(config);
        let mut session = Self {
            version,
            fields: config.fields().to_vec(),
            schema: derive::validation_schema(config),
            values: initial.clone(),
            initial,
            touched: HashSet::new(),
            errors: IndexMap::new(),
        };
        session.revalidate();
        tracing::debug!(version, fields = session.fields.len(), "derived form session");
        session
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn value(&self, label: &str) -> Option<&FieldValue> {
        self.values.get(label)
    }

    /// Fields whose condition holds against the current values.
    pub fn visible_fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields
            .iter()
            .filter(|f| derive::is_visible(f, &self.values))
    }

    /// Store a new value, mark the field touched and re-run validation.
    pub fn set_value(&mut self, label: &str, value: FieldValue) {
        self.values.set(label.to_string(), value);
        self.touched.insert(label.to_string());
        self.revalidate();
    }

    /// Mark a field touched without changing it (focus left the control).
    pub fn blur(&mut self, label: &str) {
        if self.touched.insert(label.to_string()) {
            self.revalidate();
        }
    }

    pub fn is_touched(&self, label: &str) -> bool {
        self.touched.contains(label)
    }

    /// The error to display next to `label`, only once it has been touched.
    pub fn visible_error(&self, label: &str) -> Option<&str> {
        if self.is_touched(label) {
            self.errors.get(label).map(String::as_str)
        } else {
            None
        }
    }

    pub fn field_state(&self, label: &str) -> FieldState {
        if !self.is_touched(label) {
            FieldState::Untouched
        } else if self.errors.contains_key(label) {
            FieldState::Invalid
        } else {
            FieldState::Valid
        }
    }

    pub fn errors(&self) -> &IndexMap<String, String> {
        &self.errors
    }

    /// Validate everything. On success `handler` receives the values; on
    /// failure it is not called and every visible field becomes touched so
    /// its error shows.
    pub fn submit<F>(&mut self, handler: F) -> SubmitOutcome
    where
        F: FnOnce(&FormValues),
    {
        let labels: Vec<String> = self.visible_fields().map(|f| f.label.clone()).collect();
        self.touched.extend(labels);
        self.revalidate();

        if self.errors.is_empty() {
            tracing::info!(fields = self.values.len(), "form submitted");
            handler(&self.values);
            SubmitOutcome::Submitted(self.values.clone())
        } else {
            tracing::info!(errors = self.errors.len(), "submit blocked by validation");
            SubmitOutcome::Blocked(self.errors.clone())
        }
    }

    pub fn reset(&mut self) {
        self.values = self.initial.clone();
        self.touched.clear();
        self.revalidate();
    }

    fn revalidate(&mut self) {
        self.errors = derive::validate(&self.fields, &self.schema, &self.values);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Condition, FieldType};
    use pretty_assertions::assert_eq;

    fn name_bio() -> FormConfig {
        FormConfig::from(vec![
            FieldDefinition::new("Name", FieldType::Text).required(true),
            FieldDefinition::new("Bio", FieldType::Textarea),
        ])
    }

    #[test]
    fn required_empty_blocks_submit() {
        let mut session = FormSession::new(&name_bio(), 1);
        let mut called = false;
        let outcome = session.submit(|_| called = true);
        assert!(!called);
        match outcome {
            SubmitOutcome::Blocked(errors) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors.get("Name").map(String::as_str), Some("Name is required"));
            }
            other => panic!("expected blocked, got {other:?}"),
        }
        assert_eq!(session.visible_error("Name"), Some("Name is required"));
        assert_eq!(session.field_state("Bio"), FieldState::Valid);
    }

    #[test]
    fn valid_submit_passes_values() {
        let mut session = FormSession::new(&name_bio(), 1);
        session.set_value("Name", FieldValue::Text("Alice".into()));
        let mut received = None;
        let outcome = session.submit(|v| received = Some(v.clone()));
        let expected = FormValues::new()
            .with("Name", FieldValue::Text("Alice".into()))
            .with("Bio", FieldValue::Text(String::new()));
        assert_eq!(received, Some(expected.clone()));
        assert_eq!(outcome, SubmitOutcome::Submitted(expected));
    }

    #[test]
    fn errors_hidden_until_touched() {
        let config = FormConfig::from(vec![FieldDefinition::new("Mail", FieldType::Email)]);
        let mut session = FormSession::new(&config, 1);
        assert_eq!(session.field_state("Mail"), FieldState::Untouched);

        session.set_value("Mail", FieldValue::Text("not-an-email".into()));
        assert_eq!(session.field_state("Mail"), FieldState::Invalid);
        assert_eq!(session.visible_error("Mail"), Some("Invalid email address"));

        session.set_value("Mail", FieldValue::Text("a@b.com".into()));
        assert_eq!(session.field_state("Mail"), FieldState::Valid);
        assert_eq!(session.visible_error("Mail"), None);
    }

    #[test]
    fn blur_marks_touched() {
        let mut session = FormSession::new(&name_bio(), 1);
        assert_eq!(session.visible_error("Name"), None);
        session.blur("Name");
        assert_eq!(session.visible_error("Name"), Some("Name is required"));
    }

    #[test]
    fn conditional_field_appears_with_its_trigger() {
        let config = FormConfig::from(vec![
            FieldDefinition::new("Qualification", FieldType::Dropdown)
                .with_options(["School", "Graduate"]),
            FieldDefinition::new("University", FieldType::Text)
                .required(true)
                .with_condition(Condition::equals("Qualification", "Graduate")),
        ]);
        let mut session = FormSession::new(&config, 1);
        let visible: Vec<_> = session.visible_fields().map(|f| f.label.as_str()).collect();
        assert_eq!(visible, vec!["Qualification"]);
        assert!(matches!(session.submit(|_| {}), SubmitOutcome::Submitted(_)));

        session.set_value("Qualification", FieldValue::Text("Graduate".into()));
        assert_eq!(session.visible_fields().count(), 2);
        assert!(matches!(session.submit(|_| {}), SubmitOutcome::Blocked(_)));
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut session = FormSession::new(&name_bio(), 4);
        session.set_value("Bio", FieldValue::Text("hi".into()));
        session.reset();
        assert_eq!(session.value("Bio"), Some(&FieldValue::Text(String::new())));
        assert!(!session.is_touched("Bio"));
        assert_eq!(session.version(), 4);
    }
}
