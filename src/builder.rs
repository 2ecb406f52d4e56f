use crate::schema::{DraftError, FieldDraft, FieldType, FormConfig};

/// A single edit to the draft.
#[derive(Clone, Debug, PartialEq)]
pub enum DraftField {
    Label(String),
    Type(FieldType),
    Required(bool),
    MaxSize(String),
    MinLength(String),
    MaxLength(String),
}

/// Builder state: the draft being edited plus the last rejection reason.
///
/// The published field list lives in [`FormConfig`], owned by the app. Only
/// `add_field` and `remove_field` touch it.
#[derive(Debug, Default)]
pub struct FormBuilder {
    pub draft: FieldDraft,
    pub last_error: Option<DraftError>,
}

impl FormBuilder {
    /// Validate the draft and append it. On success the draft resets to its
    /// defaults; on failure neither the draft nor `config` change.
    pub fn add_field(&mut self, config: &mut FormConfig) -> Result<(), DraftError> {
        match self.draft.build(config) {
            Ok(field) => {
                tracing::info!(label = %field.label, kind = %field.field_type, "field added");
                config.push(field);
                self.draft = FieldDraft::default();
                self.last_error = None;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(%err, "draft rejected");
                self.last_error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Remove the field at `index`. Returns `false` (and changes nothing)
    /// when the index is out of range.
    pub fn remove_field(&mut self, config: &mut FormConfig, index: usize) -> bool {
        match config.remove(index) {
            Some(field) => {
                tracing::info!(label = %field.label, index, "field removed");
                true
            }
            None => false,
        }
    }

    pub fn update_draft_field(&mut self, change: DraftField) {
        let draft = &mut self.draft;
        match change {
            DraftField::Label(v) => draft.label = v,
            DraftField::Type(t) => draft.field_type = t,
            DraftField::Required(r) => draft.required = r,
            DraftField::MaxSize(v) => draft.max_size = v,
            DraftField::MinLength(v) => draft.min_length = v,
            DraftField::MaxLength(v) => draft.max_length = v,
        }
        self.last_error = None;
    }

    pub fn add_option(&mut self) {
        self.draft.options.push(String::new());
    }

    pub fn update_option(&mut self, index: usize, value: String) {
        if let Some(slot) = self.draft.options.get_mut(index) {
            *slot = value;
        }
    }

    pub fn remove_option(&mut self, index: usize) {
        if index < self.draft.options.len() {
            self.draft.options.remove(index);
        }
    }

    pub fn add_file_type(&mut self) {
        self.draft.file_types.push(String::new());
    }

    pub fn update_file_type(&mut self, index: usize, value: String) {
        if let Some(slot) = self.draft.file_types.get_mut(index) {
            *slot = value;
        }
    }

    pub fn remove_file_type(&mut self, index: usize) {
        if index < self.draft.file_types.len() {
            self.draft.file_types.remove(index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn add(builder: &mut FormBuilder, config: &mut FormConfig, label: &str) {
        builder.update_draft_field(DraftField::Label(label.to_string()));
        builder.add_field(config).unwrap();
    }

    fn labels(config: &FormConfig) -> Vec<String> {
        config.iter().map(|f| f.label.clone()).collect()
    }

    #[test]
    fn add_resets_draft() {
        let mut builder = FormBuilder::default();
        let mut config = FormConfig::default();
        builder.update_draft_field(DraftField::Label("Email".into()));
        builder.update_draft_field(DraftField::Type(FieldType::Email));
        builder.update_draft_field(DraftField::Required(true));
        builder.add_field(&mut config).unwrap();

        assert_eq!(builder.draft, FieldDraft::default());
        assert_eq!(config.len(), 1);
        assert_eq!(config.fields()[0].field_type, FieldType::Email);
        assert!(config.fields()[0].required);
    }

    #[test]
    fn rejected_draft_is_kept() {
        let mut builder = FormBuilder::default();
        let mut config = FormConfig::default();
        builder.update_draft_field(DraftField::Type(FieldType::Dropdown));
        builder.update_draft_field(DraftField::Label("Pick".into()));
        assert_eq!(
            builder.add_field(&mut config),
            Err(DraftError::MissingOptions(FieldType::Dropdown))
        );
        assert!(config.is_empty());
        assert_eq!(builder.draft.label, "Pick");
        assert!(builder.last_error.is_some());

        builder.add_option();
        builder.update_option(0, "One".into());
        builder.update_option(5, "ignored".into());
        builder.add_field(&mut config).unwrap();
        assert_eq!(config.fields()[0].options, vec!["One"]);
    }

    #[test]
    fn option_and_file_type_editing() {
        let mut builder = FormBuilder::default();
        builder.add_option();
        builder.add_option();
        builder.update_option(1, "B".into());
        builder.remove_option(0);
        builder.remove_option(9);
        assert_eq!(builder.draft.options, vec!["B"]);

        builder.add_file_type();
        builder.update_file_type(0, "image/png".into());
        assert_eq!(builder.draft.file_types, vec!["image/png"]);
        builder.remove_file_type(0);
        assert!(builder.draft.file_types.is_empty());
    }

    #[test]
    fn remove_keeps_relative_order() {
        let mut builder = FormBuilder::default();
        let mut config = FormConfig::default();
        for l in ["A", "B", "C", "D"] {
            add(&mut builder, &mut config, l);
        }
        assert!(builder.remove_field(&mut config, 1));
        assert!(!builder.remove_field(&mut config, 10));
        assert_eq!(labels(&config), vec!["A", "C", "D"]);
    }

    proptest! {
        #[test]
        fn length_tracks_adds_minus_removes(
            adds in 0usize..20,
            removals in proptest::collection::vec(0usize..25, 0..20),
        ) {
            let mut builder = FormBuilder::default();
            let mut config = FormConfig::default();
            let mut model: Vec<String> = Vec::new();
            for i in 0..adds {
                let label = format!("field-{i}");
                add(&mut builder, &mut config, &label);
                model.push(label);
            }
            for idx in removals {
                let removed = builder.remove_field(&mut config, idx);
                prop_assert_eq!(removed, idx < model.len());
                if idx < model.len() {
                    model.remove(idx);
                }
            }
            prop_assert_eq!(labels(&config), model);
        }
    }
}
