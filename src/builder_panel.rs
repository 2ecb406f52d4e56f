use crate::app_state::AppState;
use crate::builder::DraftField;
use crate::schema::{Condition, FieldType};
use eframe::egui;

pub fn show(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("Form Builder");
    ui.add_space(8.0);

    render_draft(ui, state);

    ui.add_space(16.0);
    ui.separator();
    render_field_list(ui, state);
}

fn render_draft(ui: &mut egui::Ui, state: &mut AppState) {
    let draft = state.builder.draft.clone();

    let mut label = draft.label.clone();
    let resp = ui.add(
        egui::TextEdit::singleline(&mut label)
            .hint_text("Field Label")
            .desired_width(f32::INFINITY),
    );
    if resp.changed() {
        state.builder.update_draft_field(DraftField::Label(label));
    }
    ui.add_space(6.0);

    let mut field_type = draft.field_type;
    egui::ComboBox::from_id_source("draft_type")
        .selected_text(field_type.display_name())
        .width(ui.available_width())
        .show_ui(ui, |ui| {
            for t in FieldType::ALL {
                ui.selectable_value(&mut field_type, t, t.display_name());
            }
        });
    if field_type != draft.field_type {
        state.builder.update_draft_field(DraftField::Type(field_type));
    }
    ui.add_space(6.0);

    if field_type.has_options() {
        render_options(ui, state);
    }
    if field_type == FieldType::File {
        render_file_constraints(ui, state);
    }
    if field_type.is_textual() {
        render_length_bounds(ui, state);
    }

    let mut required = draft.required;
    if ui.checkbox(&mut required, "Required").changed() {
        state.builder.update_draft_field(DraftField::Required(required));
    }
    ui.add_space(8.0);

    let add_btn = egui::Button::new(egui::RichText::new("Add Field").strong())
        .min_size(egui::vec2(ui.available_width(), 28.0))
        .fill(egui::Color32::from_rgb(0, 120, 215));
    if ui.add(add_btn).clicked() {
        state.add_field();
    }

    if let Some(err) = &state.builder.last_error {
        ui.label(
            egui::RichText::new(err.to_string())
                .size(12.0)
                .color(egui::Color32::from_rgb(255, 100, 100)),
        );
    }
}

fn render_options(ui: &mut egui::Ui, state: &mut AppState) {
    let options = state.builder.draft.options.clone();
    let mut remove = None;
    for (i, option) in options.iter().enumerate() {
        ui.horizontal(|ui| {
            let mut text = option.clone();
            let resp = ui.add(
                egui::TextEdit::singleline(&mut text)
                    .hint_text(format!("Option {}", i + 1))
                    .desired_width(ui.available_width() - 28.0),
            );
            if resp.changed() {
                state.builder.update_option(i, text);
            }
            if ui.add(egui::Button::new("✖").frame(false)).clicked() {
                remove = Some(i);
            }
        });
    }
    if let Some(i) = remove {
        state.builder.remove_option(i);
    }
    if ui.button("➕ Add Option").clicked() {
        state.builder.add_option();
    }
    ui.add_space(6.0);
}

fn render_file_constraints(ui: &mut egui::Ui, state: &mut AppState) {
    let file_types = state.builder.draft.file_types.clone();
    let mut remove = None;
    for (i, file_type) in file_types.iter().enumerate() {
        ui.horizontal(|ui| {
            let mut text = file_type.clone();
            let resp = ui.add(
                egui::TextEdit::singleline(&mut text)
                    .hint_text(format!("File Type {} (e.g., image/png)", i + 1))
                    .desired_width(ui.available_width() - 28.0),
            );
            if resp.changed() {
                state.builder.update_file_type(i, text);
            }
            if ui.add(egui::Button::new("✖").frame(false)).clicked() {
                remove = Some(i);
            }
        });
    }
    if let Some(i) = remove {
        state.builder.remove_file_type(i);
    }
    if ui.button("➕ Add File Type").clicked() {
        state.builder.add_file_type();
    }

    ui.add_space(6.0);
    ui.label("File Size (KB)");
    let mut max_size = state.builder.draft.max_size.clone();
    let resp = ui.add(
        egui::TextEdit::singleline(&mut max_size)
            .hint_text("Max File Size (KB)")
            .desired_width(f32::INFINITY),
    );
    if resp.changed() {
        state.builder.update_draft_field(DraftField::MaxSize(max_size));
    }
    ui.add_space(6.0);
}

fn render_length_bounds(ui: &mut egui::Ui, state: &mut AppState) {
    let mut min = state.builder.draft.min_length.clone();
    let mut max = state.builder.draft.max_length.clone();
    ui.horizontal(|ui| {
        let half = (ui.available_width() - 8.0) / 2.0;
        if ui
            .add(egui::TextEdit::singleline(&mut min).hint_text("Min length").desired_width(half))
            .changed()
        {
            state.builder.update_draft_field(DraftField::MinLength(min.clone()));
        }
        if ui
            .add(egui::TextEdit::singleline(&mut max).hint_text("Max length").desired_width(half))
            .changed()
        {
            state.builder.update_draft_field(DraftField::MaxLength(max.clone()));
        }
    });
    ui.add_space(6.0);
}

fn render_field_list(ui: &mut egui::Ui, state: &mut AppState) {
    ui.label(egui::RichText::new("Current Fields").strong().size(16.0));
    ui.add_space(4.0);

    if state.config.is_empty() {
        ui.label(egui::RichText::new("No fields yet").weak());
        return;
    }

    let mut remove = None;
    for (index, field) in state.config.iter().enumerate() {
        ui.horizontal(|ui| {
            ui.label(format!("• {} ({})", field.label, field.field_type));
            if field.required {
                ui.label(egui::RichText::new("(Required)").color(egui::Color32::from_rgb(220, 80, 80)));
            }
            if let Some(condition) = &field.condition {
                ui.label(egui::RichText::new("(Conditional)").weak())
                    .on_hover_text(conditional_hint(condition));
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.small_button("Remove").clicked() {
                    remove = Some(index);
                }
            });
        });
    }
    if let Some(index) = remove {
        state.remove_field(index);
    }
}

/// Hover text for the "(Conditional)" tag: which fields drive visibility.
fn conditional_hint(condition: &Condition) -> String {
    let fields = condition.referenced_fields();
    if fields.is_empty() {
        "Shown conditionally".to_string()
    } else {
        format!("Shown depending on {}", fields.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conditional_hint_names_driving_fields() {
        let cond = Condition::All {
            all: vec![
                Condition::equals("Qualification", "Graduate"),
                Condition::is_true("Government Servant").negate(),
                Condition::is_true("Qualification"),
            ],
        };
        assert_eq!(
            conditional_hint(&cond),
            "Shown depending on Qualification, Government Servant"
        );
        assert_eq!(conditional_hint(&Condition::Any { any: vec![] }), "Shown conditionally");
    }
}
