use crate::app_state::AppState;
use crate::dialogs;
use crate::form::{FieldValue, FileValue};
use crate::schema::{FieldDefinition, FieldType};
use eframe::egui;

const ERROR_COLOR: egui::Color32 = egui::Color32::from_rgb(255, 100, 100);

pub fn show(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("Form Preview");
    ui.add_space(8.0);

    if state.config.is_empty() {
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label("Your form will display here...");
            ui.label(
                egui::RichText::new("Add fields in the builder or load a saved configuration.")
                    .weak(),
            );
        });
        return;
    }

    let fields: Vec<FieldDefinition> = state.session.visible_fields().cloned().collect();
    for (idx, field) in fields.iter().enumerate() {
        ui.push_id(("form_field", idx), |ui| {
            render_field(ui, state, field);
        });
        ui.add_space(10.0);
    }

    ui.add_space(6.0);
    ui.horizontal(|ui| {
        let submit = egui::Button::new(egui::RichText::new("Submit").strong())
            .min_size(egui::vec2(110.0, 30.0))
            .fill(egui::Color32::from_rgb(50, 150, 50));
        if ui.add(submit).clicked() {
            state.submit_form();
        }
        if ui.button("Reset").clicked() {
            state.reset_form();
        }
    });
}

fn render_field(ui: &mut egui::Ui, state: &mut AppState, field: &FieldDefinition) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(&field.label).strong());
        if field.required {
            ui.label(egui::RichText::new("*").color(ERROR_COLOR));
        }
    });

    let label = field.label.as_str();
    let current = state
        .session
        .value(label)
        .cloned()
        .unwrap_or_else(|| crate::form::derive::initial_value(field));

    match field.field_type {
        FieldType::Text | FieldType::Email | FieldType::Phone => {
            let mut text = current.as_text().into_owned();
            let resp = ui.add(egui::TextEdit::singleline(&mut text).desired_width(f32::INFINITY));
            commit_text(state, label, text, &resp);
        }
        FieldType::Textarea => {
            let mut text = current.as_text().into_owned();
            let resp = ui.add(
                egui::TextEdit::multiline(&mut text)
                    .desired_rows(3)
                    .desired_width(f32::INFINITY),
            );
            commit_text(state, label, text, &resp);
        }
        FieldType::Dropdown => {
            let selected = current.as_text().into_owned();
            let shown = if selected.is_empty() { "—" } else { selected.as_str() };
            let mut picked = None;
            egui::ComboBox::from_id_source(("dropdown", label))
                .selected_text(shown)
                .width(ui.available_width().min(320.0))
                .show_ui(ui, |ui| {
                    for option in &field.options {
                        if ui.selectable_label(*option == selected, option).clicked() {
                            picked = Some(option.clone());
                        }
                    }
                });
            if let Some(option) = picked {
                state.session.set_value(label, FieldValue::Text(option));
            }
        }
        FieldType::Checkbox => {
            let mut checked = current.as_bool();
            if ui.checkbox(&mut checked, "").changed() {
                state.session.set_value(label, FieldValue::Bool(checked));
            }
        }
        FieldType::Radio => {
            let selected = current.as_text().into_owned();
            for option in &field.options {
                if ui.radio(*option == selected, option).clicked() {
                    state.session.set_value(label, FieldValue::Text(option.clone()));
                }
            }
        }
        FieldType::File => render_file_input(ui, state, field, &current),
    }

    if let Some(err) = state.session.visible_error(label) {
        ui.label(egui::RichText::new(err).size(12.0).color(ERROR_COLOR));
    }
}

fn commit_text(state: &mut AppState, label: &str, text: String, resp: &egui::Response) {
    if resp.changed() {
        state.session.set_value(label, FieldValue::Text(text));
    } else if resp.lost_focus() {
        state.session.blur(label);
    }
}

fn render_file_input(
    ui: &mut egui::Ui,
    state: &mut AppState,
    field: &FieldDefinition,
    current: &FieldValue,
) {
    ui.horizontal(|ui| {
        if ui.button("📎 Choose file…").clicked() {
            dialogs::spawn_file_pick(
                state.file_pick_tx.clone(),
                field.label.clone(),
                state.config_version,
                dialogs::filter_extensions(&field.file_types),
                state.settings.preview_max_px as u32,
            );
        }
        match current {
            FieldValue::File(Some(file)) => {
                ui.label(describe_file(file));
            }
            _ => {
                ui.label(egui::RichText::new("No file chosen").weak());
            }
        }
    });

    if !field.file_types.is_empty() || field.max_size.is_some() {
        let mut hint = Vec::new();
        if !field.file_types.is_empty() {
            hint.push(format!("Accepts {}", field.file_types.join(", ")));
        }
        if let Some(kb) = field.max_size {
            hint.push(format!("max {kb} KB"));
        }
        ui.label(egui::RichText::new(hint.join(" · ")).size(11.0).weak());
    }

    if let Some(preview) = state.previews.get(&field.label) {
        if let Some(texture) = &preview.texture {
            let max = state.settings.preview_max_px;
            ui.add(egui::Image::new(texture).max_size(egui::vec2(max, max)))
                .on_hover_text(&preview.file_name);
        }
    }
}

fn describe_file(file: &FileValue) -> String {
    if file.mime.is_empty() {
        format!("{} ({:.1} KB)", file.name, file.size_kb())
    } else {
        format!("{} ({:.1} KB, {})", file.name, file.size_kb(), file.mime)
    }
}
