use crate::app_state::{AppState, ToastType};
use eframe::egui;

pub fn show(ctx: &egui::Context, state: &mut AppState) {
    let mut open = state.show_settings;
    egui::Window::new("Settings")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .default_width(420.0)
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .show(ctx, |ui| {
            render_body(ui, state);
            ui.add_space(16.0);
            render_footer(ui, state);
        });
    // The footer may already have closed the window.
    state.show_settings = state.show_settings && open;
}

fn render_body(ui: &mut egui::Ui, state: &mut AppState) {
    let settings = &mut state.settings;
    egui::Grid::new("settings_grid")
        .num_columns(2)
        .spacing([40.0, 12.0])
        .striped(false)
        .show(ui, |ui| {
            ui.label(
                egui::RichText::new("Files")
                    .strong()
                    .color(egui::Color32::from_gray(200)),
            );
            ui.end_row();

            ui.label("Export file name");
            ui.text_edit_singleline(&mut settings.export_file_name);
            ui.end_row();

            ui.label(
                egui::RichText::new("Form preview")
                    .strong()
                    .color(egui::Color32::from_gray(200)),
            );
            ui.end_row();

            ui.label("Image preview size");
            ui.add(
                egui::DragValue::new(&mut settings.preview_max_px)
                    .clamp_range(32.0..=512.0)
                    .speed(1.0)
                    .suffix(" px"),
            );
            ui.end_row();

            ui.label("Show submitted values");
            ui.checkbox(&mut settings.show_submitted_values, "");
            ui.end_row();

            ui.label(
                egui::RichText::new("Diagnostics")
                    .strong()
                    .color(egui::Color32::from_gray(200)),
            );
            ui.end_row();

            ui.label("Log filter (next start)");
            ui.text_edit_singleline(&mut settings.log_filter);
            ui.end_row();
        });
}

fn render_footer(ui: &mut egui::Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        if ui.button("Close").clicked() {
            state.show_settings = false;
        }
        if ui.button("Reload").on_hover_text("Discard edits and re-read the settings file").clicked() {
            state.settings = crate::settings::Settings::load_or_default(&state.settings_path);
        }
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("💾 Save Settings").clicked() {
                match state.settings.save(&state.settings_path) {
                    Ok(()) => {
                        tracing::info!(path = %state.settings_path.display(), "settings saved");
                        state.toast(ToastType::Success, "Settings saved".to_string());
                    }
                    Err(err) => {
                        tracing::error!("{err:#}");
                        state.toast(ToastType::Error, format!("Could not save settings: {err}"));
                    }
                }
            }
        });
    });
}
