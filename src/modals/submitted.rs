use crate::app_state::AppState;
use eframe::egui;

/// Default submit handler output: the submitted values as JSON.
pub fn show(ctx: &egui::Context, state: &mut AppState) {
    let Some(json) = state.submitted.clone() else {
        return;
    };
    let mut open = true;
    let mut close_clicked = false;
    egui::Window::new("Submitted Values")
        .open(&mut open)
        .collapsible(false)
        .default_width(360.0)
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .max_height(360.0)
                .show(ui, |ui| {
                    ui.label(egui::RichText::new(&json).monospace());
                });
            ui.add_space(12.0);
            ui.vertical_centered(|ui| {
                if ui.button("OK").clicked() {
                    close_clicked = true;
                }
            });
        });
    if !open || close_clicked {
        state.submitted = None;
    }
}
