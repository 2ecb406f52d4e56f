use std::path::PathBuf;

use crate::app_state::{AppState, ToastType};
use crate::settings::Settings;
use crate::{builder_panel, dialogs, form_panel, modals};
use eframe::egui;

pub struct FormGenApp {
    state: AppState,
}

pub fn create_app(settings: Settings, settings_path: PathBuf) -> FormGenApp {
    FormGenApp {
        state: AppState::with_settings(settings, settings_path),
    }
}

impl eframe::App for FormGenApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let state = &mut self.state;
        state.now = ctx.input(|i| i.time);

        poll_background(ctx, state);

        // 1. Top bar: save / load / settings
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Dynamic Form Generator");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .add(egui::Button::new("⚙").frame(false))
                        .on_hover_text("Settings")
                        .clicked()
                    {
                        state.show_settings = !state.show_settings;
                    }
                    if ui.button("📂 Load Configuration").clicked() {
                        dialogs::spawn_import(state.import_tx.clone());
                    }
                    let save = ui.add_enabled(
                        !state.config.is_empty(),
                        egui::Button::new("💾 Save Configuration"),
                    );
                    if save.clicked() {
                        if let Some(path) = dialogs::pick_export_path(&state.settings.export_file_name)
                        {
                            state.export_to(path);
                        }
                    }
                });
            });
        });

        // 2. Builder (left)
        egui::SidePanel::left("builder_panel")
            .resizable(true)
            .default_width(320.0)
            .min_width(260.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .id_source("builder_scroll")
                    .show(ui, |ui| builder_panel::show(ui, state));
            });

        // 3. Live form (center)
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .id_source("form_scroll")
                .show(ui, |ui| form_panel::show(ui, state));
        });

        if state.show_settings {
            modals::settings::show(ctx, state);
        }
        if state.submitted.is_some() {
            modals::submitted::show(ctx, state);
        }

        show_toast(ctx, state);
    }
}

/// Drain finished background work (imports and file picks).
fn poll_background(ctx: &egui::Context, state: &mut AppState) {
    while let Ok(import) = state.import_rx.try_recv() {
        state.apply_import(import);
    }

    while let Ok(pick) = state.file_pick_rx.try_recv() {
        let label = pick.label.clone();
        if let Some(image) = state.apply_file_pick(pick) {
            let texture = ctx.load_texture(
                format!("preview::{label}"),
                image,
                egui::TextureOptions::default(),
            );
            if let Some(slot) = state.previews.get_mut(&label) {
                slot.texture = Some(texture);
            }
        }
    }
}

fn show_toast(ctx: &egui::Context, state: &mut AppState) {
    let Some(msg) = state.toast_message.clone() else {
        return;
    };
    if state.now > state.toast_deadline {
        state.toast_message = None;
        return;
    }
    // Keep repainting so the toast disappears on time without input.
    ctx.request_repaint();

    let bg_color = match state.toast_type {
        ToastType::Error => egui::Color32::from_rgb(200, 50, 50),
        ToastType::Success => egui::Color32::from_rgb(50, 150, 50),
        ToastType::Info => egui::Color32::from_gray(80),
    };

    egui::Area::new("toast_notification")
        .order(egui::Order::Tooltip)
        .anchor(egui::Align2::CENTER_BOTTOM, egui::vec2(0.0, -40.0))
        .show(ctx, |ui| {
            egui::Frame::none()
                .fill(bg_color)
                .rounding(8.0)
                .stroke(egui::Stroke::new(1.0, egui::Color32::from_white_alpha(50)))
                .inner_margin(12.0)
                .shadow(egui::epaint::Shadow::small_dark())
                .show(ui, |ui| {
                    ui.label(egui::RichText::new(msg).color(egui::Color32::WHITE).size(15.0));
                });
        });
}
