mod app_state;
mod builder;
mod builder_panel;
mod config_io;
mod dialogs;
mod form;
mod form_panel;
mod modals;
mod preview;
mod schema;
mod settings;
mod ui;

use anyhow::{anyhow, Result};
use eframe::egui;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::settings::Settings;

fn main() -> Result<()> {
    let settings_path = Settings::default_path();
    let settings = Settings::load(&settings_path);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let fallback = settings
            .as_ref()
            .map(|s| s.log_filter.clone())
            .unwrap_or_else(|_| "info".to_string());
        tracing_subscriber::EnvFilter::new(fallback)
    });
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = settings.unwrap_or_else(|err| {
        tracing::warn!("{err:#}; using default settings");
        Settings::default()
    });
    tracing::info!(path = %settings_path.display(), "starting form generator");

    let title = settings.window_title.clone();
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(title.clone())
            .with_inner_size([1100.0, 720.0]),
        ..Default::default()
    };
    eframe::run_native(
        &title,
        native_options,
        Box::new(move |_cc| Box::new(ui::create_app(settings, settings_path))),
    )
    .map_err(|e| anyhow!("window closed with error: {e}"))
}
