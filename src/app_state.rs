use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};

use crate::builder::FormBuilder;
use crate::config_io::{self, ImportError};
use crate::form::{FieldValue, FileValue, FormSession, SubmitOutcome};
use crate::schema::FormConfig;
use crate::settings::Settings;

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum ToastType {
    Info,
    Success,
    Error,
}

/// Result of a background file pick for a file field.
pub struct PickedFile {
    pub label: String,
    /// Config version the pick was started under; stale picks are dropped.
    pub version: u64,
    pub result: Result<FileValue, String>,
    pub preview: Option<egui::ColorImage>,
}

/// Result of a background import.
pub struct ImportResult {
    pub path: PathBuf,
    pub result: Result<FormConfig, ImportError>,
}

/// Preview of the file chosen for one file field.
pub struct FilePreview {
    pub file_name: String,
    pub texture: Option<egui::TextureHandle>,
}

pub struct AppState {
    pub settings: Settings,
    pub settings_path: PathBuf,
    pub show_settings: bool,

    /// Single source of truth shared by the builder and the renderer.
    pub config: FormConfig,
    /// Bumped on every publish, import or form reset. File picks started
    /// under an older value are dropped.
    pub config_version: u64,

    pub builder: FormBuilder,
    pub session: FormSession,
    /// Keyed by field label.
    pub previews: HashMap<String, FilePreview>,
    /// Pretty JSON of the last successful submit, shown in a window.
    pub submitted: Option<String>,

    pub file_pick_tx: Sender<PickedFile>,
    pub file_pick_rx: Receiver<PickedFile>,
    pub import_tx: Sender<ImportResult>,
    pub import_rx: Receiver<ImportResult>,

    pub toast_message: Option<String>,
    pub toast_type: ToastType,
    pub toast_deadline: f64,
    /// Latest frame time, used to place toast deadlines outside of UI code.
    pub now: f64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_settings(Settings::default(), Settings::default_path())
    }
}

impl AppState {
    pub fn with_settings(settings: Settings, settings_path: PathBuf) -> Self {
        let (file_pick_tx, file_pick_rx) = channel();
        let (import_tx, import_rx) = channel();
        let config = FormConfig::default();
        Self {
            settings,
            settings_path,
            show_settings: false,
            session: FormSession::new(&config, 0),
            config,
            config_version: 0,
            builder: FormBuilder::default(),
            previews: HashMap::new(),
            submitted: None,
            file_pick_tx,
            file_pick_rx,
            import_tx,
            import_rx,
            toast_message: None,
            toast_type: ToastType::Info,
            toast_deadline: 0.0,
            now: 0.0,
        }
    }

    /// Re-derive the renderer after the config changed.
    pub fn publish(&mut self) {
        self.config_version += 1;
        self.session = FormSession::new(&self.config, self.config_version);
        self.previews.clear();
        tracing::debug!(version = self.config_version, "config published");
    }

    /// Clear the live form. Picks still open in a dialog land on nothing.
    pub fn reset_form(&mut self) {
        self.config_version += 1;
        self.session.reset();
        self.previews.clear();
        tracing::debug!(version = self.config_version, "form reset");
    }

    pub fn add_field(&mut self) {
        if self.builder.add_field(&mut self.config).is_ok() {
            self.publish();
        }
    }

    pub fn remove_field(&mut self, index: usize) {
        if self.builder.remove_field(&mut self.config, index) {
            self.publish();
        }
    }

    /// Swap in an imported config, or keep the current one and report why not.
    pub fn apply_import(&mut self, import: ImportResult) {
        match import.result {
            Ok(config) => {
                let count = config.len();
                self.config = config;
                self.publish();
                self.toast(
                    ToastType::Success,
                    format!("Loaded {count} fields from {}", file_name(&import.path)),
                );
            }
            Err(err) => {
                tracing::warn!(path = %import.path.display(), %err, "import rejected");
                self.toast(ToastType::Error, format!("Import failed: {err}"));
            }
        }
    }

    pub fn apply_file_pick(&mut self, pick: PickedFile) -> Option<egui::ColorImage> {
        if pick.version != self.config_version {
            tracing::debug!(label = %pick.label, "dropping file pick for an old config");
            return None;
        }
        match pick.result {
            Ok(file) => {
                self.previews.insert(
                    pick.label.clone(),
                    FilePreview {
                        file_name: file.name.clone(),
                        texture: None,
                    },
                );
                self.session
                    .set_value(&pick.label, FieldValue::File(Some(file)));
                pick.preview
            }
            Err(err) => {
                self.toast(ToastType::Error, err);
                None
            }
        }
    }

    pub fn export_to(&mut self, path: PathBuf) {
        match config_io::export_to_path(&self.config, &path) {
            Ok(()) => self.toast(ToastType::Success, format!("Saved {}", file_name(&path))),
            Err(err) => {
                tracing::error!("{err:#}");
                self.toast(ToastType::Error, format!("Save failed: {err}"));
            }
        }
    }

    /// Submit with the default handler: show the values back to the user.
    pub fn submit_form(&mut self) {
        let show = self.settings.show_submitted_values;
        let mut shown = None;
        let outcome = self.session.submit(|values| {
            if show {
                shown = Some(
                    values
                        .to_pretty_json()
                        .unwrap_or_else(|e| format!("<could not render values: {e}>")),
                );
            }
        });
        match outcome {
            SubmitOutcome::Submitted(_) => {
                self.submitted = shown;
                self.toast(ToastType::Success, "Form submitted".to_string());
            }
            SubmitOutcome::Blocked(errors) => {
                self.toast(
                    ToastType::Error,
                    format!("{} field(s) need attention", errors.len()),
                );
            }
        }
    }

    pub fn toast(&mut self, kind: ToastType, message: String) {
        self.toast_message = Some(message);
        self.toast_type = kind;
        self.toast_deadline = self.now + 3.0;
    }
}

fn file_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
