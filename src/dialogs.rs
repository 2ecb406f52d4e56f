//! Native file dialogs. Pickers that feed async state run on their own
//! thread and report back over the channels held in `AppState`; the UI
//! thread drains them once per frame.

use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::thread;

use crate::app_state::{ImportResult, PickedFile};
use crate::config_io;
use crate::form::FileValue;

pub fn spawn_import(tx: Sender<ImportResult>) {
    thread::spawn(move || {
        let picked = rfd::FileDialog::new()
            .set_title("Load form configuration")
            .add_filter("JSON", &["json"])
            .pick_file();
        if let Some(path) = picked {
            let result = config_io::import_from_path(&path);
            let _ = tx.send(ImportResult { path, result });
        }
    });
}

/// Ask for a file for the field `label`. `extensions` narrows the dialog
/// filter when the field restricts types by extension.
pub fn spawn_file_pick(
    tx: Sender<PickedFile>,
    label: String,
    version: u64,
    extensions: Vec<String>,
    preview_max_px: u32,
) {
    thread::spawn(move || {
        let mut dialog = rfd::FileDialog::new().set_title(format!("Choose file for {label}"));
        if !extensions.is_empty() {
            dialog = dialog.add_filter("Allowed files", extensions.as_slice());
        }
        let Some(path) = dialog.pick_file() else {
            return;
        };
        let result = FileValue::from_path(path).map_err(|e| format!("{e:#}"));
        let preview = match &result {
            Ok(file) if file.is_image() => {
                crate::preview::color_image_from_path(&file.path, preview_max_px)
            }
            _ => None,
        };
        let _ = tx.send(PickedFile {
            label,
            version,
            result,
            preview,
        });
    });
}

/// Blocking save dialog, as for other one-shot saves in the UI.
pub fn pick_export_path(default_name: &str) -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Save form configuration")
        .add_filter("JSON", &["json"])
        .set_file_name(default_name)
        .save_file()
}

/// Extensions usable as a dialog filter: `.pdf` patterns plus the known
/// extensions of exact MIME patterns. Wildcards disable filtering.
pub fn filter_extensions(file_types: &[String]) -> Vec<String> {
    let mut out = Vec::new();
    for pattern in file_types {
        let pattern = pattern.trim().to_ascii_lowercase();
        if pattern.contains('*') {
            return Vec::new();
        }
        if let Some(ext) = pattern.strip_prefix('.') {
            out.push(ext.to_string());
            continue;
        }
        let known = crate::form::file::extensions_for(&pattern);
        if known.is_empty() {
            return Vec::new();
        }
        out.extend(known.into_iter().map(str::to_string));
    }
    out.dedup();
    out
}
