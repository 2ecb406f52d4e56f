//! File-field helpers: reading picked files and matching them against the
//! `fileTypes` patterns of a field.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::values::FileValue;

const MIME_TABLE: &[(&str, &str)] = &[
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("bmp", "image/bmp"),
    ("svg", "image/svg+xml"),
    ("pdf", "application/pdf"),
    ("json", "application/json"),
    ("txt", "text/plain"),
    ("csv", "text/csv"),
    ("html", "text/html"),
    ("zip", "application/zip"),
    ("doc", "application/msword"),
    (
        "docx",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ),
    ("mp3", "audio/mpeg"),
    ("mp4", "video/mp4"),
];

/// Guess a MIME type from the file extension. Unknown extensions give an
/// empty string.
pub fn guess_mime(path: &Path) -> String {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    MIME_TABLE
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, m)| m.to_string())
        .unwrap_or_default()
}

/// Extensions the table maps to `mime`, in table order.
pub fn extensions_for(mime: &str) -> Vec<&'static str> {
    MIME_TABLE
        .iter()
        .filter(|(_, m)| *m == mime)
        .map(|(e, _)| *e)
        .collect()
}

impl FileValue {
    /// Stat `path` and build the value stored for a file field.
    pub fn from_path(path: PathBuf) -> Result<Self> {
        let meta = std::fs::metadata(&path)
            .with_context(|| format!("failed to read metadata for {}", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Ok(Self {
            name,
            mime: guess_mime(&path),
            size: meta.len(),
            path,
        })
    }
}

/// Whether `file` satisfies one accept pattern. Patterns are MIME types
/// (`image/png`), wildcards (`image/*`, `*/*`) or extensions (`.pdf`).
pub fn matches_pattern(file: &FileValue, pattern: &str) -> bool {
    let pattern = pattern.trim().to_ascii_lowercase();
    if pattern.is_empty() {
        return false;
    }
    if let Some(ext) = pattern.strip_prefix('.') {
        return file.name.to_ascii_lowercase().ends_with(&format!(".{ext}"));
    }
    if pattern == "*" || pattern == "*/*" {
        return true;
    }
    let mime = file.mime.to_ascii_lowercase();
    match pattern.strip_suffix("/*") {
        Some(major) => mime.split('/').next() == Some(major),
        None => mime == pattern,
    }
}
