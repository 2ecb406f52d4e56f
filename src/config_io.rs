//! Export and import of the form config as `form-config.json`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use thiserror::Error;

use crate::schema::FormConfig;

pub const DEFAULT_FILE_NAME: &str = "form-config.json";

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON at line {line}, column {column}: {message}")]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },
    #[error("expected a JSON array of fields, found {0}")]
    NotAnArray(&'static str),
    #[error("field {index} is malformed: {source}")]
    Field {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
}

pub fn to_json(config: &FormConfig) -> Result<String> {
    serde_json::to_string_pretty(config).context("failed to serialize form config")
}

/// Parse a config. The previous config is never touched here; callers swap
/// it in only on `Ok`.
pub fn from_json(text: &str) -> Result<FormConfig, ImportError> {
    let raw: serde_json::Value = serde_json::from_str(text).map_err(|e| ImportError::Parse {
        line: e.line(),
        column: e.column(),
        message: e.to_string(),
    })?;

    let items = match raw {
        serde_json::Value::Array(items) => items,
        other => return Err(ImportError::NotAnArray(json_kind(&other))),
    };

    let mut fields = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let field = serde_json::from_value(item).map_err(|source| ImportError::Field { index, source })?;
        fields.push(field);
    }
    Ok(FormConfig::new(fields))
}

pub fn export_to_path(config: &FormConfig, path: &Path) -> Result<()> {
    let json = to_json(config)?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), fields = config.len(), "form config exported");
    Ok(())
}

pub fn import_from_path(path: &Path) -> Result<FormConfig, ImportError> {
    let text = fs::read_to_string(path).map_err(|source| ImportError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let config = from_json(&text)?;
    tracing::info!(path = %path.display(), fields = config.len(), "form config imported");
    Ok(config)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
