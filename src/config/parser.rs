use crate::errors::{Error, Result};
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::info;

/// Reads and parses a task override document
///
/// YAML is used for `.yaml`/`.yml` files, JSON for everything else.
///
/// # Arguments
///
/// * `file_path` - Path to the override document
///
/// # Returns
///
/// * `Result<Option<Value>>` - `None` if the file does not exist, the parsed document otherwise
///
/// # Errors
///
/// Returns `Error::Parse` if the file exists but cannot be read or is not well-formed
pub fn load_task_document(file_path: &Path) -> Result<Option<Value>> {
    let content = match fs::read_to_string(file_path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(Error::Parse {
                path: file_path.to_path_buf(),
                message: e.to_string(),
            })
        }
    };

    let is_yaml = matches!(
        file_path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    );

    let parsed: std::result::Result<Value, String> = if is_yaml {
        serde_yaml::from_str(&content).map_err(|e| e.to_string())
    } else {
        serde_json::from_str(&content).map_err(|e| e.to_string())
    };

    let document = parsed.map_err(|message| Error::Parse {
        path: file_path.to_path_buf(),
        message,
    })?;
    info!("Loaded task overrides from {}", file_path.display());
    Ok(Some(document))
}
