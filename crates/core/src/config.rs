//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the services. Request
//! handling never reads process-wide environment variables.

use crate::constants::{DEFAULT_ADDR, MODEL_FILENAME};
use crate::error::{ModelError, ModelResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    model_path: PathBuf,
    addr: String,
}

impl CoreConfig {
    pub fn new(model_path: PathBuf, addr: String) -> Self {
        Self { model_path, addr }
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    /// Address the form server listens on.
    pub fn addr(&self) -> &str {
        &self.addr
    }
}

/// Pick the listening address from an optional raw value.
///
/// `None` or blank falls back to [`DEFAULT_ADDR`].
pub fn addr_from_env_value(value: Option<String>) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_ADDR.into())
}

/// Locate the serialized pipeline without reading environment variables.
///
/// If `override_path` is provided it must be an existing file. Otherwise this looks for
/// `best_model.json` in the current working directory and then walks up from
/// `CARGO_MANIFEST_DIR`.
pub fn resolve_model_path(override_path: Option<PathBuf>) -> ModelResult<PathBuf> {
    if let Some(path) = override_path {
        if path.is_file() {
            return Ok(path);
        }
        return Err(ModelError::NotFound(path));
    }

    let cwd_relative = PathBuf::from(MODEL_FILENAME);
    if cwd_relative.is_file() {
        return Ok(cwd_relative);
    }

    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    for ancestor in manifest_dir.ancestors() {
        let candidate = ancestor.join(MODEL_FILENAME);
        if candidate.is_file() {
            return Ok(candidate);
        }
    }

    Err(ModelError::NotFound(cwd_relative))
}
