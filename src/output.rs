//! Artifact writers. Each artifact is fully serialized in memory before the
//! file is touched, so a failed run leaves no partial file behind.

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use crate::error::{PipelineError, Result};
use crate::lua::to_lua_module;

fn write_text(path: &Path, contents: &str) -> Result<()> {
    let write_err = |source| PipelineError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(path, contents).map_err(write_err)
}

/// Pretty JSON with two-space indentation.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let serialized = serde_json::to_string_pretty(value)?;
    write_text(path, &serialized)?;
    tracing::info!(path = %path.display(), "wrote JSON artifact");
    Ok(())
}

/// Lua data module (`local p = ... return p`) for `value`.
pub fn write_lua_module(path: &Path, value: &Value) -> Result<()> {
    write_text(path, &to_lua_module(value))?;
    tracing::info!(path = %path.display(), "wrote Lua module");
    Ok(())
}
