//! # Pack & Report Persistence
//!
//! Packs and reports are written as indented JSON. Writes create missing
//! parent directories and overwrite existing files, so saving the same
//! value twice leaves identical bytes on disk.

use std::fs;
use std::path::Path;

use serde::Serialize;
use trace_core::PolicyPack;

use crate::error::StoreError;

/// Write `value` as indented JSON to `path`.
pub(crate) fn write_json_pretty<T: Serialize>(value: &T, path: &Path) -> Result<(), StoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| StoreError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let json = serde_json::to_string_pretty(value).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Save a pack, rules and metadata included.
pub fn save_policy_pack(pack: &PolicyPack, path: &Path) -> Result<(), StoreError> {
    write_json_pretty(pack, path)?;
    tracing::info!(path = %path.display(), rules = pack.rules.len(), "saved policy pack");
    Ok(())
}

/// Load a saved pack and check its invariants.
pub fn load_policy_pack(path: &Path) -> Result<PolicyPack, StoreError> {
    if !path.exists() {
        return Err(StoreError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let raw = fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let pack: PolicyPack = serde_json::from_str(&raw).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    pack.validate().map_err(|source| StoreError::Invalid {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), pack = %pack.name, "loaded policy pack");
    Ok(pack)
}
