//! Persisted artifacts: `infos.json` and `keyMap.json`

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::catalog::Corpus;
use crate::error::{MemepackError, Result};

pub const ASSETS_DIR: &str = "assets";
pub const INFOS_FILE: &str = "infos.json";
pub const KEY_MAP_FILE: &str = "keyMap.json";

/// Paths written by [`write_corpus`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub infos: PathBuf,
    pub key_map: PathBuf,
}

/// Write pretty JSON, creating missing parent directories
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| MemepackError::io_at("create directory", parent, e))?;
    }
    let content = serde_json::to_string_pretty(value)?;
    fs::write(path, content).map_err(|e| MemepackError::io_at("write", path, e))?;
    Ok(())
}

/// Write the catalog and keyword index under `out_dir`
pub fn write_corpus(out_dir: &Path, corpus: &Corpus) -> Result<OutputPaths> {
    let paths = OutputPaths {
        infos: out_dir.join(INFOS_FILE),
        key_map: out_dir.join(KEY_MAP_FILE),
    };
    write_json(&paths.infos, &corpus.catalog)?;
    write_json(&paths.key_map, &corpus.keywords)?;
    tracing::debug!(
        infos = %paths.infos.display(),
        key_map = %paths.key_map.display(),
        "outputs_written"
    );
    Ok(paths)
}
