//! Optional `info.json` pack manifests
//!
//! Only the `keywords` array is read; other fields are ignored.

use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;

pub const MANIFEST_FILE: &str = "info.json";

#[derive(Debug, Default, Deserialize)]
struct PackManifest {
    #[serde(default)]
    keywords: Vec<String>,
}

/// Keywords declared by the manifest in `pack_dir`, trimmed and lower-cased.
///
/// A missing manifest yields nothing; an unreadable or malformed one is
/// logged and ignored.
pub fn manifest_keywords(pack_dir: &Path) -> Vec<String> {
    let path = pack_dir.join(MANIFEST_FILE);
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Vec::new(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "manifest_unreadable");
            return Vec::new();
        }
    };

    match serde_json::from_str::<PackManifest>(&content) {
        Ok(manifest) => manifest
            .keywords
            .iter()
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "manifest_invalid");
            Vec::new()
        }
    }
}
