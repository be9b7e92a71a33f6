//! Run configuration for memepack
//!
//! The built-in extension allow-list, pruned directory names and repo
//! aliases can be extended from an optional TOML file passed with `--config`.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MemepackError, Result};

/// Image extensions accepted as assets
pub const IMAGE_EXTENSIONS: &[&str] = &[
    ".png", ".jpg", ".jpeg", ".gif", ".webp", ".svg", ".bmp", ".tiff", ".tif",
];

/// Video extensions accepted as assets
pub const VIDEO_EXTENSIONS: &[&str] = &[".mp4", ".webm", ".mov"];

/// Directory names never descended into
pub const SKIP_DIRS: &[&str] = &[
    ".git",
    "node_modules",
    "dist",
    "build",
    ".next",
    "__pycache__",
];

/// Root directory names with a well-known short label
pub const BUILTIN_REPO_ALIASES: &[(&str, &str)] = &[
    ("meme_emoji", "emoji"),
    ("meme-generator-contrib", "contrib"),
    ("meme-generator", "main"),
];

/// User-supplied additions to the built-in tables
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregateConfig {
    /// Extra asset extensions (with or without the leading dot)
    pub extra_extensions: Vec<String>,
    /// Extra directory names to prune during the walk
    pub extra_skip_dirs: Vec<String>,
    /// Root directory name -> repo label; wins over the built-in aliases
    pub repo_aliases: BTreeMap<String, String>,
}

impl AggregateConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| MemepackError::InvalidConfig {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let config: AggregateConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| MemepackError::Other(format!("failed to serialize config: {}", e)))?;
        fs::write(path, content).map_err(|e| MemepackError::io_at("write", path, e))?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        for ext in &self.extra_extensions {
            if ext.trim().trim_start_matches('.').is_empty() {
                return Err(MemepackError::invalid_value("extension", format!("{ext:?}")));
            }
        }
        for (name, label) in &self.repo_aliases {
            if label.trim().is_empty() {
                return Err(MemepackError::invalid_value(
                    "repo alias",
                    format!("{name} -> {label:?}"),
                ));
            }
        }
        Ok(())
    }

    /// The full extension allow-list: built-ins plus normalized extras
    pub fn allowed_extensions(&self) -> BTreeSet<String> {
        IMAGE_EXTENSIONS
            .iter()
            .chain(VIDEO_EXTENSIONS)
            .map(|e| e.to_string())
            .chain(self.extra_extensions.iter().map(|e| normalize_extension(e)))
            .collect()
    }

    /// The full set of pruned directory names
    pub fn skip_dirs(&self) -> BTreeSet<String> {
        SKIP_DIRS
            .iter()
            .map(|d| d.to_string())
            .chain(self.extra_skip_dirs.iter().cloned())
            .collect()
    }

    /// Map a root directory name to its repo label
    pub fn repo_label(&self, dir_name: &str) -> String {
        if let Some(label) = self.repo_aliases.get(dir_name) {
            return label.clone();
        }
        BUILTIN_REPO_ALIASES
            .iter()
            .find(|(name, _)| *name == dir_name)
            .map(|(_, label)| label.to_string())
            .unwrap_or_else(|| dir_name.to_string())
    }
}

/// Lower-case an extension and make sure it carries a leading dot
pub fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim().to_lowercase();
    if ext.starts_with('.') {
        ext
    } else {
        format!(".{ext}")
    }
}
