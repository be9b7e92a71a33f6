//! Asset store: `<root>/<pack key>/<original filename>`
//!
//! Destinations are opened with `create_new`, so an existing file is never
//! overwritten and the existence check and the write are a single step.
//! Content of an existing destination is not compared with the source.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{MemepackError, Result};

/// What happened when placing one asset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Bytes were copied to a new destination file
    Copied,
    /// A file was already present; nothing was written
    Existing,
}

#[derive(Debug, Clone)]
pub struct AssetStore {
    root: PathBuf,
}

impl AssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        AssetStore { root: root.into() }
    }

    pub fn destination(&self, pack_key: &str, filename: &str) -> PathBuf {
        self.root.join(pack_key).join(filename)
    }

    /// Copy `src` to `<pack_key>/<filename>` unless that path already exists
    pub fn place(&self, pack_key: &str, filename: &str, src: &Path) -> Result<Placement> {
        let dst = self.destination(pack_key, filename);
        if let Some(parent) = dst.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| MemepackError::io_at("create directory", parent, e))?;
        }

        let mut reader = File::open(src).map_err(|e| MemepackError::io_at("open", src, e))?;

        let mut writer = match OpenOptions::new().write(true).create_new(true).open(&dst) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                tracing::trace!(dst = %dst.display(), "asset_exists");
                return Ok(Placement::Existing);
            }
            Err(e) => return Err(MemepackError::io_at("create", &dst, e)),
        };

        if let Err(e) = io::copy(&mut reader, &mut writer) {
            drop(writer);
            // Remove the partial destination
            let _ = fs::remove_file(&dst);
            return Err(MemepackError::io_at("copy", src, e));
        }

        tracing::trace!(src = %src.display(), dst = %dst.display(), "asset_copied");
        Ok(Placement::Copied)
    }
}
