//! Content digests for asset identity

use std::fs::File;
use std::io::Read;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::{MemepackError, Result};

/// Read buffer size used while hashing
pub const CHUNK_SIZE: usize = 8192;

/// Hash a byte stream in fixed-size chunks and return lowercase hex SHA-256
pub fn digest_reader<R: Read>(mut reader: R) -> std::io::Result<String> {
    let mut hasher = Sha256::new();
    let mut buf = [0u8; CHUNK_SIZE];
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// Hash the contents of a file
pub fn digest_file(path: &Path) -> Result<String> {
    let file = File::open(path).map_err(|e| MemepackError::io_at("open", path, e))?;
    digest_reader(file).map_err(|e| MemepackError::io_at("hash", path, e))
}
