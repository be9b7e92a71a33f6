//! Shared helpers for memepack CLI integration tests

use assert_cmd::{cargo::cargo_bin_cmd, Command};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Get a Command for memepack
pub fn memepack() -> Command {
    cargo_bin_cmd!("memepack")
}

/// Write a file, creating parent directories
pub fn write(root: &Path, rel: &str, bytes: &[u8]) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, bytes).unwrap();
}

/// Two small source repositories: `meme_emoji` and `meme-generator`
#[allow(dead_code)]
pub fn setup_sources() -> (TempDir, Vec<PathBuf>) {
    let dir = TempDir::new().unwrap();

    let emoji = dir.path().join("meme_emoji");
    write(&emoji, "emoji/sad-cat/images/cat_cry.png", b"cry");
    write(&emoji, "emoji/sad-cat/images/cat_smile.png", b"smile");
    write(&emoji, "emoji/sad-cat/LICENSE.txt", b"license");

    let main = dir.path().join("meme-generator");
    write(&main, "meme_generator/memes/petpet/images/cat.gif", b"pet");
    write(&main, "onefile.png", b"solo");

    (dir, vec![emoji, main])
}

/// Build a memepack command for the given sources writing to `<dir>/out`
#[allow(dead_code)]
pub fn aggregate_cmd(dir: &TempDir, sources: &[PathBuf]) -> Command {
    let mut cmd = memepack();
    for source in sources {
        cmd.arg("--src").arg(source);
    }
    cmd.arg("--out-dir").arg(dir.path().join("out"));
    cmd
}

/// Parse a JSON file under `<dir>/out`
#[allow(dead_code)]
pub fn read_out_json(dir: &TempDir, name: &str) -> serde_json::Value {
    let content = fs::read_to_string(dir.path().join("out").join(name)).unwrap();
    serde_json::from_str(&content).unwrap()
}
