// Shared helpers for driving the cura-sync binary against a throwaway directory.

use std::{fs, path::{Path, PathBuf}};

use assert_cmd::{Command, cargo::cargo_bin};
use tempfile::TempDir;

/// A temp root containing `cura/5.7/cura.cfg`.
pub fn fresh_cura_dir() -> (TempDir, PathBuf) {
    let td = TempDir::new().unwrap();
    let dir = td.path().join("cura");
    fs::create_dir_all(dir.join("5.7")).unwrap();
    fs::write(dir.join("5.7").join("cura.cfg"), "[general]\nversion = 7\n").unwrap();
    (td, dir)
}

/// The binary pointed at `dir`, isolated from the user's git config.
pub fn cura_sync(dir: &Path, home: &Path) -> Command {
    let mut cmd = Command::new(cargo_bin!("cura-sync"));
    cmd.env("CURA_SYNC_DIR", dir)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .env_remove("RUST_LOG");
    cmd
}
