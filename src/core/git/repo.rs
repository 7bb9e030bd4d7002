use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use git2::Repository;
use time::OffsetDateTime;

/// Patterns written to `.gitignore` after `init`.
pub const IGNORE_PATTERNS: &[&str] = &[
    ".DS_Store",
    "**/.DS_Store",
    "cache/",
    "cura.log",
    "cura.log.*",
];

/// Whether `dir` itself is a git working copy. Parent directories are not searched.
#[must_use]
pub fn is_repository(dir: &Path) -> bool {
    Repository::open(dir).is_ok_and(|repo| !repo.is_bare())
}

/// Return the `.git` metadata directory under `dir`.
#[must_use]
pub fn metadata_dir(dir: &Path) -> PathBuf {
    dir.join(".git")
}

/// Remove any existing git metadata from `dir`.
///
/// # Errors
/// Returns an error if the metadata exists but cannot be removed.
pub fn remove_metadata(dir: &Path) -> Result<()> {
    let meta = metadata_dir(dir);
    if meta.is_dir() {
        fs::remove_dir_all(&meta)
            .with_context(|| format!("failed to remove {}", meta.display()))?;
    } else if meta.exists() {
        // worktrees and submodules use a `.git` file
        fs::remove_file(&meta).with_context(|| format!("failed to remove {}", meta.display()))?;
    }
    Ok(())
}

/// Write the fixed `.gitignore`, replacing any existing one.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn write_ignore_file(dir: &Path) -> Result<PathBuf> {
    let path = dir.join(".gitignore");
    let mut contents = IGNORE_PATTERNS.join("\n");
    contents.push('\n');
    fs::write(&path, contents).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

/// Milliseconds since the Unix epoch.
#[must_use]
pub fn timestamp_millis() -> i128 {
    OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000
}

/// Sibling path used to back up `dir` at `millis`.
///
/// # Errors
/// Returns an error if `dir` has no parent.
pub fn backup_path(dir: &Path, millis: i128) -> Result<PathBuf> {
    let parent = dir
        .parent()
        .with_context(|| format!("{} has no parent directory", dir.display()))?;
    Ok(parent.join(format!("cura_backup_{millis}")))
}

/// Move `dir` aside with a single rename and recreate it empty.
///
/// Returns the backup location. If recreating fails the backup is left in place.
///
/// # Errors
/// Returns an error if the rename or the re-creation fails.
pub fn backup_and_clear(dir: &Path, millis: i128) -> Result<PathBuf> {
    let backup = backup_path(dir, millis)?;
    fs::rename(dir, &backup).with_context(|| {
        format!("failed to move {} to {}", dir.display(), backup.display())
    })?;
    fs::create_dir(dir).with_context(|| {
        format!(
            "failed to recreate {} (previous contents are in {})",
            dir.display(),
            backup.display()
        )
    })?;
    Ok(backup)
}
