pub mod remote;
pub mod repo;

pub use remote::RemoteUrl;
pub use repo::{
    IGNORE_PATTERNS, backup_and_clear, backup_path, is_repository, metadata_dir, remove_metadata,
    timestamp_millis, write_ignore_file,
};

/// Prefix for every commit message this tool creates.
pub const COMMIT_TAG: &str = "[cura-sync]";

/// Branch `init` publishes to.
pub const MAIN_BRANCH: &str = "main";

/// Tag `message` for a commit.
#[must_use]
pub fn tagged_message(message: &str) -> String {
    format!("{COMMIT_TAG} {message}")
}
