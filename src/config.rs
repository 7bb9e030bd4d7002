use std::{path::PathBuf, time::Duration};

use git2::Config;
use tracing::debug;

/// Environment variable overriding the resolved configuration directory.
pub const DIR_OVERRIDE_ENV: &str = "CURA_SYNC_DIR";

/// cura-sync settings sourced from the global git config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    /// Pause after terminating Cura so the OS releases its file handles.
    pub grace_period: Duration,
    /// Process name used to look up the running Cura instance.
    pub process_name: String,
    /// Version sub-directory that must exist inside the configuration directory.
    pub version_dir: String,
    /// git executable.
    pub git_program: String,
    /// Explicit configuration directory, bypassing the per-platform template.
    pub dir_override: Option<PathBuf>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        let process_name = if cfg!(windows) {
            "UltiMaker-Cura.exe"
        } else {
            "UltiMaker-Cura"
        };
        Self {
            grace_period: Duration::from_millis(1000),
            process_name: process_name.to_string(),
            version_dir: "5.7".to_string(),
            git_program: "git".to_string(),
            dir_override: None,
        }
    }
}

impl SyncConfig {
    /// Load settings with precedence: environment → global git config → defaults.
    ///
    /// A missing or unreadable git config is not an error; defaults apply.
    #[must_use]
    pub fn load() -> Self {
        let mut out = match Config::open_default() {
            Ok(cfg) => Self::from_git_config(&cfg),
            Err(e) => {
                debug!("git config unavailable, using defaults: {e}");
                Self::default()
            }
        };

        if let Ok(dir) = std::env::var(DIR_OVERRIDE_ENV)
            && !dir.trim().is_empty()
        {
            out.dir_override = Some(PathBuf::from(dir));
        }

        out
    }

    /// Read `cura-sync.*` keys from an opened git config.
    #[must_use]
    pub fn from_git_config(cfg: &Config) -> Self {
        let mut out = Self::default();

        if let Ok(v) = cfg.get_i64("cura-sync.grace-ms")
            && let Ok(ms) = u64::try_from(v)
        {
            out.grace_period = Duration::from_millis(ms);
        }
        if let Ok(v) = cfg.get_string("cura-sync.process")
            && !v.trim().is_empty()
        {
            out.process_name = v.trim().to_string();
        }
        if let Ok(v) = cfg.get_string("cura-sync.version")
            && !v.trim().is_empty()
        {
            out.version_dir = v.trim().to_string();
        }
        if let Ok(v) = cfg.get_string("cura-sync.git")
            && !v.trim().is_empty()
        {
            out.git_program = v.trim().to_string();
        }

        out
    }
}
