use std::{fmt, path::PathBuf};

use anyhow::{Result, bail};

/// Operating systems Cura publishes a configuration layout for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Platform {
    Linux,
    MacOs,
    Windows,
}

impl Platform {
    /// The platform this binary runs on.
    ///
    /// # Errors
    /// Returns an error on operating systems without a known Cura layout.
    pub fn current() -> Result<Self> {
        Self::from_os(std::env::consts::OS)
    }

    /// Map an OS identifier as reported by `std::env::consts::OS`.
    ///
    /// # Errors
    /// Returns an error for unsupported identifiers.
    pub fn from_os(os: &str) -> Result<Self> {
        match os {
            "linux" => Ok(Self::Linux),
            "macos" => Ok(Self::MacOs),
            "windows" => Ok(Self::Windows),
            other => bail!("unsupported platform: {other}"),
        }
    }

    /// Cura's configuration directory for `user`.
    #[must_use]
    pub fn config_dir(self, user: &str) -> PathBuf {
        let path = match self {
            Self::Linux => format!("/home/{user}/.local/share/cura"),
            Self::MacOs => format!("/Users/{user}/Library/Application Support/cura"),
            Self::Windows => format!(r"C:\Users\{user}\AppData\Roaming\cura"),
        };
        PathBuf::from(path)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Linux => "linux",
            Self::MacOs => "macos",
            Self::Windows => "windows",
        })
    }
}
