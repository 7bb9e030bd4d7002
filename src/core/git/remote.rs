use std::{fmt, str::FromStr};

use url::Url;

use crate::error::SyncError;

/// A validated remote repository location.
///
/// Accepts hierarchical URLs (`https://`, `ssh://`, `file://`, ...) and the
/// scp-like `user@host:path` form git understands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoteUrl(String);

impl RemoteUrl {
    /// Validate an optional command-line argument.
    ///
    /// # Errors
    /// [`SyncError::MissingUrl`] when absent, [`SyncError::InvalidUrl`] when malformed.
    pub fn from_arg(arg: Option<&str>) -> Result<Self, SyncError> {
        match arg.map(str::trim) {
            None | Some("") => Err(SyncError::MissingUrl),
            Some(raw) => raw.parse(),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for RemoteUrl {
    type Err = SyncError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw.is_empty() || raw.chars().any(char::is_whitespace) {
            return Err(SyncError::InvalidUrl(raw.to_string()));
        }
        match Url::parse(raw) {
            Ok(url) if !url.cannot_be_a_base() && (url.has_host() || url.scheme() == "file") => {
                Ok(Self(raw.to_string()))
            }
            Ok(_) => Err(SyncError::InvalidUrl(raw.to_string())),
            Err(_) if is_scp_like(raw) => Ok(Self(raw.to_string())),
            Err(_) => Err(SyncError::InvalidUrl(raw.to_string())),
        }
    }
}

impl fmt::Display for RemoteUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_scp_like(raw: &str) -> bool {
    let Some((user_host, path)) = raw.split_once(':') else {
        return false;
    };
    let Some((user, host)) = user_host.split_once('@') else {
        return false;
    };
    !user.is_empty() && !host.is_empty() && !host.contains('/') && !path.is_empty()
}
