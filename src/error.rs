use thiserror::Error;

/// Expected, user-facing failures. Anything else reaching `main` is fatal.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("missing remote URL")]
    MissingUrl,
    #[error("invalid remote URL: {0}")]
    InvalidUrl(String),
    #[error("aborted: {0}")]
    Declined(String),
    #[error("nothing to push: the working copy matches the last commit")]
    NothingToPush,
    #[error("{0} is not a git repository; run `cura-sync init <url>` or `cura-sync clone <url>` first")]
    NotInitialized(String),
    #[error("unrecognized command: {0}")]
    UnrecognizedCommand(String),
    #[error("`{command}` exited with {}", exit_label(.code))]
    ExternalCommand { command: String, code: Option<i32> },
}

fn exit_label(code: &Option<i32>) -> String {
    code.map_or_else(|| "a signal".to_string(), |c| format!("status {c}"))
}

impl SyncError {
    /// Process exit code reported for this error.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::ExternalCommand { code: Some(code), .. } => {
                u8::try_from(*code).ok().filter(|c| *c != 0).unwrap_or(1)
            }
            _ => 1,
        }
    }

    pub(crate) fn declined(what: impl Into<String>) -> Self {
        Self::Declined(what.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn external_command_propagates_exit_code() {
        let err = SyncError::ExternalCommand {
            command: "git pull".into(),
            code: Some(128),
        };
        assert_eq!(err.exit_code(), 128);
        assert!(err.to_string().contains("status 128"));
    }

    #[test]
    fn out_of_range_codes_fall_back_to_one() {
        let err = SyncError::ExternalCommand {
            command: "git push".into(),
            code: Some(-1),
        };
        assert_eq!(err.exit_code(), 1);

        let killed = SyncError::ExternalCommand {
            command: "git push".into(),
            code: None,
        };
        assert_eq!(killed.exit_code(), 1);
        assert!(killed.to_string().contains("a signal"));
    }

    #[test]
    fn usage_errors_exit_one() {
        assert_eq!(SyncError::NothingToPush.exit_code(), 1);
        assert_eq!(SyncError::MissingUrl.exit_code(), 1);
        assert_eq!(SyncError::declined("clone").exit_code(), 1);
    }
}
