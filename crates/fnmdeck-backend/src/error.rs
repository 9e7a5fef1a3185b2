use thiserror::Error;

/// Failure modes of the external command interface.
///
/// Bridge errors never cross the store boundary as values: stores coerce
/// them to their `Display` string into the shared error slot.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    #[error("fnm executable not found")]
    NotFound,

    #[error("Command failed: {stderr}")]
    CommandFailed { stderr: String },

    #[error("IO error ({kind}): {message}")]
    Io {
        kind: std::io::ErrorKind,
        message: String,
    },

    #[error("fnm data directory could not be resolved")]
    DataDirNotFound,
}

impl BridgeError {
    #[must_use]
    pub fn command_failed(stderr: impl Into<String>) -> Self {
        Self::CommandFailed {
            stderr: stderr.into(),
        }
    }
}

impl From<std::io::Error> for BridgeError {
    fn from(err: std::io::Error) -> Self {
        BridgeError::Io {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}
