//! Error types for header normalization.
//!
//! Every variant is scoped to a single file: the caller records it and moves
//! on to the next path. Messages leave the path out; the caller adds it as
//! context.

use thiserror::Error;

/// Failure while normalizing one file's header.
#[derive(Error, Debug)]
pub enum HeaderError {
    #[error("missing header comment")]
    MissingHeader,

    #[error("could not run `{command}`")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {status}: {stderr}")]
    Command {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("`{command}` produced unexpected output: {detail}")]
    UnexpectedOutput { command: String, detail: String },

    #[error("failed to read file")]
    Read(#[source] std::io::Error),

    #[error("failed to write file")]
    Write(#[source] std::io::Error),
}

/// Coarse classification of a [`HeaderError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MissingHeader,
    ExternalCommand,
    FileIo,
}

impl HeaderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            HeaderError::MissingHeader => ErrorKind::MissingHeader,
            HeaderError::Spawn { .. }
            | HeaderError::Command { .. }
            | HeaderError::UnexpectedOutput { .. } => ErrorKind::ExternalCommand,
            HeaderError::Read(_) | HeaderError::Write(_) => ErrorKind::FileIo,
        }
    }
}
