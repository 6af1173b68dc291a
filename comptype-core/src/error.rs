//! Error types for comptype operations.
//!
//! Detection failures are not errors (they classify as
//! [`Format::Undefined`](crate::format::Format::Undefined)); everything that
//! stops a conversion ends up here.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The main error type for comptype operations.
#[derive(Debug, Error)]
pub enum ComptypeError {
    /// I/O error while removing or inspecting a file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// An external tool failed to launch or exited with a nonzero status.
    ///
    /// The message is the tool's combined stdout/stderr, unmodified.
    #[error("{output}")]
    CommandFailed {
        /// Captured output of the failed command.
        output: String,
    },

    /// A zip archive holds a member count other than exactly one.
    #[error("{}", member_count_message(.archive, .count))]
    UnsupportedMemberCount {
        /// The archive that was inspected.
        archive: PathBuf,
        /// Number of members found.
        count: usize,
    },

    /// Archive member name that would land outside the archive's directory.
    #[error("Path traversal detected in entry: {path}")]
    PathTraversal {
        /// The suspicious member name.
        path: String,
    },

    /// A path that cannot be handed to an external tool.
    #[error("Invalid path: {path}")]
    InvalidPath {
        /// The offending path, lossily rendered.
        path: String,
    },
}

fn member_count_message(archive: &Path, count: &usize) -> String {
    if *count == 0 {
        format!(
            "No file in the ZIP archive {}. This is not supported",
            archive.display()
        )
    } else {
        format!(
            "More than one file in the ZIP archive {} ({count} members). This is not supported",
            archive.display()
        )
    }
}

/// Result type alias for comptype operations.
pub type Result<T> = std::result::Result<T, ComptypeError>;

impl ComptypeError {
    /// Create a command failure error from captured tool output.
    pub fn command_failed(output: impl Into<String>) -> Self {
        Self::CommandFailed {
            output: output.into(),
        }
    }

    /// Create an unsupported member count error.
    pub fn unsupported_member_count(archive: impl Into<PathBuf>, count: usize) -> Self {
        Self::UnsupportedMemberCount {
            archive: archive.into(),
            count,
        }
    }

    /// Create a path traversal error.
    pub fn path_traversal(path: impl Into<String>) -> Self {
        Self::PathTraversal { path: path.into() }
    }

    /// Create an invalid path error.
    pub fn invalid_path(path: impl Into<String>) -> Self {
        Self::InvalidPath { path: path.into() }
    }
}
