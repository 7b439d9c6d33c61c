//! Error types for fixture materialization.
//!
//! The split matters to callers:
//! - `Precondition` is caller misuse (cycles, duplicate names, dangling
//!   references) and is always raised before any filesystem write.
//! - `Filesystem` and `Template` are materialization failures, surfaced
//!   immediately and never retried.

use camino::Utf8PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FixtureError {
    /// The fixture spec itself is invalid.
    #[error("precondition violated: {message}")]
    Precondition {
        /// What was wrong with the spec.
        message: String,
    },

    /// A directory could not be created.
    #[error("filesystem error at {path}: {message}")]
    Filesystem {
        path: Utf8PathBuf,
        message: String,
    },

    /// A source file or generated build file could not be written.
    #[error("template error for {path}: {message}")]
    Template {
        path: Utf8PathBuf,
        message: String,
    },
}

impl FixtureError {
    pub(crate) fn precondition(message: impl Into<String>) -> Self {
        FixtureError::Precondition {
            message: message.into(),
        }
    }

    /// Returns true if this error was raised before any filesystem write.
    pub fn is_precondition(&self) -> bool {
        matches!(self, FixtureError::Precondition { .. })
    }
}

/// Result type alias using FixtureError.
pub type FixtureResult<T> = Result<T, FixtureError>;

#[cfg(test)]
mod tests {
    use super::FixtureError;

    #[test]
    fn precondition_display_includes_message() {
        let err = FixtureError::precondition("reference cycle: A -> B -> A");
        assert!(err.is_precondition());
        assert!(err.to_string().contains("precondition violated"));
        assert!(err.to_string().contains("A -> B -> A"));
    }

    #[test]
    fn filesystem_error_is_not_a_precondition() {
        let err = FixtureError::Filesystem {
            path: "fixtures/App".into(),
            message: "permission denied".to_string(),
        };
        assert!(!err.is_precondition());
        assert!(err.to_string().contains("fixtures/App"));
    }
}
