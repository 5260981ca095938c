// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Error types for the cmc application.
//!
//! A commit message that breaks the rules is not an error: rule failures are
//! reported as data in a `ValidationOutcome`. The types here cover everything
//! that stops a message from being checked at all.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for cmc operations.
#[derive(Error, Debug)]
pub enum CmcError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    // Git errors (commit retrieval)
    #[error("Git error: {0}")]
    Git(#[from] GitError),

    // CI environment errors
    #[error("CI error: {0}")]
    Ci(#[from] CiError),

    // Hook errors
    #[error("Hook error: {0}")]
    Hook(#[from] HookError),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Used by the CLI to turn invalid messages into a failing exit status
    #[error("{invalid} commit message(s) failed validation")]
    Validation { invalid: usize },

    // Generic error with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to parse configuration: {message}")]
    ParseError { message: String },

    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Git-related errors.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Not a git repository")]
    NotARepository,

    #[error("Failed to open repository: {message}")]
    OpenFailed { message: String },

    #[error("Invalid commit reference: {reference}")]
    InvalidReference { reference: String },

    #[error("Invalid commit range: {range}")]
    InvalidRange { range: String },

    #[error("Git command failed: {command} - {message}")]
    CommandFailed { command: String, message: String },
}

impl From<git2::Error> for GitError {
    fn from(err: git2::Error) -> Self {
        GitError::OpenFailed {
            message: err.message().to_string(),
        }
    }
}

/// CI environment errors.
#[derive(Error, Debug)]
pub enum CiError {
    #[error("No supported CI environment detected")]
    NotDetected,

    #[error("Missing CI environment variable: {name}")]
    MissingVariable { name: String },
}

/// Hook-related errors.
#[derive(Error, Debug)]
pub enum HookError {
    #[error("Failed to install hook '{hook}': {message}")]
    InstallFailed { hook: String, message: String },

    #[error("Hook already exists: {hook}")]
    AlreadyExists { hook: String },

    #[error("Hook not found: {hook}")]
    NotFound { hook: String },

    #[error("Failed to remove hook '{hook}': {message}")]
    RemoveFailed { hook: String, message: String },
}

/// Result type alias for cmc operations.
pub type Result<T> = std::result::Result<T, CmcError>;

/// Extension trait for adding context to errors.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E: std::error::Error + 'static> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| CmcError::WithContext {
            context: context.into(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::NotFound {
            path: PathBuf::from("/path/to/config"),
        };
        assert!(err.to_string().contains("/path/to/config"));
    }

    #[test]
    fn test_git_error_display() {
        let err = GitError::CommandFailed {
            command: "git log -1 --pretty=format:%B nope".to_string(),
            message: "unknown revision".to_string(),
        };
        assert!(err.to_string().contains("unknown revision"));
    }

    #[test]
    fn test_cmc_error_from_ci_error() {
        let ci_err = CiError::MissingVariable {
            name: "TRAVIS_COMMIT".to_string(),
        };
        let err: CmcError = ci_err.into();
        assert!(err.to_string().contains("TRAVIS_COMMIT"));
    }

    #[test]
    fn test_validation_error_display() {
        let err = CmcError::Validation { invalid: 3 };
        assert_eq!(err.to_string(), "3 commit message(s) failed validation");
    }

    #[test]
    fn test_result_ext_context() {
        let res: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        let err = res.context("reading message").unwrap_err();
        assert_eq!(err.to_string(), "reading message: missing");
    }

    #[test]
    fn test_git2_error_conversion() {
        let err: GitError = git2::Error::from_str("corrupt index").into();
        assert!(matches!(err, GitError::OpenFailed { ref message } if message == "corrupt index"));
    }
}
