// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! cmc - Commit Message Checker
//!
//! Validates commit messages against the `[T#PROJ-123][TYPE] Summary`
//! convention: a ticket-tagged, typed summary line followed by a blank line.
//!
//! # Features
//!
//! - **Validator**: Runs the built-in rules and reports every failure code
//! - **Special Commits**: Merge and revert commits bypass the rules
//! - **Commit Sources**: Read commits through libgit2 or the git executable
//! - **Git Hooks**: A `commit-msg` hook that reports or blocks
//! - **CI Support**: Checks the commits of Travis CI and AppVeyor builds
//!
//! # Example
//!
//! ```
//! use cmc::rules::{FailureCode, Validator};
//!
//! let outcome = Validator::global().validate("[F#PROJ-1][FEATURE] Add login");
//! assert!(outcome.is_valid());
//!
//! let outcome = cmc::validate("Add login");
//! assert!(outcome.has_failure(FailureCode::InvalidSummaryFormat));
//! ```

// Module declarations
pub mod ci;
pub mod cli;
pub mod commit;
pub mod config;
pub mod error;
pub mod git;
pub mod hooks;
pub mod report;
pub mod rules;

// Re-exports for convenience
pub use config::{CmcConfig, CommitType};
pub use error::{CmcError, Result};
pub use rules::{validate, validate_batch, FailureCode, ValidationOutcome, Validator};

/// Version information embedded at compile time.
pub mod version {
    /// The current version of cmc.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    /// The git SHA at compile time (if available).
    pub const GIT_SHA: Option<&str> = option_env!("VERGEN_GIT_SHA");

    /// The git commit date at compile time (if available).
    pub const GIT_COMMIT_DATE: Option<&str> = option_env!("VERGEN_GIT_COMMIT_DATE");

    /// Get a formatted version string.
    pub fn version_string() -> String {
        match (GIT_SHA, GIT_COMMIT_DATE) {
            (Some(sha), Some(date)) => {
                format!("{} ({} {})", VERSION, &sha[..7.min(sha.len())], date)
            }
            (Some(sha), None) => {
                format!("{} ({})", VERSION, &sha[..7.min(sha.len())])
            }
            _ => VERSION.to_string(),
        }
    }
}
