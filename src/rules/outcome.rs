// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Validation outcome type.

use serde::Serialize;

use crate::commit::SpecialCommit;

use super::failure::FailureCode;

/// Result of validating a single commit message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationOutcome {
    /// The original message.
    pub message: String,
    /// Commit SHA if the message was read from history.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit_sha: Option<String>,
    /// Set when rules were skipped for a merge or revert commit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special: Option<SpecialCommit>,
    /// Failed rules, in rule order.
    pub failures: Vec<FailureCode>,
}

impl ValidationOutcome {
    /// Create an outcome with no failures.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            commit_sha: None,
            special: None,
            failures: Vec::new(),
        }
    }

    /// Create an outcome for a commit that bypassed the rules.
    pub fn special(message: impl Into<String>, kind: SpecialCommit) -> Self {
        Self {
            special: Some(kind),
            ..Self::new(message)
        }
    }

    /// Attach the commit SHA the message came from.
    pub fn with_commit_sha(mut self, sha: impl Into<String>) -> Self {
        self.commit_sha = Some(sha.into());
        self
    }

    /// Check if the validation passed (no failures).
    pub fn is_valid(&self) -> bool {
        self.failures.is_empty()
    }

    /// Check if a specific failure was reported.
    pub fn has_failure(&self, code: FailureCode) -> bool {
        self.failures.contains(&code)
    }

    /// Get the first line of the message.
    pub fn summary_line(&self) -> &str {
        self.message.split('\n').next().unwrap_or_default()
    }

    /// Get the first seven characters of the SHA, if known.
    pub fn short_sha(&self) -> Option<&str> {
        self.commit_sha
            .as_deref()
            .map(|sha| sha.char_indices().nth(7).map_or(sha, |(i, _)| &sha[..i]))
    }

    /// Get a summary string.
    pub fn summary(&self) -> String {
        match (self.is_valid(), self.special) {
            (true, Some(kind)) => format!("Valid ({} commit, rules skipped)", kind),
            (true, None) => "Valid".to_string(),
            (false, _) => format!("Invalid ({} failures)", self.failures.len()),
        }
    }
}
