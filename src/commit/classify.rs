// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Special commit detection.
//!
//! Merge and revert commits are generated by git and are exempt from the
//! structural rules. Only the summary line is inspected.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use super::CommitMessage;

lazy_static! {
    static ref MERGE_COMMIT_REGEX: Regex = Regex::new(r"^Merge .+$").unwrap();
    static ref REVERT_COMMIT_REGEX: Regex = Regex::new(r#"^Revert ".+"$"#).unwrap();
}

/// Kind of commit that bypasses rule evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecialCommit {
    Merge,
    Revert,
}

impl std::fmt::Display for SpecialCommit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpecialCommit::Merge => write!(f, "merge"),
            SpecialCommit::Revert => write!(f, "revert"),
        }
    }
}

/// Check if a message is a merge commit, e.g. `Merge branch 'develop'`.
pub fn is_merge_commit(message: &CommitMessage) -> bool {
    MERGE_COMMIT_REGEX.is_match(message.summary())
}

/// Check if a message is a revert commit, e.g. `Revert "[BUG] Fix foo"`.
pub fn is_revert_commit(message: &CommitMessage) -> bool {
    REVERT_COMMIT_REGEX.is_match(message.summary())
}

/// Classify a message. Merge wins when both would match.
pub fn classify(message: &CommitMessage) -> Option<SpecialCommit> {
    if is_merge_commit(message) {
        Some(SpecialCommit::Merge)
    } else if is_revert_commit(message) {
        Some(SpecialCommit::Revert)
    } else {
        None
    }
}
