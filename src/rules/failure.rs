// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Failure codes and their explanations.

use std::collections::HashMap;
use std::fmt;

use lazy_static::lazy_static;
use serde::{Serialize, Serializer};

use crate::config::CommitType;

lazy_static! {
    static ref EXPLANATIONS: HashMap<FailureCode, String> = {
        let mut m = HashMap::new();
        m.insert(
            FailureCode::InvalidSummaryFormat,
            "The first line of the commit message does not match the expected format. \
             Commit messages should be in the format: \"[J#PROJ-123][BUG] Fix issue with foo\" \
             or \"[BUG] Fix issue with foo\"."
                .to_string(),
        );
        m.insert(
            FailureCode::MissingOrInvalidType,
            format!(
                "The commit message is missing a commit type, or the commit type is invalid, \
                 e.g. \"[J#PROJ-123][FEATURE] Add foo feature\". Accepted values are {}.",
                CommitType::all()
                    .iter()
                    .map(|t| t.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        );
        m.insert(
            FailureCode::NoSeparatorAfterSummary,
            "There is a missing new-line after the first line. Multi-line commit messages \
             should have a blank line between the first line (a terse description of the \
             change) and the longer commit description."
                .to_string(),
        );
        m
    };
}

/// Stable identifier for a rule failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureCode {
    /// The summary line does not have a valid shape.
    InvalidSummaryFormat,
    /// No commit type from the registry could be found.
    MissingOrInvalidType,
    /// A multi-line message has a non-blank second line.
    NoSeparatorAfterSummary,
}

impl FailureCode {
    /// Get the code string.
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureCode::InvalidSummaryFormat => "invalid-summary-format",
            FailureCode::MissingOrInvalidType => "missing-or-invalid-type",
            FailureCode::NoSeparatorAfterSummary => "no-separator-after-summary",
        }
    }

    /// Get the human-readable explanation.
    pub fn explanation(&self) -> &'static str {
        EXPLANATIONS
            .get(self)
            .map(String::as_str)
            .unwrap_or("Unknown failure")
    }

    /// Get all failure codes.
    pub fn all() -> &'static [FailureCode] {
        &[
            FailureCode::InvalidSummaryFormat,
            FailureCode::MissingOrInvalidType,
            FailureCode::NoSeparatorAfterSummary,
        ]
    }
}

impl std::str::FromStr for FailureCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FailureCode::all()
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or(())
    }
}

impl fmt::Display for FailureCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for FailureCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
