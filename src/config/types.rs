// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! The closed registry of commit types.
//!
//! Commit types are not configurable per project or per message. Adding a type
//! means adding a variant here.

use serde::{Deserialize, Serialize};

/// A bracketed commit classifier, e.g. `[BUG]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CommitType {
    Bug,
    Config,
    Feature,
    Format,
    Refactor,
    Docs,
    Setup,
}

impl CommitType {
    /// Get the token as it appears between the brackets.
    pub fn as_str(&self) -> &'static str {
        match self {
            CommitType::Bug => "BUG",
            CommitType::Config => "CONFIG",
            CommitType::Feature => "FEATURE",
            CommitType::Format => "FORMAT",
            CommitType::Refactor => "REFACTOR",
            CommitType::Docs => "DOCS",
            CommitType::Setup => "SETUP",
        }
    }

    /// Get a description of the commit type.
    pub fn description(&self) -> &'static str {
        match self {
            CommitType::Bug => "A bug fix",
            CommitType::Config => "Configuration changes",
            CommitType::Feature => "A new feature",
            CommitType::Format => "Formatting or whitespace only",
            CommitType::Refactor => "Code restructuring without behaviour change",
            CommitType::Docs => "Documentation only changes",
            CommitType::Setup => "Project setup, tooling or dependencies",
        }
    }

    /// Get all commit types, in registry order.
    pub fn all() -> &'static [CommitType] {
        &[
            CommitType::Bug,
            CommitType::Config,
            CommitType::Feature,
            CommitType::Format,
            CommitType::Refactor,
            CommitType::Docs,
            CommitType::Setup,
        ]
    }

    /// Regex alternation of every token, e.g. `BUG|CONFIG|...`.
    pub fn alternation() -> String {
        Self::all()
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join("|")
    }
}

impl std::str::FromStr for CommitType {
    type Err = ();

    /// Tokens are case-sensitive: `bug` is not a commit type.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CommitType::all()
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or(())
    }
}

impl std::fmt::Display for CommitType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
