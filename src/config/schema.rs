// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration schema definitions.
//!
//! Defines all configuration structures that can be loaded from cmc.toml.
//! None of these settings change the validation rules themselves.

use serde::{Deserialize, Serialize};

/// The main configuration structure for cmc.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CmcConfig {
    /// CI configuration.
    pub ci: CiConfig,

    /// Hook configuration.
    pub hooks: HooksConfig,

    /// UI/UX configuration.
    pub ui: UiConfig,
}

impl CmcConfig {
    /// Load configuration from the default locations.
    pub fn load() -> crate::error::Result<Self> {
        super::loader::load_config()
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &std::path::Path) -> crate::error::Result<Self> {
        super::loader::load_config_from(path)
    }
}

/// CI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CiConfig {
    /// Pull requests whose source branch matches one of these names or glob
    /// patterns are not checked.
    ///
    /// Long running shared branches often carry commits from before the
    /// checker was introduced, and rewriting their history is not an option.
    pub ignore_pull_requests_from_branches: Vec<String>,
}

impl Default for CiConfig {
    fn default() -> Self {
        Self {
            ignore_pull_requests_from_branches: vec![
                "master".to_string(),
                "develop".to_string(),
            ],
        }
    }
}

/// Hooks configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct HooksConfig {
    /// Whether the commit-msg hook rejects invalid messages.
    ///
    /// Off by default: the hook only reports.
    pub block: bool,
}

/// UI/UX configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Whether to use colors.
    pub color: bool,

    /// Whether to show hints.
    pub hints: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            color: true,
            hints: true,
        }
    }
}
