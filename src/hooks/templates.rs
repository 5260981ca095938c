// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Hook script templates.

use handlebars::Handlebars;
use serde_json::json;

use crate::error::{CmcError, HookError, Result};

/// Marker line identifying scripts installed by cmc.
pub const HOOK_MARKER: &str = "# cmc Git Hook";

const COMMIT_MSG_TEMPLATE: &str = r#"#!/bin/sh
{{marker}}
# Generated by cmc v{{version}}
#
# Validates the commit message in "$1".
{{#if block}}
# Invalid messages abort the commit.
{{else}}
# Invalid messages are reported but the commit still goes through.
{{/if}}
exec cmc hook "$1"{{#if block}} --block{{/if}}
"#;

/// Hooks cmc knows how to install.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookTemplate {
    CommitMsg,
}

impl HookTemplate {
    /// Get all hook templates.
    pub fn all() -> &'static [HookTemplate] {
        &[HookTemplate::CommitMsg]
    }

    /// File name inside the hooks directory.
    pub fn filename(&self) -> &'static str {
        match self {
            HookTemplate::CommitMsg => "commit-msg",
        }
    }

    fn source(&self) -> &'static str {
        match self {
            HookTemplate::CommitMsg => COMMIT_MSG_TEMPLATE,
        }
    }

    /// Render the hook script.
    pub fn generate(&self, block: bool) -> Result<String> {
        let mut hb = Handlebars::new();
        hb.register_escape_fn(handlebars::no_escape);

        hb.render_template(
            self.source(),
            &json!({
                "marker": HOOK_MARKER,
                "version": env!("CARGO_PKG_VERSION"),
                "block": block,
            }),
        )
        .map_err(|e| {
            CmcError::Hook(HookError::InstallFailed {
                hook: self.filename().to_string(),
                message: format!("Failed to render hook: {}", e),
            })
        })
    }
}

impl std::str::FromStr for HookTemplate {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "commit-msg" | "commit_msg" => Ok(HookTemplate::CommitMsg),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_non_blocking() {
        let script = HookTemplate::CommitMsg.generate(false).unwrap();
        assert!(script.starts_with("#!/bin/sh\n"));
        assert!(script.contains(HOOK_MARKER));
        assert!(script.contains("exec cmc hook \"$1\"\n"));
        assert!(!script.contains("--block"));
    }

    #[test]
    fn test_generate_blocking() {
        let script = HookTemplate::CommitMsg.generate(true).unwrap();
        assert!(script.contains("exec cmc hook \"$1\" --block"));
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            "commit-msg".parse::<HookTemplate>(),
            Ok(HookTemplate::CommitMsg)
        );
        assert!("pre-push".parse::<HookTemplate>().is_err());
    }
}
