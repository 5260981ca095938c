// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// cmc - Commit Message Checker
///
/// Checks that commit messages follow the `[T#PROJ-123][TYPE] Summary`
/// convention.
#[derive(Parser, Debug)]
#[command(name = "cmc")]
#[command(author = "Eshan Roy")]
#[command(version)]
#[command(about = "Commit message checker", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// The command to run
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Output format for reports
    #[arg(long, global = true, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "CMC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

/// Output format for CI and scripting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text output (default)
    Text,
    /// JSON output for machine parsing
    Json,
}

/// Available commands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Validate the message of a commit or of every commit in a range
    Check(CheckArgs),

    /// Validate a message given as text or on stdin
    Message(MessageArgs),

    /// Validate a commit message file (used by the commit-msg hook)
    Hook(HookArgs),

    /// Validate the commits of the current CI build
    Ci,

    /// Manage the commit-msg git hook
    Hooks(HooksArgs),

    /// Explain failure codes
    Explain {
        /// Failure code to explain (all codes when omitted)
        #[arg(value_name = "RULE ID")]
        code: Option<String>,
    },

    /// Print version information
    Version,
}

/// Arguments for the check command.
#[derive(Parser, Debug, Clone)]
pub struct CheckArgs {
    /// Commit or range to check
    #[arg(default_value = "HEAD")]
    pub target: String,

    /// Treat the target as a range (implied when it contains `..`)
    #[arg(long)]
    pub range: bool,

    /// Read commits through the git executable instead of libgit2
    #[arg(long)]
    pub shell: bool,
}

/// Arguments for the message command.
#[derive(Parser, Debug, Clone)]
pub struct MessageArgs {
    /// Message text (read from stdin when omitted)
    pub text: Option<String>,
}

/// Arguments for the hook command.
#[derive(Parser, Debug, Clone)]
pub struct HookArgs {
    /// Path to the commit message file
    pub file: PathBuf,

    /// Exit with an error when the message is invalid
    #[arg(long)]
    pub block: bool,
}

/// Arguments for the hooks command.
#[derive(Parser, Debug, Clone)]
pub struct HooksArgs {
    /// Hook action to perform
    #[command(subcommand)]
    pub action: HooksAction,
}

/// Hook actions.
#[derive(Subcommand, Debug, Clone)]
pub enum HooksAction {
    /// Install the commit-msg hook
    Install {
        /// Replace a hook not installed by cmc (it is kept as a backup)
        #[arg(short, long)]
        force: bool,

        /// Installed hook rejects invalid messages
        #[arg(long)]
        block: bool,
    },

    /// Uninstall the commit-msg hook
    Uninstall,

    /// Show hook status
    Status,
}

impl CheckArgs {
    /// Whether the target names a range rather than a single commit.
    pub fn is_range(&self) -> bool {
        self.range || self.target.contains("..")
    }
}

impl Default for CheckArgs {
    fn default() -> Self {
        Self {
            target: "HEAD".to_string(),
            range: false,
            shell: false,
        }
    }
}
