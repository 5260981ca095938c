// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Git integration module.
//!
//! This module resolves commit references and ranges to raw commit messages.

mod cli;
mod repo;
mod source;

pub use cli::GitCli;
pub use repo::{open_repo, RepoSource, Repository};
pub use source::{CommitSource, MemorySource, ResolvedCommit};
