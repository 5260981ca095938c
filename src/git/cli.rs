// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Commit source backed by the `git` executable.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::{CmcError, GitError, Result};

use super::source::{CommitSource, ResolvedCommit};

/// Reads commit messages by running `git log`.
#[derive(Debug, Clone, Default)]
pub struct GitCli {
    workdir: Option<PathBuf>,
}

impl GitCli {
    /// Run git in the current directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run git in a specific directory.
    pub fn in_dir(path: impl AsRef<Path>) -> Self {
        Self {
            workdir: Some(path.as_ref().to_path_buf()),
        }
    }

    async fn run(&self, args: &[&str]) -> Result<String> {
        let command = format!("git {}", args.join(" "));
        tracing::debug!("Running {}", command);

        let mut cmd = Command::new("git");
        cmd.args(args);
        if let Some(ref dir) = self.workdir {
            cmd.current_dir(dir);
        }

        let output = cmd.output().await.map_err(|e| {
            tracing::error!("Failed to run {}: {}", command, e);
            CmcError::Git(GitError::CommandFailed {
                command: command.clone(),
                message: e.to_string(),
            })
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            tracing::error!("{} failed: {}", command, stderr);
            return Err(CmcError::Git(GitError::CommandFailed {
                command,
                message: stderr,
            }));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Refuse anything git would read as an option.
fn check_revision(revision: &str) -> Result<()> {
    if revision.is_empty() || revision.starts_with('-') {
        return Err(CmcError::Git(GitError::InvalidReference {
            reference: revision.to_string(),
        }));
    }
    Ok(())
}

#[async_trait]
impl CommitSource for GitCli {
    async fn resolve_commit(&self, reference: &str) -> Result<ResolvedCommit> {
        check_revision(reference)?;
        let stdout = self
            .run(&["log", "-1", "--pretty=format:%H%n%B", reference])
            .await?;

        // First line is the SHA, everything after it is the raw message
        let (sha, message) = stdout.split_once('\n').unwrap_or((stdout.as_str(), ""));
        Ok(ResolvedCommit {
            sha: sha.trim().to_string(),
            message: message.to_string(),
        })
    }

    async fn resolve_shas_in_range(&self, range: &str) -> Result<Vec<String>> {
        check_revision(range)?;
        let stdout = self.run(&["log", "--pretty=format:%H", range]).await?;

        Ok(stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect())
    }
}
