// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Repository operations and the libgit2 commit source.

use crate::error::{CmcError, GitError, Result};
use async_trait::async_trait;
use git2::{Oid, Repository as Git2Repo};
use std::path::{Path, PathBuf};

use super::source::{CommitSource, ResolvedCommit};

/// Wrapper around git2::Repository with additional functionality.
pub struct Repository {
    inner: Git2Repo,
}

impl Repository {
    /// Open a repository from the current directory.
    pub fn open_current() -> Result<Self> {
        let current_dir = std::env::current_dir().map_err(|e| {
            CmcError::Git(GitError::OpenFailed {
                message: format!("Failed to get current directory: {}", e),
            })
        })?;
        Self::open(&current_dir)
    }

    /// Open a repository from a path.
    pub fn open(path: &Path) -> Result<Self> {
        let repo = Git2Repo::discover(path).map_err(|e| {
            if e.code() == git2::ErrorCode::NotFound {
                CmcError::Git(GitError::NotARepository)
            } else {
                CmcError::Git(e.into())
            }
        })?;

        Ok(Self { inner: repo })
    }

    /// Get the git directory path (.git).
    pub fn git_dir(&self) -> &Path {
        self.inner.path()
    }

    /// Get a commit by reference (SHA, branch name, etc.).
    pub fn get_commit(&self, reference: &str) -> Result<git2::Commit<'_>> {
        let obj = self.inner.revparse_single(reference).map_err(|e| {
            CmcError::Git(GitError::InvalidReference {
                reference: format!("{}: {}", reference, e.message()),
            })
        })?;

        let commit = obj.peel_to_commit().map_err(|e| {
            CmcError::Git(GitError::InvalidReference {
                reference: format!("{}: {}", reference, e.message()),
            })
        })?;

        Ok(commit)
    }

    /// Resolve a reference to its full SHA and commit message.
    pub fn resolve_commit(&self, reference: &str) -> Result<ResolvedCommit> {
        let commit = self.get_commit(reference)?;
        let message = commit.message().ok_or_else(|| {
            CmcError::Git(GitError::InvalidReference {
                reference: format!("{}: Invalid message encoding", reference),
            })
        })?;

        Ok(ResolvedCommit {
            sha: commit.id().to_string(),
            message: message.to_string(),
        })
    }

    /// Get the commit ids in a range, newest first.
    ///
    /// `A..B` walks from `B` hiding everything reachable from `A`. `A...B`
    /// walks from both, hiding their merge base. A single reference yields
    /// just that commit.
    pub fn get_oids_in_range(&self, range: &str) -> Result<Vec<Oid>> {
        let (from, to, symmetric) = match range.split_once("...") {
            Some((from, to)) => (from, to, true),
            None => match range.split_once("..") {
                Some((from, to)) => (from, to, false),
                None => return Ok(vec![self.get_commit(range)?.id()]),
            },
        };

        if from.is_empty() || to.is_empty() || to.starts_with('.') {
            return Err(CmcError::Git(GitError::InvalidRange {
                range: range.to_string(),
            }));
        }

        let walk_err = |command: &str, e: git2::Error| {
            CmcError::Git(GitError::CommandFailed {
                command: command.to_string(),
                message: e.message().to_string(),
            })
        };

        let from = self.get_commit(from)?.id();
        let to = self.get_commit(to)?.id();

        let mut revwalk = self.inner.revwalk().map_err(|e| walk_err("revwalk", e))?;
        revwalk
            .set_sorting(git2::Sort::TIME)
            .map_err(|e| walk_err("revwalk.set_sorting", e))?;
        revwalk
            .push(to)
            .map_err(|e| walk_err("revwalk.push", e))?;

        if symmetric {
            revwalk
                .push(from)
                .map_err(|e| walk_err("revwalk.push", e))?;
            let base = self
                .inner
                .merge_base(from, to)
                .map_err(|e| walk_err("merge-base", e))?;
            revwalk
                .hide(base)
                .map_err(|e| walk_err("revwalk.hide", e))?;
        } else {
            revwalk
                .hide(from)
                .map_err(|e| walk_err("revwalk.hide", e))?;
        }

        revwalk
            .map(|oid| oid.map_err(|e| walk_err("revwalk", e)))
            .collect()
    }
}

/// Open the repository from the current directory.
pub fn open_repo() -> Result<Repository> {
    Repository::open_current()
}

/// Commit source backed by libgit2.
///
/// The repository is opened per lookup on the blocking pool, since
/// `git2::Repository` cannot be shared between threads.
#[derive(Debug, Clone)]
pub struct RepoSource {
    path: PathBuf,
}

impl RepoSource {
    /// Read from the repository containing `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read from the repository containing the current directory.
    pub fn current() -> Result<Self> {
        Ok(Self::new(std::env::current_dir()?))
    }

    async fn with_repo<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Repository) -> Result<T> + Send + 'static,
    {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || {
            let repo = Repository::open(&path)?;
            f(&repo)
        })
        .await
        .map_err(|e| CmcError::WithContext {
            context: "git lookup".to_string(),
            message: e.to_string(),
        })?
    }
}

#[async_trait]
impl CommitSource for RepoSource {
    async fn resolve_commit(&self, reference: &str) -> Result<ResolvedCommit> {
        let reference = reference.to_string();
        self.with_repo(move |repo| repo.resolve_commit(&reference))
            .await
    }

    async fn resolve_shas_in_range(&self, range: &str) -> Result<Vec<String>> {
        let range = range.to_string();
        self.with_repo(move |repo| {
            Ok(repo
                .get_oids_in_range(&range)?
                .into_iter()
                .map(|oid| oid.to_string())
                .collect())
        })
        .await
    }
}
