// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Commit text sources.
//!
//! A source turns a commit reference or range into raw message text. This is
//! the only asynchronous boundary of the checker; validation itself is sync.

use std::collections::HashMap;

use async_trait::async_trait;
use futures::future::try_join_all;

use crate::error::{CmcError, GitError, Result};

/// A commit message resolved from history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCommit {
    /// Full commit SHA.
    pub sha: String,
    /// Raw commit message.
    pub message: String,
}

/// Resolves commit references to raw message text.
#[async_trait]
pub trait CommitSource: Send + Sync {
    /// Resolve a single reference to its commit SHA and full message.
    async fn resolve_commit(&self, reference: &str) -> Result<ResolvedCommit>;

    /// Get the full message of a single commit.
    async fn resolve_message(&self, reference: &str) -> Result<String> {
        Ok(self.resolve_commit(reference).await?.message)
    }

    /// Get the SHAs in a range such as `abc123..def456`, newest first.
    async fn resolve_shas_in_range(&self, range: &str) -> Result<Vec<String>>;

    /// Get every commit in a range, in the order of
    /// [`resolve_shas_in_range`](Self::resolve_shas_in_range).
    ///
    /// Lookups run concurrently. If any single lookup fails, the whole call
    /// fails and no messages are returned.
    async fn resolve_messages_in_range(&self, range: &str) -> Result<Vec<ResolvedCommit>> {
        let shas = self.resolve_shas_in_range(range).await?;
        try_join_all(shas.iter().map(|sha| self.resolve_commit(sha))).await
    }
}

/// In-memory commit source.
///
/// Commits are stored by SHA. Symbolic names such as `HEAD` can point at a
/// SHA with [`with_ref`](Self::with_ref).
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    messages: HashMap<String, String>,
    refs: HashMap<String, String>,
    ranges: HashMap<String, Vec<String>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a commit message under its SHA.
    pub fn with_commit(mut self, sha: impl Into<String>, message: impl Into<String>) -> Self {
        self.messages.insert(sha.into(), message.into());
        self
    }

    /// Point a symbolic reference at a commit SHA.
    pub fn with_ref(mut self, name: impl Into<String>, sha: impl Into<String>) -> Self {
        self.refs.insert(name.into(), sha.into());
        self
    }

    /// Register the SHAs a range resolves to.
    pub fn with_range<I, S>(mut self, range: impl Into<String>, shas: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ranges
            .insert(range.into(), shas.into_iter().map(Into::into).collect());
        self
    }
}

#[async_trait]
impl CommitSource for MemorySource {
    async fn resolve_commit(&self, reference: &str) -> Result<ResolvedCommit> {
        let sha = self
            .refs
            .get(reference)
            .map(String::as_str)
            .unwrap_or(reference);

        let message = self.messages.get(sha).cloned().ok_or_else(|| {
            CmcError::Git(GitError::InvalidReference {
                reference: reference.to_string(),
            })
        })?;

        Ok(ResolvedCommit {
            sha: sha.to_string(),
            message,
        })
    }

    async fn resolve_shas_in_range(&self, range: &str) -> Result<Vec<String>> {
        self.ranges.get(range).cloned().ok_or_else(|| {
            CmcError::Git(GitError::InvalidRange {
                range: range.to_string(),
            })
        })
    }
}
