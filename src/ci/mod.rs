// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! CI environment detection.
//!
//! Works out which commits a CI build should check. Pull request builds check
//! the PR's commit range, push builds check the pushed commit.

use crate::config::CiConfig;
use crate::error::{CiError, Result};

/// Supported CI providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CiProvider {
    Travis,
    AppVeyor,
}

impl std::fmt::Display for CiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CiProvider::Travis => write!(f, "Travis CI"),
            CiProvider::AppVeyor => write!(f, "AppVeyor"),
        }
    }
}

/// What a CI build should check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CiPlan {
    /// Check every commit in the range.
    Range(String),
    /// Check a single commit.
    Commit(String),
    /// Check nothing.
    Skip { reason: String },
}

/// Detect the CI provider from environment variables.
pub fn detect_provider<F>(env: F) -> Option<CiProvider>
where
    F: Fn(&str) -> Option<String>,
{
    if env("TRAVIS").as_deref() == Some("true") {
        Some(CiProvider::Travis)
    } else if env("APPVEYOR")
        .map(|v| v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
    {
        Some(CiProvider::AppVeyor)
    } else {
        None
    }
}

/// Build the check plan from environment variables.
///
/// `env` looks up a variable; pass `|k| std::env::var(k).ok()` in production.
pub fn plan<F>(config: &CiConfig, env: F) -> Result<CiPlan>
where
    F: Fn(&str) -> Option<String>,
{
    let provider = detect_provider(&env).ok_or(CiError::NotDetected)?;
    tracing::debug!("Detected CI provider: {}", provider);

    let required = |name: &str| -> Result<String> {
        env(name)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                CiError::MissingVariable {
                    name: name.to_string(),
                }
                .into()
            })
    };

    match provider {
        CiProvider::Travis => {
            let is_pull_request = env("TRAVIS_PULL_REQUEST")
                .map(|v| v != "false")
                .unwrap_or(false);

            if is_pull_request {
                let branch = env("TRAVIS_PULL_REQUEST_BRANCH").unwrap_or_default();
                if let Some(skip) = skip_for_branch(config, &branch) {
                    return Ok(skip);
                }
                Ok(CiPlan::Range(required("TRAVIS_COMMIT_RANGE")?))
            } else {
                Ok(CiPlan::Commit(required("TRAVIS_COMMIT")?))
            }
        }
        CiProvider::AppVeyor => {
            let is_pull_request = env("APPVEYOR_PULL_REQUEST_NUMBER")
                .map(|v| !v.is_empty())
                .unwrap_or(false);

            if is_pull_request {
                let branch = env("APPVEYOR_PULL_REQUEST_HEAD_REPO_BRANCH").unwrap_or_default();
                if let Some(skip) = skip_for_branch(config, &branch) {
                    return Ok(skip);
                }
                let base = required("APPVEYOR_REPO_BRANCH")?;
                Ok(CiPlan::Range(format!("{}..HEAD", base)))
            } else {
                Ok(CiPlan::Commit(required("APPVEYOR_REPO_COMMIT")?))
            }
        }
    }
}

/// Check if pull requests from `branch` are ignored.
pub fn is_ignored_branch(config: &CiConfig, branch: &str) -> bool {
    config
        .ignore_pull_requests_from_branches
        .iter()
        .any(|pattern| {
            pattern == branch
                || glob::Pattern::new(pattern)
                    .map(|p| p.matches(branch))
                    .unwrap_or(false)
        })
}

fn skip_for_branch(config: &CiConfig, branch: &str) -> Option<CiPlan> {
    if branch.is_empty() || !is_ignored_branch(config, branch) {
        return None;
    }

    tracing::info!("Ignoring pull request from branch '{}'", branch);
    Some(CiPlan::Skip {
        reason: format!(
            "Not checking commit messages as pull requests from '{}' are ignored",
            branch
        ),
    })
}
