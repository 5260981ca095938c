// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Validator: special commit classification plus rule evaluation.

use futures::future::try_join_all;
use lazy_static::lazy_static;

use crate::commit::{classify, CommitMessage};
use crate::error::Result;
use crate::git::CommitSource;

use super::builtin::{builtin_rules, Rule};
use super::outcome::ValidationOutcome;

lazy_static! {
    static ref DEFAULT_VALIDATOR: Validator = Validator::new();
}

/// Validates commit messages against an ordered set of rules.
///
/// Holds no mutable state, so one instance can be shared across threads.
#[derive(Debug)]
pub struct Validator {
    rules: Vec<Box<dyn Rule>>,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    /// Create a validator with the built-in rules.
    pub fn new() -> Self {
        Self::with_rules(builtin_rules())
    }

    /// Create a validator with an explicit rule list.
    pub fn with_rules(rules: Vec<Box<dyn Rule>>) -> Self {
        Self { rules }
    }

    /// The process-wide validator with the built-in rules.
    pub fn global() -> &'static Validator {
        &DEFAULT_VALIDATOR
    }

    /// Append a rule. It runs after the existing ones.
    pub fn add_rule(&mut self, rule: Box<dyn Rule>) {
        self.rules.push(rule);
    }

    /// Get the configured rules, in evaluation order.
    pub fn rules(&self) -> &[Box<dyn Rule>] {
        &self.rules
    }

    /// Validate a commit message.
    ///
    /// Merge and revert commits are valid without running any rule. Every
    /// other message goes through all rules; one failing rule does not stop
    /// the next.
    pub fn validate(&self, message: &str) -> ValidationOutcome {
        let parsed = CommitMessage::new(message);

        if let Some(kind) = classify(&parsed) {
            tracing::debug!("Skipping rules for {} commit: {:?}", kind, parsed.summary());
            return ValidationOutcome::special(message, kind);
        }

        let mut outcome = ValidationOutcome::new(message);

        for rule in &self.rules {
            if let Some(code) = rule.evaluate(&parsed).failure() {
                tracing::debug!("Rule '{}' failed with {}", rule.name(), code);
                outcome.failures.push(code);
            }
        }

        outcome
    }

    /// Validate several messages. Results keep the input order.
    pub fn validate_batch<S: AsRef<str>>(&self, messages: &[S]) -> Vec<ValidationOutcome> {
        messages
            .iter()
            .map(|message| self.validate(message.as_ref()))
            .collect()
    }

    /// Check if a commit message is valid.
    pub fn is_valid_message(&self, message: &str) -> bool {
        self.validate(message).is_valid()
    }

    /// Resolve a commit reference and validate its message.
    ///
    /// The outcome carries the resolved commit SHA, not the reference.
    pub async fn validate_ref<C>(&self, source: &C, reference: &str) -> Result<ValidationOutcome>
    where
        C: CommitSource + ?Sized,
    {
        let commit = source.resolve_commit(reference).await?;
        Ok(self.validate(&commit.message).with_commit_sha(commit.sha))
    }

    /// Resolve several commit references and validate their messages.
    ///
    /// If any reference cannot be resolved, no outcomes are returned.
    pub async fn validate_refs<C, S>(&self, source: &C, references: &[S]) -> Result<Vec<ValidationOutcome>>
    where
        C: CommitSource + ?Sized,
        S: AsRef<str>,
    {
        let commits = try_join_all(
            references
                .iter()
                .map(|reference| source.resolve_commit(reference.as_ref())),
        )
        .await?;

        Ok(commits
            .into_iter()
            .map(|commit| self.validate(&commit.message).with_commit_sha(commit.sha))
            .collect())
    }

    /// Resolve every commit in a range and validate the messages.
    ///
    /// If the range or any commit in it cannot be resolved, no outcomes are
    /// returned.
    pub async fn validate_range<C>(&self, source: &C, range: &str) -> Result<Vec<ValidationOutcome>>
    where
        C: CommitSource + ?Sized,
    {
        let commits = source.resolve_messages_in_range(range).await?;
        tracing::debug!("Validating {} commit(s) in {}", commits.len(), range);

        Ok(commits
            .into_iter()
            .map(|commit| self.validate(&commit.message).with_commit_sha(commit.sha))
            .collect())
    }
}

/// Validate a message with the built-in rules.
pub fn validate(message: &str) -> ValidationOutcome {
    Validator::global().validate(message)
}

/// Validate several messages with the built-in rules.
pub fn validate_batch<S: AsRef<str>>(messages: &[S]) -> Vec<ValidationOutcome> {
    Validator::global().validate_batch(messages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CommitType;
    use crate::error::{CmcError, GitError};
    use crate::git::MemorySource;
    use crate::rules::{FailureCode, SeparatorRule, SummaryFormatRule};

    #[test]
    fn test_valid_for_every_type() {
        let validator = Validator::new();
        for t in CommitType::all() {
            assert!(validator.is_valid_message(&format!("[{}] some text", t)));
            assert!(validator.is_valid_message(&format!("[X#ID-123][{}] some text", t)));
        }
    }

    #[test]
    fn test_unknown_type_fails_format_and_type() {
        let outcome = Validator::new().validate("[FIX] some text");
        assert_eq!(
            outcome.failures,
            vec![
                FailureCode::InvalidSummaryFormat,
                FailureCode::MissingOrInvalidType
            ]
        );
    }

    #[test]
    fn test_merge_commits_skip_rules() {
        let validator = Validator::new();
        let outcome = validator.validate("Merge pull request #1 from a/b\nnot blank");
        assert!(outcome.is_valid());
        assert_eq!(outcome.special, Some(crate::commit::SpecialCommit::Merge));

        assert!(validator.is_valid_message("Merge branch 'develop' into x"));
    }

    #[test]
    fn test_revert_commits_skip_rules() {
        let outcome = Validator::new().validate("Revert \"[BUG] fix\"\nThis reverts abc");
        assert!(outcome.is_valid());
        assert_eq!(outcome.special, Some(crate::commit::SpecialCommit::Revert));
    }

    #[test]
    fn test_missing_separator() {
        let outcome = Validator::new().validate("[BUG] fix\nSome description");
        assert_eq!(outcome.failures, vec![FailureCode::NoSeparatorAfterSummary]);
    }

    #[test]
    fn test_with_separator() {
        assert!(Validator::new().is_valid_message("[BUG] fix\n\nSome description"));
    }

    #[test]
    fn test_empty_message_fails_without_panicking() {
        let outcome = Validator::new().validate("");
        assert_eq!(
            outcome.failures,
            vec![
                FailureCode::InvalidSummaryFormat,
                FailureCode::MissingOrInvalidType
            ]
        );
    }

    #[test]
    fn test_all_rules_run_without_short_circuit() {
        let outcome = Validator::new().validate("nothing right\nhere either");
        assert_eq!(
            outcome.failures,
            vec![
                FailureCode::InvalidSummaryFormat,
                FailureCode::MissingOrInvalidType,
                FailureCode::NoSeparatorAfterSummary,
            ]
        );
    }

    #[test]
    fn test_loose_ticket_tag_only_fails_format() {
        let outcome = Validator::new().validate("[J#PROJ][BUG] no ticket number");
        assert_eq!(outcome.failures, vec![FailureCode::InvalidSummaryFormat]);
    }

    #[test]
    fn test_idempotent() {
        let validator = Validator::new();
        let text = "[FEAT] x\ny";
        assert_eq!(validator.validate(text), validator.validate(text));
    }

    #[test]
    fn test_batch_matches_single() {
        let validator = Validator::new();
        let a = "[BUG] fix\nno gap";
        let b = "Merge branch 'x'";
        let results = validator.validate_batch(&[a, b]);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].failures, validator.validate(a).failures);
        assert!(results[1].is_valid());
    }

    #[test]
    fn test_custom_rule_list() {
        let validator = Validator::with_rules(vec![Box::new(SeparatorRule)]);
        assert!(validator.is_valid_message("no type at all"));
        assert_eq!(validator.rules().len(), 1);
    }

    #[test]
    fn test_add_rule_runs_last() {
        let mut validator = Validator::with_rules(vec![Box::new(SummaryFormatRule)]);
        validator.add_rule(Box::new(SeparatorRule));

        let names: Vec<_> = validator.rules().iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["summary-format", "separator"]);
        assert_eq!(
            validator.validate("wip
body").failures,
            vec![
                FailureCode::InvalidSummaryFormat,
                FailureCode::NoSeparatorAfterSummary
            ]
        );
    }

    #[test]
    fn test_crlf_line_endings() {
        let validator = Validator::new();
        // Lines split on `\n` only, so the `\r` stays in the summary and `.`
        // matches it; a `\r`-only second line trims to blank.
        assert!(validator.is_valid_message("[BUG] fix\r\n\r\nbody"));
        assert!(validator.is_valid_message("[J#PROJ-1][DOCS] readme\r\n"));
        assert_eq!(
            validator.validate("[BUG] fix\r\nbody").failures,
            vec![FailureCode::NoSeparatorAfterSummary]
        );

        let outcome = validator.validate("Merge branch 'x'\r\nnot blank");
        assert_eq!(outcome.special, Some(crate::commit::SpecialCommit::Merge));
    }

    #[test]
    fn test_global_validator() {
        assert!(validate("[SETUP] init").is_valid());
        assert_eq!(validate_batch(&["x", "[BUG] y"]).len(), 2);
    }

    #[tokio::test]
    async fn test_validate_ref() {
        let source = MemorySource::new().with_commit("abc", "[BUG] fix");
        let outcome = Validator::new().validate_ref(&source, "abc").await.unwrap();
        assert!(outcome.is_valid());
    }

    #[tokio::test]
    async fn test_outcomes_carry_resolved_sha() {
        let sha = "0a1b2c3d4e5f60718293a4b5c6d7e8f901234567";
        let source = MemorySource::new()
            .with_commit(sha, "bad message")
            .with_ref("HEAD", sha)
            .with_ref("ñññññ", sha);
        let validator = Validator::new();

        let outcome = validator.validate_ref(&source, "HEAD").await.unwrap();
        assert_eq!(outcome.commit_sha.as_deref(), Some(sha));

        let outcomes = validator.validate_refs(&source, &["ñññññ"]).await.unwrap();
        assert_eq!(outcomes[0].commit_sha.as_deref(), Some(sha));
        assert_eq!(outcomes[0].short_sha(), Some("0a1b2c3"));
    }

    #[tokio::test]
    async fn test_non_ascii_commit_id_renders() {
        let source = MemorySource::new().with_commit("ñññññ", "bad message");
        let outcomes = Validator::new()
            .validate_refs(&source, &["ñññññ"])
            .await
            .unwrap();

        let text = crate::report::render_text(&outcomes, false);
        assert!(text.contains("(ñññññ)"));
    }

    #[tokio::test]
    async fn test_validate_refs_is_all_or_nothing() {
        let source = MemorySource::new().with_commit("abc", "[BUG] fix");
        let validator = Validator::new();

        let ok = validator.validate_refs(&source, &["abc"]).await.unwrap();
        assert_eq!(ok[0].commit_sha.as_deref(), Some("abc"));

        let err = validator.validate_refs(&source, &["abc", "nope"]).await;
        assert!(matches!(
            err,
            Err(CmcError::Git(GitError::InvalidReference { .. }))
        ));
    }

    #[tokio::test]
    async fn test_validate_range() {
        let source = MemorySource::new()
            .with_commit("c2", "oops")
            .with_commit("c1", "[DOCS] readme")
            .with_range("c0..c2", ["c2", "c1"]);

        let outcomes = Validator::new()
            .validate_range(&source, "c0..c2")
            .await
            .unwrap();

        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].commit_sha.as_deref(), Some("c2"));
        assert!(!outcomes[0].is_valid());
        assert!(outcomes[1].is_valid());
    }
}
