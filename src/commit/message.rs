// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Commit message structure and line splitting.

use crate::config::CommitType;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Loose commit type extraction: an optional `[X#ID]` ticket tag followed
    /// by a bracketed registry type. Only anchored at the start.
    static ref COMMIT_TYPE_REGEX: Regex = Regex::new(&format!(
        r"^(\[.#[A-Z0-9\-]+\])?\[({})\]",
        CommitType::alternation()
    ))
    .unwrap();
}

/// A raw commit message.
///
/// The text is kept exactly as received. Lines are split on `\n` only, without
/// trimming, so there is always at least one (possibly empty) line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMessage {
    raw: String,
}

impl CommitMessage {
    /// Wrap raw message text.
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// Get the raw text.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Get the lines of the message, in order.
    pub fn lines(&self) -> Vec<&str> {
        self.raw.split('\n').collect()
    }

    /// Get the number of lines.
    pub fn line_count(&self) -> usize {
        self.raw.split('\n').count()
    }

    /// Check if the message only has a summary line.
    pub fn is_single_line(&self) -> bool {
        self.line_count() == 1
    }

    /// Get the first line (the summary).
    pub fn summary(&self) -> &str {
        self.raw.split('\n').next().unwrap_or_default()
    }

    /// Get a line by index, if present.
    pub fn line(&self, index: usize) -> Option<&str> {
        self.raw.split('\n').nth(index)
    }

    /// Extract the commit type from the summary.
    ///
    /// `[J#PROJ-123][BUG] Fix foo` and `[BUG] Fix foo` both yield `BUG`.
    pub fn commit_type(&self) -> Option<CommitType> {
        COMMIT_TYPE_REGEX
            .captures(self.summary())
            .and_then(|captures| captures.get(2))
            .and_then(|m| m.as_str().parse().ok())
    }
}

impl From<&str> for CommitMessage {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for CommitMessage {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl std::fmt::Display for CommitMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_preserve_empty_lines() {
        let msg = CommitMessage::new("[BUG] fix\n\nbody\n");
        assert_eq!(msg.lines(), vec!["[BUG] fix", "", "body", ""]);
        assert_eq!(msg.line_count(), 4);
    }

    #[test]
    fn test_empty_message_has_one_line() {
        let msg = CommitMessage::new("");
        assert_eq!(msg.lines(), vec![""]);
        assert!(msg.is_single_line());
        assert_eq!(msg.summary(), "");
    }

    #[test]
    fn test_lines_are_not_trimmed() {
        let msg = CommitMessage::new("  [BUG] fix  \n   ");
        assert_eq!(msg.summary(), "  [BUG] fix  ");
        assert_eq!(msg.line(1), Some("   "));
        assert_eq!(msg.line(2), None);
    }

    #[test]
    fn test_single_vs_multi_line() {
        assert!(CommitMessage::new("[BUG] fix").is_single_line());
        assert!(!CommitMessage::new("[BUG] fix\n").is_single_line());
    }

    #[test]
    fn test_commit_type_plain() {
        let msg = CommitMessage::new("[FEATURE] Add foo");
        assert_eq!(msg.commit_type(), Some(CommitType::Feature));
    }

    #[test]
    fn test_commit_type_with_ticket() {
        let msg = CommitMessage::new("[J#PROJ-123][BUG] Fix foo");
        assert_eq!(msg.commit_type(), Some(CommitType::Bug));
    }

    #[test]
    fn test_commit_type_tolerates_loose_ticket_tag() {
        // No numeric suffix and a digit as the tracker prefix: still a type.
        let msg = CommitMessage::new("[1#PROJ][CONFIG] Tweak");
        assert_eq!(msg.commit_type(), Some(CommitType::Config));
    }

    #[test]
    fn test_commit_type_only_reads_summary() {
        let msg = CommitMessage::new("no type here\n[BUG] fix");
        assert_eq!(msg.commit_type(), None);
    }

    #[test]
    fn test_commit_type_unknown() {
        assert_eq!(CommitMessage::new("[FIX] nope").commit_type(), None);
        assert_eq!(CommitMessage::new("[bug] nope").commit_type(), None);
        assert_eq!(CommitMessage::new("BUG nope").commit_type(), None);
    }
}
