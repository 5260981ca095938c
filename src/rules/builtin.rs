// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Built-in validation rules.

use lazy_static::lazy_static;
use regex::Regex;

use crate::commit::CommitMessage;
use crate::config::CommitType;

use super::failure::FailureCode;

lazy_static! {
    /// `[J#PROJ-123][BUG] A short message`
    static ref SUMMARY_WITH_TICKET_REGEX: Regex = Regex::new(&format!(
        r"^\[[A-Z]#[A-Za-z0-9]+-[0-9]+\]\[({})\] .+$",
        CommitType::alternation()
    ))
    .unwrap();

    /// `[BUG] A short message`
    static ref SUMMARY_WITHOUT_TICKET_REGEX: Regex = Regex::new(&format!(
        r"^\[({})\] .+$",
        CommitType::alternation()
    ))
    .unwrap();
}

/// Outcome of evaluating one rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleOutcome {
    Pass,
    Fail(FailureCode),
}

impl RuleOutcome {
    /// Check if the rule passed.
    pub fn is_ok(&self) -> bool {
        matches!(self, RuleOutcome::Pass)
    }

    /// Get the failure code, if the rule failed.
    pub fn failure(&self) -> Option<FailureCode> {
        match self {
            RuleOutcome::Pass => None,
            RuleOutcome::Fail(code) => Some(*code),
        }
    }
}

/// A stateless structural check over a commit message.
///
/// Rules never fail to run: input that does not match is just a failure.
pub trait Rule: std::fmt::Debug + Send + Sync {
    /// The code reported when this rule fails.
    fn code(&self) -> FailureCode;

    /// Check if the message satisfies the rule.
    fn passes(&self, message: &CommitMessage) -> bool;

    /// Get the rule name.
    fn name(&self) -> &str {
        self.code().as_str()
    }

    /// Evaluate the rule against a message.
    fn evaluate(&self, message: &CommitMessage) -> RuleOutcome {
        if self.passes(message) {
            RuleOutcome::Pass
        } else {
            RuleOutcome::Fail(self.code())
        }
    }
}

/// The summary line must be `[X#ID-1][TYPE] text` or `[TYPE] text`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryFormatRule;

impl Rule for SummaryFormatRule {
    fn code(&self) -> FailureCode {
        FailureCode::InvalidSummaryFormat
    }

    fn name(&self) -> &str {
        "summary-format"
    }

    fn passes(&self, message: &CommitMessage) -> bool {
        let summary = message.summary();
        SUMMARY_WITH_TICKET_REGEX.is_match(summary) || SUMMARY_WITHOUT_TICKET_REGEX.is_match(summary)
    }
}

/// A registry commit type must be present at the start of the summary.
///
/// The ticket tag accepted here is looser than in [`SummaryFormatRule`], so
/// `[J#PROJ][BUG] x` has a type but an invalid summary.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommitTypeRule;

impl Rule for CommitTypeRule {
    fn code(&self) -> FailureCode {
        FailureCode::MissingOrInvalidType
    }

    fn name(&self) -> &str {
        "commit-type"
    }

    fn passes(&self, message: &CommitMessage) -> bool {
        message.commit_type().is_some()
    }
}

/// Multi-line messages need a blank second line.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeparatorRule;

impl Rule for SeparatorRule {
    fn code(&self) -> FailureCode {
        FailureCode::NoSeparatorAfterSummary
    }

    fn name(&self) -> &str {
        "separator"
    }

    fn passes(&self, message: &CommitMessage) -> bool {
        if message.is_single_line() {
            return true;
        }

        message
            .line(1)
            .map(|line| line.trim().is_empty())
            .unwrap_or(true)
    }
}

/// Get the built-in rules in evaluation order.
pub fn builtin_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(SummaryFormatRule),
        Box::new(CommitTypeRule),
        Box::new(SeparatorRule),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(text: &str) -> CommitMessage {
        CommitMessage::new(text)
    }

    #[test]
    fn test_summary_format_every_type() {
        for t in CommitType::all() {
            assert!(SummaryFormatRule.passes(&msg(&format!("[{}] some text", t))));
            assert!(SummaryFormatRule.passes(&msg(&format!("[J#PROJ-123][{}] some text", t))));
        }
    }

    #[test]
    fn test_summary_format_requires_space() {
        let outcome = SummaryFormatRule.evaluate(&msg("[BUG]no space"));
        assert_eq!(outcome, RuleOutcome::Fail(FailureCode::InvalidSummaryFormat));
        assert!(!SummaryFormatRule.passes(&msg("[BUG] ")));
    }

    #[test]
    fn test_summary_format_ticket_shape() {
        assert!(SummaryFormatRule.passes(&msg("[J#proj1-9][BUG] ok")));
        assert!(!SummaryFormatRule.passes(&msg("[J#PROJ][BUG] no number")));
        assert!(!SummaryFormatRule.passes(&msg("[j#PROJ-1][BUG] lower prefix")));
        assert!(!SummaryFormatRule.passes(&msg("[JJ#PROJ-1][BUG] long prefix")));
        assert!(!SummaryFormatRule.passes(&msg("[J#PROJ-1a][BUG] bad suffix")));
    }

    #[test]
    fn test_summary_format_unknown_type() {
        assert!(!SummaryFormatRule.passes(&msg("[FIX] x")));
        assert!(!SummaryFormatRule.passes(&msg("[J#PROJ-1][FEAT] x")));
    }

    #[test]
    fn test_commit_type_rule() {
        assert!(CommitTypeRule.evaluate(&msg("[DOCS] x")).is_ok());
        assert!(CommitTypeRule.evaluate(&msg("[J#PROJ-1][DOCS]x")).is_ok());
        assert_eq!(
            CommitTypeRule.evaluate(&msg("Fix things")).failure(),
            Some(FailureCode::MissingOrInvalidType)
        );
        assert!(!CommitTypeRule.evaluate(&msg("[FEAT] x")).is_ok());
        assert!(!CommitTypeRule.evaluate(&msg(" [BUG] leading space")).is_ok());
    }

    #[test]
    fn test_rules_disagree_on_loose_ticket_tag() {
        let message = msg("[J#PROJ][BUG] missing ticket number");
        assert!(CommitTypeRule.passes(&message));
        assert!(!SummaryFormatRule.passes(&message));
    }

    #[test]
    fn test_separator_single_line_passes() {
        assert!(SeparatorRule.passes(&msg("anything at all")));
        assert!(SeparatorRule.passes(&msg("")));
    }

    #[test]
    fn test_separator_blank_second_line() {
        assert!(SeparatorRule.passes(&msg("[BUG] fix\n\nbody")));
        assert!(SeparatorRule.passes(&msg("[BUG] fix\n   \t\nbody")));
        assert!(SeparatorRule.passes(&msg("[BUG] fix\n")));
    }

    #[test]
    fn test_separator_non_blank_second_line() {
        let outcome = SeparatorRule.evaluate(&msg("[BUG] fix\nSome description"));
        assert_eq!(
            outcome,
            RuleOutcome::Fail(FailureCode::NoSeparatorAfterSummary)
        );
    }

    #[test]
    fn test_builtin_rule_order() {
        let codes: Vec<_> = builtin_rules().iter().map(|r| r.code()).collect();
        assert_eq!(
            codes,
            vec![
                FailureCode::InvalidSummaryFormat,
                FailureCode::MissingOrInvalidType,
                FailureCode::NoSeparatorAfterSummary,
            ]
        );
    }
}
