// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Human and machine readable reports for validation outcomes.
//!
//! Only failing outcomes are rendered in text reports; a clean run prints
//! nothing but the summary line.

use console::{pad_str, Alignment, Style};
use serde_json::{json, Value};

use crate::rules::ValidationOutcome;

const CODE_WIDTH: usize = 28;
const EXPLANATION_WIDTH: usize = 60;

/// Styles used by the text report.
struct Palette {
    header: Style,
    message: Style,
    code: Style,
    dim: Style,
}

impl Palette {
    fn new(color: bool) -> Self {
        Self {
            header: Style::new().red().bold().underlined().force_styling(color),
            message: Style::new().white().bold().force_styling(color),
            code: Style::new().red().force_styling(color),
            dim: Style::new().dim().force_styling(color),
        }
    }
}

/// Render a text report for every invalid outcome.
pub fn render_text(outcomes: &[ValidationOutcome], color: bool) -> String {
    let palette = Palette::new(color);
    let mut output = String::new();

    for outcome in outcomes.iter().filter(|o| !o.is_valid()) {
        let header = match outcome.short_sha() {
            Some(sha) => format!("The following commit message ({}) failed validation:", sha),
            None => "The following commit message failed validation:".to_string(),
        };
        output.push_str(&format!("\n{}\n\n", palette.header.apply_to(header)));
        output.push_str(&format!(
            "{}\n\n",
            palette.message.apply_to(outcome.message.trim_end())
        ));
        output.push_str(&render_table(outcome, &palette));
    }

    output
}

/// Render the failure table for one outcome.
fn render_table(outcome: &ValidationOutcome, palette: &Palette) -> String {
    let mut output = format!(
        "{} {}\n{}\n",
        pad_str("Rule ID", CODE_WIDTH, Alignment::Left, None),
        "Message",
        "-".repeat(CODE_WIDTH + 1 + EXPLANATION_WIDTH)
    );

    for failure in &outcome.failures {
        let lines = wrap(failure.explanation(), EXPLANATION_WIDTH);
        for (i, line) in lines.iter().enumerate() {
            let code = if i == 0 { failure.as_str() } else { "" };
            output.push_str(&format!(
                "{} {}\n",
                palette
                    .code
                    .apply_to(pad_str(code, CODE_WIDTH, Alignment::Left, None)),
                line
            ));
        }
    }

    output
}

/// Greedy word wrap. Words longer than `width` get a line of their own.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Render outcomes as a JSON array.
pub fn render_json(outcomes: &[ValidationOutcome]) -> Value {
    Value::Array(
        outcomes
            .iter()
            .map(|outcome| {
                json!({
                    "commit": outcome.commit_sha,
                    "message": outcome.message,
                    "valid": outcome.is_valid(),
                    "special": outcome.special,
                    "failures": outcome.failures.iter().map(|f| {
                        json!({
                            "code": f.as_str(),
                            "explanation": f.explanation(),
                        })
                    }).collect::<Vec<_>>(),
                })
            })
            .collect(),
    )
}

/// One line summary, e.g. `3 commit(s) checked, 1 invalid`.
pub fn summary_line(outcomes: &[ValidationOutcome]) -> String {
    let invalid = outcomes.iter().filter(|o| !o.is_valid()).count();
    format!("{} commit(s) checked, {} invalid", outcomes.len(), invalid)
}

/// Hint printed after a failing text report.
pub fn hint(color: bool) -> String {
    Palette::new(color)
        .dim
        .apply_to("Run `cmc explain <RULE ID>` for details on a failure.")
        .to_string()
}
