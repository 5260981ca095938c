// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Command dispatch and execution.

use std::io::Read;

use crate::ci::{self, CiPlan};
use crate::config::{CmcConfig, CommitType};
use crate::error::{CmcError, Result, ResultExt};
use crate::git::{CommitSource, GitCli, RepoSource};
use crate::report;
use crate::rules::{FailureCode, ValidationOutcome, Validator};

use super::args::{CheckArgs, Cli, Commands, HookArgs, HooksAction, MessageArgs, OutputFormat};

/// Run the CLI with the given arguments.
pub fn run(cli: Cli) -> Result<()> {
    // Load configuration
    let config = if let Some(config_path) = &cli.config {
        CmcConfig::load_from(config_path)?
    } else {
        CmcConfig::load()?
    };

    // Dispatch to the appropriate command handler
    match &cli.command {
        Commands::Check(args) => run_check(&cli, &config, args),
        Commands::Message(args) => run_message(&cli, &config, args),
        Commands::Hook(args) => run_hook(&cli, &config, args),
        Commands::Ci => run_ci(&cli, &config),
        Commands::Hooks(args) => run_hooks(&config, &args.action),
        Commands::Explain { code } => run_explain(code.as_deref()),
        Commands::Version => run_version(),
    }
}

/// Run the check command.
fn run_check(cli: &Cli, config: &CmcConfig, args: &CheckArgs) -> Result<()> {
    tracing::debug!("Running check command with args: {:?}", args);

    let source: Box<dyn CommitSource> = if args.shell {
        Box::new(GitCli::new())
    } else {
        Box::new(RepoSource::current()?)
    };

    let outcomes = check_target(source.as_ref(), &args.target, args.is_range())?;
    finish(cli, config, &outcomes)
}

/// Run the message command.
fn run_message(cli: &Cli, config: &CmcConfig, args: &MessageArgs) -> Result<()> {
    let message = match &args.text {
        Some(text) => text.clone(),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read message from stdin")?;
            buf
        }
    };

    let outcome = Validator::global().validate(&message);
    finish(cli, config, &[outcome])
}

/// Run the hook command.
fn run_hook(cli: &Cli, config: &CmcConfig, args: &HookArgs) -> Result<()> {
    let message = std::fs::read_to_string(&args.file)
        .context(format!("Failed to read {}", args.file.display()))?;

    let outcome = Validator::global().validate(&message);
    let invalid = print_report(cli, config, std::slice::from_ref(&outcome))?;

    if invalid == 0 || args.block || config.hooks.block {
        exit_status(invalid)
    } else {
        tracing::debug!("Invalid message accepted, hook is not blocking");
        Ok(())
    }
}

/// Run the ci command.
fn run_ci(cli: &Cli, config: &CmcConfig) -> Result<()> {
    let plan = ci::plan(&config.ci, |key| std::env::var(key).ok())?;
    tracing::debug!("CI plan: {:?}", plan);

    let outcomes = match plan {
        CiPlan::Skip { reason } => {
            println!("{}", reason);
            return Ok(());
        }
        CiPlan::Range(range) => check_target(&RepoSource::current()?, &range, true)?,
        CiPlan::Commit(sha) => check_target(&RepoSource::current()?, &sha, false)?,
    };

    finish(cli, config, &outcomes)
}

/// Run the hooks command.
fn run_hooks(config: &CmcConfig, action: &HooksAction) -> Result<()> {
    use crate::hooks::HookManager;

    tracing::debug!("Running hooks command");

    let manager = HookManager::new()?;

    match action {
        HooksAction::Install { force, block } => {
            manager.install_all(*force, *block || config.hooks.block)?;
            println!("✓ Installed commit-msg hook");
        }
        HooksAction::Uninstall => {
            manager.uninstall_all()?;
            println!("✓ Uninstalled commit-msg hook");
        }
        HooksAction::Status => {
            for (hook, installed) in manager.status()? {
                let icon = if installed { "✓" } else { "✗" };
                println!("{} {}", icon, hook);
            }
        }
    }

    Ok(())
}

/// Run the explain command.
fn run_explain(code: Option<&str>) -> Result<()> {
    match code {
        Some(code) => {
            let failure = code
                .parse::<FailureCode>()
                .map_err(|_| CmcError::WithContext {
                    context: "explain".to_string(),
                    message: format!("Unknown rule ID '{}'", code),
                })?;
            println!("{}: {}", failure, failure.explanation());
        }
        None => {
            for failure in FailureCode::all() {
                println!("{}: {}", failure, failure.explanation());
            }
            println!();
            println!("Commit types:");
            for commit_type in CommitType::all() {
                println!("  {:<10} {}", commit_type.as_str(), commit_type.description());
            }
        }
    }

    Ok(())
}

/// Run the version command.
fn run_version() -> Result<()> {
    println!("cmc {}", crate::version::version_string());

    if let Some(sha) = crate::version::GIT_SHA {
        println!("git commit: {}", sha);
    }
    if let Some(date) = crate::version::GIT_COMMIT_DATE {
        println!("commit date: {}", date);
    }

    Ok(())
}

/// Resolve and validate a commit or range on a fresh runtime.
fn check_target<C>(source: &C, target: &str, is_range: bool) -> Result<Vec<ValidationOutcome>>
where
    C: CommitSource + ?Sized,
{
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        let validator = Validator::global();
        if is_range {
            validator.validate_range(source, target).await
        } else {
            validator.validate_refs(source, &[target]).await
        }
    })
}

/// Print the report and turn invalid messages into a failing exit status.
fn finish(cli: &Cli, config: &CmcConfig, outcomes: &[ValidationOutcome]) -> Result<()> {
    let invalid = print_report(cli, config, outcomes)?;
    exit_status(invalid)
}

/// Print the report, returning the number of invalid outcomes.
fn print_report(cli: &Cli, config: &CmcConfig, outcomes: &[ValidationOutcome]) -> Result<usize> {
    let invalid = outcomes.iter().filter(|o| !o.is_valid()).count();

    match cli.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report::render_json(outcomes))
                .context("Failed to serialize report")?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            let color = !cli.no_color && config.ui.color && console::colors_enabled();
            print!("{}", report::render_text(outcomes, color));
            if invalid > 0 {
                println!();
            }
            println!("{}", report::summary_line(outcomes));
            if invalid > 0 && config.ui.hints {
                println!("{}", report::hint(color));
            }
        }
    }

    Ok(invalid)
}

fn exit_status(invalid: usize) -> Result<()> {
    if invalid > 0 {
        Err(CmcError::Validation { invalid })
    } else {
        Ok(())
    }
}
