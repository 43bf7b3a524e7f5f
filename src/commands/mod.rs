pub mod apply;
pub mod rollback;

pub use apply::{execute_apply, load_targets, ApplyOptions, ApplyReport};
pub use rollback::{execute_rollback, RollbackReport};

use crate::backup;
use crate::error::Result;
use crate::executor::{ChangePlanner, Command, CommandExecutor, CommandValidator};
use crate::ui;
use colored::*;
use std::path::{Path, PathBuf};

const SHOW_RUNNING: &str = "show running-config";

/// Grab the full running-config.
pub async fn read_running<E: CommandExecutor + ?Sized>(executor: &mut E) -> Result<String> {
    executor.send(SHOW_RUNNING).await
}

/// Read the running-config and save it under `backup_dir` before any change.
pub async fn backup_running<E: CommandExecutor + ?Sized>(
    executor: &mut E,
    backup_dir: &Path,
) -> Result<(String, PathBuf)> {
    let spinner = ui::create_spinner("Reading running-config...");
    let running = match read_running(executor).await {
        Ok(running) => running,
        Err(e) => {
            ui::finish_err(&spinner, "running-config read failed");
            return Err(e);
        }
    };

    let path = backup::save_running_config(backup_dir, executor.name(), &running)?;
    ui::finish_ok(&spinner, &format!("Backup saved: {}", path.display()));
    Ok((running, path))
}

/// Apply configuration commands and commit them in the same config session.
pub async fn apply_and_commit<E: CommandExecutor + ?Sized>(
    executor: &mut E,
    commands: &[Command],
    commit_confirmed_secs: u32,
) -> Result<String> {
    let mut batch = commands.to_vec();
    batch.extend(ChangePlanner::commit_commands(commit_confirmed_secs));
    CommandValidator::new().validate_all(&batch)?;

    if commit_confirmed_secs > 0 {
        eprintln!(
            "{} commit confirmed {} (finalized after validation)",
            "[*]".cyan(),
            commit_confirmed_secs
        );
    }

    let response = executor.apply_batch(&batch).await?;
    println!("\n{}\n{}", "=== device response ===".cyan().bold(), response.trim_end());
    Ok(response)
}

/// Close the session after a run, keeping the run's own error if it failed.
pub async fn finish_session<E, T>(executor: &mut E, outcome: Result<T>) -> Result<T>
where
    E: CommandExecutor + ?Sized,
{
    match executor.close().await {
        Ok(()) => outcome,
        Err(close_err) if outcome.is_err() => {
            tracing::warn!(error = %close_err, "failed to close session after error");
            outcome
        }
        Err(close_err) => Err(close_err),
    }
}

/// Print the before/after running-config diff.
pub fn show_diff(before: &str, after: &str, max_lines: usize) {
    println!("\n{}", "=== running-config diff (before → after) ===".cyan().bold());
    match crate::diff::render(before, after, max_lines) {
        Some(diff) => print!("{}", diff),
        None => println!("(no changes detected)"),
    }
}
