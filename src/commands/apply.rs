use crate::cli::Cli;
use crate::codec;
use crate::commands::{apply_and_commit, backup_running, finish_session, read_running};
use crate::device::{probe, request, ChangeRequest, InterfaceSnapshot, LoopbackId};
use crate::error::{Result, XrError};
use crate::executor::{ChangePlanner, CommandExecutor, RollbackPlan, RollbackSynthesizer};
use crate::ui::{self, ConfirmPrompt};
use colored::*;
use std::collections::HashMap;
use std::path::PathBuf;

/// Settings for one apply run
#[derive(Debug, Clone)]
pub struct ApplyOptions {
    pub dry_run: bool,
    pub generate_rollback: Option<PathBuf>,
    pub delete_empty: bool,
    pub commit_confirmed_secs: u32,
    pub backup_dir: PathBuf,
    pub confirm: bool,
}

/// What an apply run did on the device
#[derive(Debug)]
pub struct ApplyReport {
    pub backup: PathBuf,
    pub rollback: Option<RollbackPlan>,
    pub before: String,
    /// Running-config after commit; `None` when nothing was applied
    pub after: Option<String>,
}

/// Build the change batch from the CLI: single loopback or CSV bulk mode.
pub fn load_targets(cli: &Cli) -> Result<Vec<ChangeRequest>> {
    if let Some(csv_path) = &cli.csv {
        return request::load_csv(csv_path);
    }

    match (&cli.loopback, &cli.description) {
        (Some(loopback), Some(description)) => {
            Ok(vec![ChangeRequest::parse(loopback, description)?])
        }
        _ => Err(XrError::MissingInput(
            "Provide LOOPBACK + --description, or use --csv for bulk mode.".to_string(),
        )),
    }
}

/// Probe each distinct interface once, in batch order.
///
/// All probes finish before anything is applied, so every snapshot reflects
/// the device strictly before this run's changes.
pub async fn probe_all<E: CommandExecutor + ?Sized>(
    executor: &mut E,
    changes: &[ChangeRequest],
) -> Result<HashMap<LoopbackId, InterfaceSnapshot>> {
    let mut snapshots = HashMap::new();
    let bar = ui::create_progress_bar(changes.len() as u64);

    for change in changes {
        let loopback = change.loopback;
        bar.set_message(loopback.to_string());

        if !snapshots.contains_key(&loopback) {
            match probe(executor, loopback).await {
                Ok(snapshot) => {
                    snapshots.insert(loopback, snapshot);
                }
                Err(e) => {
                    ui::finish_err(&bar, &format!("probe of {} failed", loopback));
                    return Err(e);
                }
            }
        }
        bar.inc(1);
    }

    ui::finish_ok(&bar, &format!("Probed {} interface(s)", snapshots.len()));
    Ok(snapshots)
}

/// Run the apply workflow inside one device session.
///
/// backup → (probe + rollback file) → apply + commit → read back.
/// The session is closed on every path.
pub async fn execute_apply<E: CommandExecutor + ?Sized>(
    executor: &mut E,
    changes: &[ChangeRequest],
    options: &ApplyOptions,
) -> Result<ApplyReport> {
    if changes.is_empty() {
        return Err(XrError::MissingInput("no loopbacks to change".to_string()));
    }

    executor.open().await?;
    let outcome = apply_in_session(executor, changes, options).await;
    finish_session(executor, outcome).await
}

async fn apply_in_session<E: CommandExecutor + ?Sized>(
    executor: &mut E,
    changes: &[ChangeRequest],
    options: &ApplyOptions,
) -> Result<ApplyReport> {
    let (before, backup) = backup_running(executor, &options.backup_dir).await?;

    let mut rollback = None;
    if let Some(path) = &options.generate_rollback {
        let snapshots = probe_all(executor, changes).await?;
        let plan = RollbackSynthesizer::synthesize(&snapshots, changes, options.delete_empty)?;

        codec::write_file(path, plan.commands())?;
        ui::print_commands(
            &format!("Rollback file generated: {}", path.display()),
            plan.commands(),
        );
        rollback = Some(plan);
    }

    if options.dry_run {
        let note = if rollback.is_some() {
            "--dry-run: rollback generated only."
        } else {
            "--dry-run: preview only; no changes made."
        };
        println!("\n{}", note.yellow());
        return Ok(ApplyReport {
            backup,
            rollback,
            before,
            after: None,
        });
    }

    let planned = ChangePlanner::plan(changes);
    if options.confirm && !ConfirmPrompt::new().confirm_apply(executor.name(), &planned)? {
        return Err(XrError::UserCancelled);
    }

    apply_and_commit(executor, &planned, options.commit_confirmed_secs).await?;
    let after = read_running(executor).await?;

    Ok(ApplyReport {
        backup,
        rollback,
        before,
        after: Some(after),
    })
}
