use crate::commands::{apply_and_commit, backup_running, finish_session, read_running};
use crate::error::{Result, XrError};
use crate::executor::{Command, CommandExecutor};
use crate::ui::ConfirmPrompt;
use std::path::{Path, PathBuf};

/// What an applied rollback did on the device
#[derive(Debug)]
pub struct RollbackReport {
    pub backup: PathBuf,
    pub before: String,
    pub after: String,
}

/// Apply a rollback command file and commit it.
///
/// The device is backed up first; the session is closed on every path.
pub async fn execute_rollback<E: CommandExecutor + ?Sized>(
    executor: &mut E,
    commands: &[Command],
    backup_dir: &Path,
    commit_confirmed_secs: u32,
    confirm: bool,
) -> Result<RollbackReport> {
    if commands.is_empty() {
        return Err(XrError::MissingInput("rollback file contains no commands".to_string()));
    }

    executor.open().await?;
    let outcome =
        rollback_in_session(executor, commands, backup_dir, commit_confirmed_secs, confirm).await;
    finish_session(executor, outcome).await
}

async fn rollback_in_session<E: CommandExecutor + ?Sized>(
    executor: &mut E,
    commands: &[Command],
    backup_dir: &Path,
    commit_confirmed_secs: u32,
    confirm: bool,
) -> Result<RollbackReport> {
    let (before, backup) = backup_running(executor, backup_dir).await?;

    if confirm && !ConfirmPrompt::new().confirm_apply(executor.name(), commands)? {
        return Err(XrError::UserCancelled);
    }

    apply_and_commit(executor, commands, commit_confirmed_secs).await?;
    let after = read_running(executor).await?;

    Ok(RollbackReport {
        backup,
        before,
        after,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::RecordedExecutor;

    #[tokio::test]
    async fn test_rollback_applies_file_commands() {
        let dir = tempfile::tempdir().unwrap();
        let mut executor = RecordedExecutor::new()
            .with_response("show running-config", "interface Loopback100\n description new\n");
        let commands = vec![Command::from("no interface Loopback100")];

        let report = execute_rollback(&mut executor, &commands, dir.path(), 0, false)
            .await
            .unwrap();

        assert_eq!(
            executor.batches(),
            &[vec![Command::from("no interface Loopback100"), Command::from("commit")]]
        );
        assert!(report.backup.exists());
        assert!(executor.was_closed());
    }

    #[tokio::test]
    async fn test_empty_rollback_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut executor = RecordedExecutor::new();

        let err = execute_rollback(&mut executor, &[], dir.path(), 0, false)
            .await
            .unwrap_err();

        assert!(matches!(err, XrError::MissingInput(_)));
        assert!(executor.queries().is_empty());
    }
}
