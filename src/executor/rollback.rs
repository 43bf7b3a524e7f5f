//! Rollback generation for loopback description changes
//!
//! Undo is not "re-apply the old description". Each changed interface was in
//! one of three states before the change, and each needs its own reversal:
//!
//! ```text
//! before the change                 rollback block
//! ───────────────────────────────   ─────────────────────────────────────
//! no stanza                         no interface LoopbackN
//! stanza with description only      no interface LoopbackN   (delete_trivial)
//!   (or nothing at all)             interface LoopbackN + restore/clear
//! stanza with other config          interface LoopbackN
//!                                   description <old> | no description
//! ```
//!
//! Blocks are independent of each other and emitted in the order of the
//! change batch, so a generated file is reproducible line for line.

use crate::device::{is_trivial, ChangeRequest, InterfaceSnapshot, LoopbackId};
use crate::error::{Result, XrError};
use crate::executor::Command;
use std::collections::HashMap;

/// Ordered rollback commands for one change batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollbackPlan {
    commands: Vec<Command>,
}

impl RollbackPlan {
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Rollback synthesizer - turns pre-change snapshots into undo commands
pub struct RollbackSynthesizer;

impl RollbackSynthesizer {
    /// Generate the rollback for `changes`.
    ///
    /// Every changed interface must have been probed first; a missing
    /// snapshot is a caller bug and fails with `MissingSnapshot`.
    pub fn synthesize(
        snapshots: &HashMap<LoopbackId, InterfaceSnapshot>,
        changes: &[ChangeRequest],
        delete_trivial: bool,
    ) -> Result<RollbackPlan> {
        let mut commands = Vec::with_capacity(changes.len() * 2);

        for change in changes {
            let loopback = change.loopback;
            let snapshot = snapshots
                .get(&loopback)
                .ok_or_else(|| XrError::MissingSnapshot(loopback.to_string()))?;

            commands.extend(Self::revert_block(loopback, snapshot, delete_trivial));
        }

        tracing::info!(
            changes = changes.len(),
            commands = commands.len(),
            delete_trivial,
            "synthesized rollback"
        );

        Ok(RollbackPlan { commands })
    }

    fn revert_block(
        loopback: LoopbackId,
        snapshot: &InterfaceSnapshot,
        delete_trivial: bool,
    ) -> Vec<Command> {
        // did not exist before: remove it entirely
        if !snapshot.exists {
            return vec![Command::destroy_interface(loopback)];
        }

        if delete_trivial && is_trivial(snapshot.sub_lines.as_slice()) {
            return vec![Command::destroy_interface(loopback)];
        }

        // real config lives here; only the description is reverted
        let restore = match &snapshot.description {
            Some(description) => Command::set_description(description),
            None => Command::clear_description(),
        };

        vec![Command::open_interface(loopback), restore]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: &str) -> LoopbackId {
        LoopbackId::normalize(raw).unwrap()
    }

    fn lines(plan: &RollbackPlan) -> Vec<&str> {
        plan.commands().iter().map(Command::as_str).collect()
    }

    fn existing(description: Option<&str>, sub_lines: &[&str]) -> InterfaceSnapshot {
        InterfaceSnapshot {
            exists: true,
            description: description.map(str::to_string),
            sub_lines: sub_lines.iter().map(|l| l.to_string()).collect(),
        }
    }

    fn synthesize_one(snapshot: InterfaceSnapshot, delete_trivial: bool) -> RollbackPlan {
        let snapshots = HashMap::from([(id("1"), snapshot)]);
        let changes = vec![ChangeRequest::parse("1", "new").unwrap()];
        RollbackSynthesizer::synthesize(&snapshots, &changes, delete_trivial).unwrap()
    }

    #[test]
    fn test_absent_interface_is_deleted() {
        for delete_trivial in [true, false] {
            let plan = synthesize_one(InterfaceSnapshot::absent(), delete_trivial);
            assert_eq!(lines(&plan), vec!["no interface Loopback1"]);
        }
    }

    #[test]
    fn test_trivial_interface_is_deleted() {
        let plan = synthesize_one(existing(Some("old"), &["description old"]), true);
        assert_eq!(lines(&plan), vec!["no interface Loopback1"]);
    }

    #[test]
    fn test_trivial_interface_kept_restores_description() {
        let plan = synthesize_one(existing(Some("old"), &["description old"]), false);
        assert_eq!(lines(&plan), vec!["interface Loopback1", "description old"]);
    }

    #[test]
    fn test_bare_interface_kept_clears_description() {
        let plan = synthesize_one(existing(None, &[]), false);
        assert_eq!(lines(&plan), vec!["interface Loopback1", "no description"]);
    }

    #[test]
    fn test_configured_interface_is_restored() {
        for delete_trivial in [true, false] {
            let plan = synthesize_one(existing(None, &["mtu 9000"]), delete_trivial);
            assert_eq!(lines(&plan), vec!["interface Loopback1", "no description"]);

            let plan = synthesize_one(
                existing(Some("core"), &["description core", "ipv4 address 10.0.0.1/32"]),
                delete_trivial,
            );
            assert_eq!(lines(&plan), vec!["interface Loopback1", "description core"]);
        }
    }

    #[test]
    fn test_missing_snapshot() {
        let changes = vec![ChangeRequest::parse("9", "x").unwrap()];
        let err = RollbackSynthesizer::synthesize(&HashMap::new(), &changes, true).unwrap_err();

        assert!(matches!(err, XrError::MissingSnapshot(ref name) if name == "Loopback9"));
    }

    #[test]
    fn test_empty_batch() {
        let plan = RollbackSynthesizer::synthesize(&HashMap::new(), &[], true).unwrap();
        assert!(plan.is_empty());
    }
}
