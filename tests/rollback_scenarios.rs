use std::collections::HashMap;

use xr_loopback::codec;
use xr_loopback::commands::{execute_apply, execute_rollback, ApplyOptions};
use xr_loopback::device::{is_trivial, ChangeRequest, InterfaceSnapshot, LoopbackId};
use xr_loopback::executor::{ChangePlanner, Command, RecordedExecutor, RollbackSynthesizer};
use xr_loopback::XrError;

fn id(raw: &str) -> LoopbackId {
    LoopbackId::normalize(raw).unwrap()
}

fn change(raw: &str, description: &str) -> ChangeRequest {
    ChangeRequest::parse(raw, description).unwrap()
}

fn lines(commands: &[Command]) -> Vec<&str> {
    commands.iter().map(Command::as_str).collect()
}

fn snapshot(exists: bool, description: Option<&str>, sub_lines: &[&str]) -> InterfaceSnapshot {
    InterfaceSnapshot {
        exists,
        description: description.map(str::to_string),
        sub_lines: sub_lines.iter().map(|l| l.to_string()).collect(),
    }
}

fn rollback_for(snapshot: InterfaceSnapshot, delete_trivial: bool) -> Vec<String> {
    let snapshots = HashMap::from([(id("Loopback1"), snapshot)]);
    let plan =
        RollbackSynthesizer::synthesize(&snapshots, &[change("1", "new")], delete_trivial).unwrap();
    plan.commands().iter().map(|c| c.to_string()).collect()
}

#[test]
fn normalization_collapses_padding_and_case() {
    let variants = ["42", "042", "0042", "Loopback42", "loopback042", "LOOPBACK0042"];
    let ids: Vec<LoopbackId> = variants.iter().map(|v| id(v)).collect();

    assert!(ids.iter().all(|i| *i == ids[0]));
    assert_eq!(ids[0].to_string(), "Loopback42");
}

#[test]
fn normalization_rejects_missing_digits() {
    for raw in ["Loopback", "loopbackX", "abc", "Loopback-3", "Loopback4.2"] {
        assert!(matches!(
            LoopbackId::normalize(raw),
            Err(XrError::InvalidIdentifier(_))
        ));
    }
}

#[test]
fn classifier_cases() {
    let none: [&str; 0] = [];
    assert!(is_trivial(&none));
    assert!(is_trivial(&["description X"]));
    assert!(!is_trivial(&["description X", "mtu 9000"]));
}

#[test]
fn codec_round_trip() {
    let cmds: Vec<Command> = ["no interface Loopback1", "interface Loopback2", "description a, b"]
        .into_iter()
        .map(Command::from)
        .collect();

    assert_eq!(codec::decode(&codec::encode(&cmds).unwrap()), cmds);
}

#[test]
fn scenario_a_absent_interface() {
    assert_eq!(rollback_for(snapshot(false, None, &[]), true), vec!["no interface Loopback1"]);
}

#[test]
fn scenario_b_trivial_interface_deleted() {
    let before = snapshot(true, Some("old"), &["description old"]);
    assert_eq!(rollback_for(before, true), vec!["no interface Loopback1"]);
}

#[test]
fn scenario_c_trivial_interface_kept() {
    let before = snapshot(true, Some("old"), &["description old"]);
    assert_eq!(
        rollback_for(before, false),
        vec!["interface Loopback1", "description old"]
    );
}

#[test]
fn scenario_d_configured_interface() {
    for delete_trivial in [true, false] {
        let before = snapshot(true, None, &["mtu 9000"]);
        assert_eq!(
            rollback_for(before, delete_trivial),
            vec!["interface Loopback1", "no description"]
        );
    }
}

#[test]
fn batch_order_follows_input_not_map() {
    let changes: Vec<ChangeRequest> = (0..32)
        .rev()
        .map(|n| change(&n.to_string(), "x"))
        .collect();
    let snapshots: HashMap<LoopbackId, InterfaceSnapshot> = changes
        .iter()
        .map(|c| {
            let before = if c.loopback.number() % 2 == 0 {
                InterfaceSnapshot::absent()
            } else {
                snapshot(true, None, &["mtu 1500"])
            };
            (c.loopback, before)
        })
        .collect();

    let plan = RollbackSynthesizer::synthesize(&snapshots, &changes, true).unwrap();

    let mut expected = Vec::new();
    for c in &changes {
        if c.loopback.number() % 2 == 0 {
            expected.push(format!("no interface {}", c.loopback));
        } else {
            expected.push(format!("interface {}", c.loopback));
            expected.push("no description".to_string());
        }
    }
    assert_eq!(lines(plan.commands()), expected);
}

#[test]
fn planner_mirrors_rollback_blocks() {
    let changes = vec![change("7", "seven"), change("3", "three")];
    assert_eq!(
        lines(&ChangePlanner::plan(&changes)),
        vec![
            "interface Loopback7",
            "description seven",
            "interface Loopback3",
            "description three",
        ]
    );
}

/// Apply a batch against a recorded device, then apply the generated rollback.
#[tokio::test]
async fn apply_then_rollback_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let rollback_file = dir.path().join("rollback.cmds");

    let mut device = RecordedExecutor::new()
        .with_response("show running-config", "hostname xr1\n")
        .with_response(
            "show running-config interface Loopback10",
            "interface Loopback10\n description only\n",
        )
        .with_response(
            "show running-config interface Loopback20",
            "\ninterface Loopback20\n ipv4 address 192.0.2.20 255.255.255.255\n",
        );

    let changes = vec![change("10", "ten"), change("20", "twenty"), change("30", "thirty")];
    let options = ApplyOptions {
        dry_run: false,
        generate_rollback: Some(rollback_file.clone()),
        delete_empty: true,
        commit_confirmed_secs: 0,
        backup_dir: dir.path().join("backups"),
        confirm: false,
    };

    execute_apply(&mut device, &changes, &options).await.unwrap();

    assert_eq!(
        lines(&device.batches()[0]),
        vec![
            "interface Loopback10",
            "description ten",
            "interface Loopback20",
            "description twenty",
            "interface Loopback30",
            "description thirty",
            "commit",
        ]
    );

    let rollback = codec::read_file(&rollback_file).unwrap();
    assert_eq!(
        lines(&rollback),
        vec![
            "no interface Loopback10",
            "interface Loopback20",
            "no description",
            "no interface Loopback30",
        ]
    );

    let mut device = RecordedExecutor::new();
    execute_rollback(&mut device, &rollback, &dir.path().join("backups"), 0, false)
        .await
        .unwrap();

    let applied = &device.batches()[0];
    assert_eq!(&applied[..rollback.len()], rollback.as_slice());
    assert_eq!(applied.last(), Some(&Command::from("commit")));
}

#[tokio::test]
async fn device_failure_aborts_before_apply() {
    struct Unreachable;

    #[async_trait::async_trait]
    impl xr_loopback::executor::CommandExecutor for Unreachable {
        fn name(&self) -> &str {
            "unreachable"
        }

        async fn send(&mut self, _query: &str) -> xr_loopback::Result<String> {
            Err(XrError::Executor("connection reset".to_string()))
        }

        async fn apply_batch(&mut self, _commands: &[Command]) -> xr_loopback::Result<String> {
            panic!("nothing may be applied after a failed probe");
        }
    }

    let dir = tempfile::tempdir().unwrap();
    let options = ApplyOptions {
        dry_run: false,
        generate_rollback: Some(dir.path().join("rollback.cmds")),
        delete_empty: true,
        commit_confirmed_secs: 0,
        backup_dir: dir.path().join("backups"),
        confirm: false,
    };

    let err = execute_apply(&mut Unreachable, &[change("1", "x")], &options)
        .await
        .unwrap_err();

    assert!(matches!(err, XrError::Executor(_)));
    assert!(!dir.path().join("rollback.cmds").exists());
}
