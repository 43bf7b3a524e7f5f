use crate::device::ChangeRequest;
use crate::executor::Command;

/// Builds the forward commands that ensure each loopback and set its description.
pub struct ChangePlanner;

impl ChangePlanner {
    /// `interface <id>` then `description <text>` per request, in input order.
    pub fn plan(changes: &[ChangeRequest]) -> Vec<Command> {
        changes
            .iter()
            .flat_map(|change| {
                [
                    Command::open_interface(change.loopback),
                    Command::set_description(change.description()),
                ]
            })
            .collect()
    }

    /// Commit lines appended to an applied batch.
    ///
    /// With `confirmed_secs > 0` the change is committed with an automatic
    /// device-side revert timer, then confirmed.
    pub fn commit_commands(confirmed_secs: u32) -> Vec<Command> {
        if confirmed_secs > 0 {
            vec![
                Command::new(format!("commit confirmed {}", confirmed_secs)),
                Command::from("commit"),
            ]
        } else {
            vec![Command::from("commit")]
        }
    }
}
