use crate::device::classifier::{is_description_line, DESCRIPTION_PREFIX};
use crate::device::identifier::LoopbackId;
use crate::error::Result;
use crate::executor::CommandExecutor;

/// Line that opens an interface stanza in running-config output
const STANZA_OPEN: &str = "interface ";

/// Pre-change state of one loopback stanza
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterfaceSnapshot {
    /// Whether a stanza is present
    pub exists: bool,
    /// Previous description, if any
    pub description: Option<String>,
    /// Trimmed lines under the stanza (excluding `interface ...`)
    pub sub_lines: Vec<String>,
}

impl InterfaceSnapshot {
    pub fn absent() -> Self {
        Self::default()
    }

    /// Parse the output of `show running-config interface <name>`.
    pub fn parse(output: &str) -> Self {
        let mut lines = output.lines().filter(|line| !line.trim().is_empty());

        match lines.next() {
            Some(first) if first.starts_with(STANZA_OPEN) => {}
            _ => return Self::absent(),
        }

        let sub_lines: Vec<String> = lines.map(|line| line.trim().to_string()).collect();

        // first declaration wins; a stanza normally carries only one
        let description = sub_lines
            .iter()
            .find(|line| is_description_line(line))
            .map(|line| line[DESCRIPTION_PREFIX.len()..].trim().to_string());

        Self {
            exists: true,
            description,
            sub_lines,
        }
    }
}

/// Query string for one interface's stanza
pub fn stanza_query(loopback: LoopbackId) -> String {
    format!("show running-config interface {}", loopback)
}

/// Probe a single loopback's running-config stanza.
///
/// One read-only round trip per interface; callers iterate over a batch.
pub async fn probe<E>(executor: &mut E, loopback: LoopbackId) -> Result<InterfaceSnapshot>
where
    E: CommandExecutor + ?Sized,
{
    let output = executor.send(&stanza_query(loopback)).await?;
    let snapshot = InterfaceSnapshot::parse(&output);

    tracing::debug!(
        %loopback,
        exists = snapshot.exists,
        description = ?snapshot.description,
        sub_lines = snapshot.sub_lines.len(),
        "probed interface"
    );

    Ok(snapshot)
}
