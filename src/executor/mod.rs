pub mod planner;
pub mod recorded;
pub mod rollback;
pub mod runner;
pub mod validator;

use crate::device::classifier::DESCRIPTION_PREFIX;
use crate::device::LoopbackId;
use crate::error::Result;
use async_trait::async_trait;
use std::fmt;

pub use planner::ChangePlanner;
pub use recorded::RecordedExecutor;
pub use rollback::{RollbackPlan, RollbackSynthesizer};
pub use runner::SshExecutor;
pub use validator::CommandValidator;

/// One line of device configuration text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Command(String);

impl Command {
    pub fn new(line: impl Into<String>) -> Self {
        Self(line.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `interface LoopbackN` (creates the interface if absent)
    pub fn open_interface(loopback: LoopbackId) -> Self {
        Self(format!("interface {}", loopback))
    }

    /// `no interface LoopbackN`
    pub fn destroy_interface(loopback: LoopbackId) -> Self {
        Self(format!("no interface {}", loopback))
    }

    pub fn set_description(description: &str) -> Self {
        Self(format!("{}{}", DESCRIPTION_PREFIX, description))
    }

    pub fn clear_description() -> Self {
        Self("no description".to_string())
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Command {
    fn from(line: &str) -> Self {
        Self::new(line)
    }
}

impl From<String> for Command {
    fn from(line: String) -> Self {
        Self(line)
    }
}

/// Device session capability.
///
/// Calls are issued strictly one at a time; `&mut self` keeps a single
/// in-flight request per session.
#[async_trait]
pub trait CommandExecutor: Send {
    /// Session name for logs (e.g. the device host)
    fn name(&self) -> &str;

    /// Acquire the session. Called once before any query.
    async fn open(&mut self) -> Result<()> {
        Ok(())
    }

    /// Run a read-only query and return the device output.
    async fn send(&mut self, query: &str) -> Result<String>;

    /// Apply a configuration batch and return the device response.
    async fn apply_batch(&mut self, commands: &[Command]) -> Result<String>;

    /// Release the session. Must be safe to call after a failed run.
    async fn close(&mut self) -> Result<()> {
        Ok(())
    }
}
