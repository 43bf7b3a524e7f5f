//! Recorded device fixture.
//!
//! `RecordedExecutor` answers queries from pre-recorded device output and
//! records every query and applied batch, so probe/rollback logic can be
//! exercised without a device.

use crate::error::{Result, XrError};
use crate::executor::{Command, CommandExecutor};
use async_trait::async_trait;
use std::collections::HashMap;

pub struct RecordedExecutor {
    responses: HashMap<String, String>,
    queries: Vec<String>,
    batches: Vec<Vec<Command>>,
    apply_response: String,
    fail_apply: Option<String>,
    opened: bool,
    closed: bool,
}

impl RecordedExecutor {
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
            queries: Vec::new(),
            batches: Vec::new(),
            apply_response: String::new(),
            fail_apply: None,
            opened: false,
            closed: false,
        }
    }

    /// Pre-load the output for a query. Unknown queries answer with empty text.
    pub fn with_response(mut self, query: &str, output: &str) -> Self {
        self.responses.insert(query.to_string(), output.to_string());
        self
    }

    /// Device response returned for every applied batch.
    pub fn with_apply_response(mut self, response: &str) -> Self {
        self.apply_response = response.to_string();
        self
    }

    /// Make every `apply_batch` fail with this device message.
    pub fn failing_apply(mut self, message: &str) -> Self {
        self.fail_apply = Some(message.to_string());
        self
    }

    pub fn queries(&self) -> &[String] {
        &self.queries
    }

    pub fn batches(&self) -> &[Vec<Command>] {
        &self.batches
    }

    pub fn is_open(&self) -> bool {
        self.opened && !self.closed
    }

    pub fn was_closed(&self) -> bool {
        self.closed
    }
}

impl Default for RecordedExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandExecutor for RecordedExecutor {
    fn name(&self) -> &str {
        "recorded"
    }

    async fn open(&mut self) -> Result<()> {
        self.opened = true;
        Ok(())
    }

    async fn send(&mut self, query: &str) -> Result<String> {
        self.queries.push(query.to_string());
        Ok(self.responses.get(query).cloned().unwrap_or_default())
    }

    async fn apply_batch(&mut self, commands: &[Command]) -> Result<String> {
        if let Some(message) = &self.fail_apply {
            return Err(XrError::Executor(message.clone()));
        }
        self.batches.push(commands.to_vec());
        Ok(self.apply_response.clone())
    }

    async fn close(&mut self) -> Result<()> {
        self.closed = true;
        Ok(())
    }
}
