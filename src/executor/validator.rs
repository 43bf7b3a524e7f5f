use crate::error::{Result, XrError};
use crate::executor::Command;

pub struct CommandValidator;

impl CommandValidator {
    const LINE_TERMINATORS: &'static [char] = &['\n', '\r'];

    pub fn new() -> Self {
        Self
    }

    /// A command must be exactly one non-blank line of text with no
    /// surrounding whitespace, so it reads back unchanged from a command file.
    pub fn validate(&self, command: &Command) -> Result<()> {
        let line = command.as_str();

        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed != line || line.contains(Self::LINE_TERMINATORS) {
            return Err(XrError::InvalidCommand(line.to_string()));
        }

        Ok(())
    }

    pub fn validate_all(&self, commands: &[Command]) -> Result<()> {
        commands.iter().try_for_each(|command| self.validate(command))
    }
}

impl Default for CommandValidator {
    fn default() -> Self {
        Self::new()
    }
}
