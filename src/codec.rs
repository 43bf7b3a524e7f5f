//! Rollback command files: one command per line, `\n` terminated.

use crate::error::Result;
use crate::executor::{Command, CommandValidator};
use std::fs;
use std::path::Path;

/// Serialize commands, one per line with a trailing terminator.
pub fn encode(commands: &[Command]) -> Result<String> {
    CommandValidator::new().validate_all(commands)?;

    let mut text = String::new();
    for command in commands {
        text.push_str(command.as_str());
        text.push('\n');
    }
    Ok(text)
}

/// Parse a command file; blank lines are skipped and lines are trimmed.
pub fn decode(text: &str) -> Vec<Command> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(Command::from)
        .collect()
}

pub fn write_file(path: &Path, commands: &[Command]) -> Result<()> {
    let text = encode(commands)?;
    fs::write(path, text)?;
    tracing::debug!(path = %path.display(), commands = commands.len(), "wrote command file");
    Ok(())
}

pub fn read_file(path: &Path) -> Result<Vec<Command>> {
    let text = fs::read_to_string(path)?;
    Ok(decode(&text))
}
