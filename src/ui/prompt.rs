use crate::error::{Result, XrError};
use crate::executor::Command;
use colored::*;
use dialoguer::Confirm;

pub struct ConfirmPrompt;

impl ConfirmPrompt {
    pub fn new() -> Self {
        Self
    }

    /// Ask before committing. Esc/q counts as "no"; a terminal failure is an
    /// I/O error, not a decline.
    pub fn confirm_apply(&self, host: &str, commands: &[Command]) -> Result<bool> {
        eprintln!(
            "\n{} {} command(s) will be committed on {}",
            "[?]".cyan().bold(),
            commands.len().to_string().bold(),
            host.yellow()
        );

        answer(
            Confirm::new()
                .with_prompt("Apply and commit?")
                .default(false)
                .interact_opt(),
        )
    }
}

impl Default for ConfirmPrompt {
    fn default() -> Self {
        Self::new()
    }
}

fn answer(reply: std::result::Result<Option<bool>, dialoguer::Error>) -> Result<bool> {
    match reply {
        Ok(choice) => Ok(choice.unwrap_or(false)),
        Err(dialoguer::Error::IO(e)) => Err(XrError::Io(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_answers() {
        assert!(answer(Ok(Some(true))).unwrap());
        assert!(!answer(Ok(Some(false))).unwrap());
        // dismissed with Esc/q
        assert!(!answer(Ok(None)).unwrap());
    }

    #[test]
    fn test_terminal_error_is_io() {
        let not_a_tty = io::Error::new(io::ErrorKind::NotConnected, "not a terminal");
        let err = answer(Err(dialoguer::Error::from(not_a_tty))).unwrap_err();

        assert!(matches!(err, XrError::Io(ref e) if e.kind() == io::ErrorKind::NotConnected));
    }
}
