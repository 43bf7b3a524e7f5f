pub mod prompt;
pub mod progress;

pub use prompt::ConfirmPrompt;
pub use progress::{create_progress_bar, create_spinner, finish_err, finish_ok};

use crate::executor::Command;
use colored::*;

/// Print a titled command listing on stdout.
pub fn print_commands(title: &str, commands: &[Command]) {
    println!("{}", title.cyan().bold());
    for command in commands {
        println!("   {}", command);
    }
}
