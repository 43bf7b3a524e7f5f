use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "xr-loopback")]
#[command(version)]
#[command(
    about = "Ensure IOS-XR Loopback(s) exist and set descriptions, with exact rollback generation",
    long_about = None
)]
pub struct Cli {
    /// Loopback ID or name (e.g. 100 or Loopback100)
    #[arg(required_unless_present_any = ["csv", "apply_rollback"])]
    pub loopback: Option<String>,

    /// Description for single loopback mode
    #[arg(long, required_unless_present_any = ["csv", "apply_rollback"])]
    pub description: Option<String>,

    /// CSV file (loopback,description) for bulk mode
    #[arg(long, value_name = "FILE", conflicts_with_all = ["loopback", "description"])]
    pub csv: Option<PathBuf>,

    /// Preview commands without committing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Use 'commit confirmed SECONDS' safety mode (overrides the config file)
    #[arg(long, value_name = "SECONDS")]
    pub commit_confirmed: Option<u32>,

    /// Generate a rollback command file from the current per-interface state
    #[arg(long, value_name = "FILE")]
    pub generate_rollback: Option<PathBuf>,

    /// Apply commands from a rollback file and commit
    #[arg(long, value_name = "FILE", conflicts_with_all = ["loopback", "csv", "generate_rollback"])]
    pub apply_rollback: Option<PathBuf>,

    /// On rollback, delete loopbacks whose only sub-command was a description
    #[arg(long)]
    pub delete_empty_loopbacks: bool,

    /// Do NOT delete 'empty' loopbacks on rollback; just restore/clear their description
    #[arg(long, conflicts_with = "delete_empty_loopbacks")]
    pub keep_empty_loopbacks: bool,

    /// Override XR_HOST
    #[arg(long)]
    pub host: Option<String>,

    /// Override XR_USER
    #[arg(long)]
    pub user: Option<String>,

    /// Override XR_PASS
    #[arg(long)]
    pub password: Option<String>,

    /// Skip the confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Debug logging
    #[arg(short = 'd', long)]
    pub debug: bool,
}

impl Cli {
    /// Resolve the empty-loopback deletion policy against the configured default.
    pub fn delete_empty(&self, config_default: bool) -> bool {
        if self.keep_empty_loopbacks {
            false
        } else {
            self.delete_empty_loopbacks || config_default
        }
    }

    pub fn commit_confirmed_secs(&self, config_default: u32) -> u32 {
        self.commit_confirmed.unwrap_or(config_default)
    }
}
