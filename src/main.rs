use clap::Parser;
use colored::*;

use xr_loopback::cli::Cli;
use xr_loopback::commands::{self, ApplyOptions};
use xr_loopback::config::{Config, DeviceProfile};
use xr_loopback::executor::{ChangePlanner, SshExecutor};
use xr_loopback::{codec, logging, ui, Result, XrError};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.debug);

    if let Err(e) = run(cli).await {
        match e {
            XrError::UserCancelled => {
                eprintln!("\n{}", "Aborted by user.".yellow());
                std::process::exit(130);
            }
            e => {
                eprintln!("\n{} {}", "ERROR:".red().bold(), e);
                std::process::exit(1);
            }
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    tracing::debug!(?config, "loaded config");

    let confirm = config.confirm_before_apply && !cli.yes;
    let commit_confirmed_secs = cli.commit_confirmed_secs(config.commit_confirmed_secs);

    if let Some(path) = &cli.apply_rollback {
        let cmds = codec::read_file(path)?;
        ui::print_commands("Loaded rollback commands:", &cmds);

        if cli.dry_run {
            println!("\n{}", "--dry-run: would apply rollback (no commit).".yellow());
            return Ok(());
        }

        let profile = device_profile(&cli, &config)?;
        let mut executor = SshExecutor::new(profile);
        let report = commands::execute_rollback(
            &mut executor,
            &cmds,
            &config.backup_dir,
            commit_confirmed_secs,
            confirm,
        )
        .await?;

        commands::show_diff(&report.before, &report.after, config.diff_max_lines);
        return Ok(());
    }

    // all input is validated before touching the device
    let targets = commands::load_targets(&cli)?;
    ui::print_commands("Planned commands:", &ChangePlanner::plan(&targets));

    if cli.dry_run && cli.generate_rollback.is_none() {
        println!("\n{}", "--dry-run: preview only; no changes made.".yellow());
        return Ok(());
    }

    let options = ApplyOptions {
        dry_run: cli.dry_run,
        generate_rollback: cli.generate_rollback.clone(),
        delete_empty: cli.delete_empty(config.delete_empty_loopbacks),
        commit_confirmed_secs,
        backup_dir: config.backup_dir.clone(),
        confirm,
    };

    let profile = device_profile(&cli, &config)?;
    let mut executor = SshExecutor::new(profile);
    let report = commands::execute_apply(&mut executor, &targets, &options).await?;

    if let Some(after) = &report.after {
        commands::show_diff(&report.before, after, config.diff_max_lines);
    }
    Ok(())
}

fn device_profile(cli: &Cli, config: &Config) -> Result<DeviceProfile> {
    DeviceProfile::from_env(
        cli.host.as_deref(),
        cli.user.as_deref(),
        cli.password.as_deref(),
        config,
    )
}
