mod cli;
mod commands;
mod dispatcher;
#[cfg(feature = "tui")]
mod ui;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use colored::Colorize;
use savings::config::Config;
use tracing_subscriber::EnvFilter;

use dispatcher::{dispatch_command, Session};

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Logs go to stderr so stdout stays parseable with --json
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let config = Config::load(cli.data_dir.clone())?;
    let mut session = Session::open(&config)?;

    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Interactive => launch_interactive(&mut session),
        other => match cli::runner::to_internal_command(&other) {
            Some(cmd) => dispatch_command(cmd, &mut session, cli.json),
            None => Ok(()),
        },
    }
}

#[cfg(feature = "tui")]
fn launch_interactive(session: &mut Session) -> Result<()> {
    ui::launch_console(session)
}

#[cfg(not(feature = "tui"))]
fn launch_interactive(_session: &mut Session) -> Result<()> {
    anyhow::bail!("interactive mode requires the `tui` feature")
}
