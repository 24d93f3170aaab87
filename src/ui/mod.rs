//! Interactive console
//!
//! A line-oriented REPL over the same dispatcher the CLI uses. The ledger
//! is saved after every change and once more on exit.

pub mod readline;

use anyhow::Result;
use colored::Colorize;
use rustyline::error::ReadlineError;

use crate::commands::{parse_command, Command};
use crate::dispatcher::{dispatch_command, Session};

const COMMAND_VERBS: &[&str] = &[
    "add", "deposit", "withdraw", "interest", "set-rate", "summary", "history", "list", "help",
    "exit", "quit",
];

/// Launch the interactive console.
pub fn launch_console(session: &mut Session) -> Result<()> {
    println!("{}", "Savings Tracker - Interactive Mode".bold());
    println!(
        "Type {} for commands, {} to save and leave\n",
        "help".cyan(),
        "exit".cyan()
    );

    let history_path = session
        .store
        .path()
        .parent()
        .map(|dir| dir.join(".history"))
        .unwrap_or_else(|| ".history".into());
    let mut rl = readline::Readline::new(COMMAND_VERBS, history_path)?;

    loop {
        rl.set_platform_names(session.ledger.names());

        match rl.readline("savings> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }

                match parse_command(trimmed) {
                    Ok(Command::Exit) => break,
                    Ok(cmd) => {
                        if let Err(e) = dispatch_command(cmd, session, false) {
                            eprintln!("{} {:#}", "Error:".red().bold(), e);
                        }
                    }
                    Err(e) => {
                        eprintln!("{} {}", "Parse error:".yellow().bold(), e.message);
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("{} {}", "Error:".red().bold(), err);
                break;
            }
        }
    }

    session.save()?;
    println!("Data saved. Goodbye!");
    Ok(())
}
