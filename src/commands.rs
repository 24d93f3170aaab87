//! Command parsing and routing layer
//!
//! The interactive console reads plain lines; this module turns them into
//! the same `Command` values the clap front end produces, so both surfaces
//! share one dispatcher.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Parsed command from user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `add <name> [balance] [rate]`
    Add {
        name: String,
        balance: Decimal,
        rate: Decimal,
    },
    /// `deposit <name> <amount>`
    Deposit { name: String, amount: Decimal },
    /// `withdraw <name> <amount>`
    Withdraw { name: String, amount: Decimal },
    /// `interest <name>` or `interest --all` (`None` means every platform)
    Interest { name: Option<String> },
    /// `set-rate <name> <rate>`
    SetRate { name: String, rate: Decimal },
    /// `summary`
    Summary,
    /// `history <name>`
    History { name: String },
    /// `list`
    List,
    Help,
    Exit,
}

impl Command {
    /// Whether the command changes the ledger and must be followed by a save.
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Command::Add { .. }
                | Command::Deposit { .. }
                | Command::Withdraw { .. }
                | Command::Interest { .. }
                | Command::SetRate { .. }
        )
    }
}

/// Error type for command parsing
#[derive(Debug, Clone)]
pub struct CommandParseError {
    pub message: String,
}

impl CommandParseError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for CommandParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CommandParseError {}

/// Parse a monetary amount or rate, accepting an optional leading `$` and
/// `,` thousands separators.
pub fn parse_decimal(s: &str) -> Result<Decimal, CommandParseError> {
    let cleaned: String = s
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    Decimal::from_str(&cleaned)
        .map_err(|_| CommandParseError::new(format!("Invalid number '{}'", s)))
}

/// Split a line on whitespace, keeping double-quoted segments together so
/// platform names may contain spaces.
fn tokenize(input: &str) -> Result<Vec<String>, CommandParseError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_token = false;

    for c in input.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                has_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_token {
                    tokens.push(std::mem::take(&mut current));
                    has_token = false;
                }
            }
            c => {
                current.push(c);
                has_token = true;
            }
        }
    }

    if in_quotes {
        return Err(CommandParseError::new("Unterminated quote"));
    }
    if has_token {
        tokens.push(current);
    }
    Ok(tokens)
}

/// Parse a command string into a Command enum
///
/// A leading slash is accepted, so `/deposit Vault 50` and `deposit Vault 50`
/// are equivalent. Quote names containing spaces: `deposit "My Bank" 50`.
pub fn parse_command(input: &str) -> Result<Command, CommandParseError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CommandParseError::new(
            "Empty command. Type `help` for commands.",
        ));
    }

    let input = input.strip_prefix('/').unwrap_or(input);
    let tokens = tokenize(input)?;
    let mut parts = tokens.into_iter();
    let cmd = parts
        .next()
        .ok_or_else(|| CommandParseError::new("No command provided"))?;

    match cmd.to_lowercase().as_str() {
        "add" => {
            let name = required_name(parts.next(), "add <name> [balance] [rate]")?;
            let balance = parts
                .next()
                .map(|s| parse_decimal(&s))
                .transpose()?
                .unwrap_or(Decimal::ZERO);
            let rate = parts
                .next()
                .map(|s| parse_decimal(&s))
                .transpose()?
                .unwrap_or(Decimal::ZERO);
            Ok(Command::Add {
                name,
                balance,
                rate,
            })
        }
        "deposit" => {
            let name = required_name(parts.next(), "deposit <name> <amount>")?;
            let amount = required_decimal(parts.next(), "deposit <name> <amount>")?;
            Ok(Command::Deposit { name, amount })
        }
        "withdraw" => {
            let name = required_name(parts.next(), "withdraw <name> <amount>")?;
            let amount = required_decimal(parts.next(), "withdraw <name> <amount>")?;
            Ok(Command::Withdraw { name, amount })
        }
        "interest" => match parts.next() {
            Some(arg) if arg == "--all" || arg == "-a" => Ok(Command::Interest { name: None }),
            Some(name) => Ok(Command::Interest { name: Some(name) }),
            None => Err(CommandParseError::new(
                "interest requires a platform name or --all. Usage: interest <name|--all>",
            )),
        },
        "set-rate" | "rate" => {
            let name = required_name(parts.next(), "set-rate <name> <rate>")?;
            let rate = required_decimal(parts.next(), "set-rate <name> <rate>")?;
            Ok(Command::SetRate { name, rate })
        }
        "summary" => Ok(Command::Summary),
        "history" => {
            let name = required_name(parts.next(), "history <name>")?;
            Ok(Command::History { name })
        }
        "list" | "ls" => Ok(Command::List),
        "help" | "?" => Ok(Command::Help),
        "exit" | "quit" | "q" => Ok(Command::Exit),
        other => Err(CommandParseError::new(format!(
            "Unknown command: {}. Type `help` for commands.",
            other
        ))),
    }
}

fn required_name(arg: Option<String>, usage: &str) -> Result<String, CommandParseError> {
    arg.ok_or_else(|| CommandParseError::new(format!("Missing platform name. Usage: {}", usage)))
}

fn required_decimal(arg: Option<String>, usage: &str) -> Result<Decimal, CommandParseError> {
    let raw =
        arg.ok_or_else(|| CommandParseError::new(format!("Missing amount. Usage: {}", usage)))?;
    parse_decimal(&raw)
}
