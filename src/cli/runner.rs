use crate::cli::Commands;
use crate::commands::Command;

/// Convert clap `Commands` into the internal `commands::Command`.
/// Returns None for commands that need special handling (`interactive`).
pub fn to_internal_command(c: &Commands) -> Option<Command> {
    match c {
        Commands::Add {
            name,
            balance,
            rate,
        } => Some(Command::Add {
            name: name.clone(),
            balance: *balance,
            rate: *rate,
        }),
        Commands::Deposit { name, amount } => Some(Command::Deposit {
            name: name.clone(),
            amount: *amount,
        }),
        Commands::Withdraw { name, amount } => Some(Command::Withdraw {
            name: name.clone(),
            amount: *amount,
        }),
        Commands::Interest { name, all } => Some(Command::Interest {
            name: if *all { None } else { name.clone() },
        }),
        Commands::SetRate { name, rate } => Some(Command::SetRate {
            name: name.clone(),
            rate: *rate,
        }),
        Commands::Summary => Some(Command::Summary),
        Commands::History { name } => Some(Command::History { name: name.clone() }),
        Commands::Interactive => None,
    }
}
