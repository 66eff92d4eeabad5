//! Income CLI commands
//!
//! Manages the income sources whose monthly total seeds new budgets.

use clap::Subcommand;

use crate::display::format_income_list;
use crate::error::{SplitError, SplitResult};
use crate::models::{Access, IncomeFrequency};
use crate::services::IncomeService;
use crate::storage::Storage;

use super::{parse_money, Session};

/// Income subcommands
#[derive(Subcommand)]
pub enum IncomeCommands {
    /// Add an income source
    Add {
        /// Name (e.g. "Salary")
        name: String,
        /// Amount per payment (e.g. "2500" or "2500.00")
        amount: String,
        /// weekly, biweekly, monthly or annual
        #[arg(short, long, default_value = "monthly")]
        frequency: String,
    },

    /// List income sources
    List,

    /// Change a source's name, amount or frequency
    Edit {
        /// Source name or ID
        source: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        amount: Option<String>,
        #[arg(short, long)]
        frequency: Option<String>,
    },

    /// Stop counting a source towards monthly income
    Deactivate {
        /// Source name or ID
        source: String,
    },

    /// Count a source towards monthly income again
    Activate {
        /// Source name or ID
        source: String,
    },

    /// Delete a source
    Delete {
        /// Source name or ID
        source: String,
    },
}

/// Handle an income command
pub fn handle_income_command(
    storage: &Storage,
    session: &Session,
    cmd: IncomeCommands,
) -> SplitResult<()> {
    let service = IncomeService::new(storage);

    match cmd {
        IncomeCommands::Add {
            name,
            amount,
            frequency,
        } => {
            let owner = session.authorize(storage, Access::Write)?;
            let amount = parse_money(&amount)?;
            let frequency = parse_frequency(&frequency)?;

            let source = service.add(owner, &name, amount, frequency)?;
            println!("Added income source: {}", source.name);
            println!("  Amount:  {} {}", source.amount, source.frequency);
            println!("  Monthly: {}", source.monthly_amount());
            println!("  ID:      {}", source.id);
        }

        IncomeCommands::List => {
            let owner = session.authorize(storage, Access::Read)?;
            print!("{}", format_income_list(&service.list(owner)?));
        }

        IncomeCommands::Edit {
            source,
            name,
            amount,
            frequency,
        } => {
            let owner = session.authorize(storage, Access::Write)?;
            let amount = amount.as_deref().map(parse_money).transpose()?;
            let frequency = frequency.as_deref().map(parse_frequency).transpose()?;

            let updated = service.update(owner, &source, name.as_deref(), amount, frequency)?;
            println!(
                "Updated income source: {} ({} {})",
                updated.name, updated.amount, updated.frequency
            );
        }

        IncomeCommands::Deactivate { source } => {
            let owner = session.authorize(storage, Access::Write)?;
            let updated = service.set_active(owner, &source, false)?;
            println!("Deactivated income source: {}", updated.name);
        }

        IncomeCommands::Activate { source } => {
            let owner = session.authorize(storage, Access::Write)?;
            let updated = service.set_active(owner, &source, true)?;
            println!("Activated income source: {}", updated.name);
        }

        IncomeCommands::Delete { source } => {
            let owner = session.authorize(storage, Access::Write)?;
            let deleted = service.delete(owner, &source)?;
            println!("Deleted income source: {}", deleted.name);
        }
    }

    Ok(())
}

fn parse_frequency(input: &str) -> SplitResult<IncomeFrequency> {
    IncomeFrequency::parse(input).ok_or_else(|| {
        SplitError::Validation(format!(
            "Unknown frequency '{}'. Use weekly, biweekly, monthly or annual.",
            input
        ))
    })
}
