//! Budget CLI commands
//!
//! One budget per user per month: gross income, deductions and the available
//! income the structure is applied to.

use clap::Subcommand;

use crate::display::{format_budget_details, format_budget_list};
use crate::error::SplitResult;
use crate::models::Access;
use crate::services::BudgetService;
use crate::storage::Storage;

use super::{parse_money, parse_month, Session};

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Create the budget for a month
    Create {
        /// Month (YYYY-MM, defaults to current)
        #[arg(short, long)]
        month: Option<String>,
        /// Gross income (defaults to the monthly total of active income sources)
        #[arg(short, long)]
        gross: Option<String>,
    },

    /// Show a month's budget
    Show {
        #[arg(short, long)]
        month: Option<String>,
    },

    /// List all budgets, newest first
    List,

    /// Change a month's gross income
    Gross {
        /// New gross income
        amount: String,
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Manage deductions (taxes, social security, ...)
    #[command(subcommand)]
    Deduction(DeductionCommands),

    /// Delete a month's budget and its planned items
    Delete {
        #[arg(short, long)]
        month: Option<String>,
    },
}

/// Deduction subcommands
#[derive(Subcommand)]
pub enum DeductionCommands {
    /// Add a deduction
    Add {
        /// Deduction name
        name: String,
        /// Amount
        amount: String,
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Remove a deduction by name or ID
    Remove {
        deduction: String,
        #[arg(short, long)]
        month: Option<String>,
    },
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    session: &Session,
    cmd: BudgetCommands,
) -> SplitResult<()> {
    let service = BudgetService::new(storage);

    match cmd {
        BudgetCommands::Create { month, gross } => {
            let owner = session.authorize(storage, Access::Write)?;
            let month = parse_month(month.as_deref())?;
            let gross = gross.as_deref().map(parse_money).transpose()?;

            let budget = service.create(owner, month, gross)?;
            println!("Created budget for {}", budget.month);
            println!();
            print!("{}", format_budget_details(&budget));
        }

        BudgetCommands::Show { month } => {
            let owner = session.authorize(storage, Access::Read)?;
            let month = parse_month(month.as_deref())?;
            print!("{}", format_budget_details(&service.require(owner, month)?));
        }

        BudgetCommands::List => {
            let owner = session.authorize(storage, Access::Read)?;
            print!("{}", format_budget_list(&service.list(owner)?));
        }

        BudgetCommands::Gross { amount, month } => {
            let owner = session.authorize(storage, Access::Write)?;
            let month = parse_month(month.as_deref())?;
            let budget = service.set_gross_income(owner, month, parse_money(&amount)?)?;
            println!(
                "Gross income for {} set to {} (available: {})",
                budget.month,
                budget.gross_income,
                budget.available_income()
            );
        }

        BudgetCommands::Deduction(DeductionCommands::Add {
            name,
            amount,
            month,
        }) => {
            let owner = session.authorize(storage, Access::Write)?;
            let month = parse_month(month.as_deref())?;
            let budget = service.add_deduction(owner, month, &name, parse_money(&amount)?)?;
            println!("Added deduction '{}' to {}", name, budget.month);
            println!("  Available income: {}", budget.available_income());
        }

        BudgetCommands::Deduction(DeductionCommands::Remove { deduction, month }) => {
            let owner = session.authorize(storage, Access::Write)?;
            let month = parse_month(month.as_deref())?;
            let budget = service.remove_deduction(owner, month, &deduction)?;
            println!("Removed deduction '{}' from {}", deduction, budget.month);
            println!("  Available income: {}", budget.available_income());
        }

        BudgetCommands::Delete { month } => {
            let owner = session.authorize(storage, Access::Write)?;
            let month = parse_month(month.as_deref())?;
            let budget = service.delete(owner, month)?;
            println!("Deleted budget for {}", budget.month);
        }
    }

    Ok(())
}
