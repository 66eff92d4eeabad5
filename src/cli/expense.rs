//! Expense CLI commands

use chrono::{Local, NaiveDate};
use clap::Subcommand;

use crate::display::format_expense_list;
use crate::error::{SplitError, SplitResult};
use crate::models::{Access, Month};
use crate::services::{CategoryService, ExpenseFilter, ExpenseService};
use crate::storage::Storage;

use super::{category_names, parse_money, Session};

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record an expense
    Add {
        /// Category name or ID
        category: String,
        /// Amount spent
        amount: String,
        #[arg(short, long, default_value = "")]
        description: String,
        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
    },

    /// List expenses
    List {
        /// Only this month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
        /// Only this category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Delete an expense by ID
    Delete { expense: String },
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    session: &Session,
    cmd: ExpenseCommands,
) -> SplitResult<()> {
    let service = ExpenseService::new(storage);
    let categories = CategoryService::new(storage);

    match cmd {
        ExpenseCommands::Add {
            category,
            amount,
            description,
            date,
        } => {
            let owner = session.authorize(storage, Access::Write)?;
            let category = categories.require(&category)?;
            let date = match date {
                Some(raw) => parse_date(&raw)?,
                None => Local::now().date_naive(),
            };

            let expense = service.add(owner, category.id, date, parse_money(&amount)?, &description)?;
            println!(
                "Recorded {} in {} on {}",
                expense.amount, category.name, expense.date
            );
            println!("  ID: {}", expense.id);
        }

        ExpenseCommands::List { month, category } => {
            let owner = session.authorize(storage, Access::Read)?;
            let filter = ExpenseFilter {
                month: month
                    .as_deref()
                    .map(Month::parse)
                    .transpose()
                    .map_err(|e| SplitError::Validation(e.to_string()))?,
                category_id: match category {
                    Some(c) => Some(categories.require(&c)?.id),
                    None => None,
                },
            };

            let expenses = service.list(owner, filter)?;
            print!("{}", format_expense_list(&expenses, &category_names(storage)?));
        }

        ExpenseCommands::Delete { expense } => {
            let owner = session.authorize(storage, Access::Write)?;
            let deleted = service.delete(owner, &expense)?;
            println!("Deleted expense {} ({})", deleted.id, deleted.amount);
        }
    }

    Ok(())
}

fn parse_date(input: &str) -> SplitResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| SplitError::Validation(format!("Invalid date '{}', expected YYYY-MM-DD", input)))
}
