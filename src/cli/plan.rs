//! Planned spending CLI commands

use clap::Subcommand;

use crate::display::format_planned_list;
use crate::error::SplitResult;
use crate::models::Access;
use crate::services::{BudgetService, CategoryService};
use crate::storage::Storage;

use super::{category_names, parse_money, parse_month, Session};

/// Plan subcommands
#[derive(Subcommand)]
pub enum PlanCommands {
    /// Plan an amount for a category in a month's budget
    Add {
        /// Category name or ID
        category: String,
        /// Amount
        amount: String,
        /// What the money is for
        #[arg(short, long, default_value = "")]
        description: String,
        #[arg(short, long)]
        month: Option<String>,
    },

    /// List a month's planned items
    List {
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Remove a planned item by ID
    Remove {
        item: String,
        #[arg(short, long)]
        month: Option<String>,
    },
}

/// Handle a plan command
pub fn handle_plan_command(
    storage: &Storage,
    session: &Session,
    cmd: PlanCommands,
) -> SplitResult<()> {
    let service = BudgetService::new(storage);

    match cmd {
        PlanCommands::Add {
            category,
            amount,
            description,
            month,
        } => {
            let owner = session.authorize(storage, Access::Write)?;
            let month = parse_month(month.as_deref())?;
            let category = CategoryService::new(storage).require(&category)?;

            let item = service.add_plan(
                owner,
                month,
                category.id,
                &description,
                parse_money(&amount)?,
            )?;
            println!("Planned {} for {} in {}", item.amount, category.name, month);
            println!("  ID: {}", item.id);
        }

        PlanCommands::List { month } => {
            let owner = session.authorize(storage, Access::Read)?;
            let month = parse_month(month.as_deref())?;
            let items = service.planned(owner, month)?;
            print!("{}", format_planned_list(&items, &category_names(storage)?));
        }

        PlanCommands::Remove { item, month } => {
            let owner = session.authorize(storage, Access::Write)?;
            let month = parse_month(month.as_deref())?;
            let removed = service.remove_plan(owner, month, &item)?;
            println!("Removed planned item {} ({})", removed.id, removed.amount);
        }
    }

    Ok(())
}
