//! Budget structure CLI commands
//!
//! Shows and edits how a user's income is split between categories.

use clap::Subcommand;

use crate::allocation::{AllocationEditor, Preset};
use crate::config::settings::Settings;
use crate::display::{format_allocation, format_preset_list};
use crate::error::SplitResult;
use crate::models::{Access, Month, UserId};
use crate::services::{AllocationService, BudgetService};
use crate::storage::Storage;

use super::{parse_money, parse_month, Session};

/// Structure subcommands
#[derive(Subcommand)]
pub enum StructureCommands {
    /// Show the current split and what each category receives
    Show {
        /// Project onto this income instead of the month's available income
        #[arg(short, long)]
        income: Option<String>,
        /// Month whose budget supplies the income (defaults to current)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Change the split and save it if it totals 100%
    ///
    /// Presets are applied first, then each --set in the order given.
    Edit {
        /// Move one slider, e.g. Necesidades=70
        #[arg(long = "set", value_name = "CATEGORY=PERCENT")]
        set: Vec<String>,
        /// Apply a preset by name (50-30-20) or values (45,35,20)
        #[arg(short, long)]
        preset: Vec<String>,
        /// Show the result without saving
        #[arg(long)]
        dry_run: bool,
        /// Project onto this income when printing the result
        #[arg(short, long)]
        income: Option<String>,
    },

    /// List the built-in presets
    Presets,

    /// Return to the category defaults
    Reset,
}

/// Handle a structure command
pub fn handle_structure_command(
    storage: &Storage,
    settings: &Settings,
    session: &Session,
    cmd: StructureCommands,
) -> SplitResult<()> {
    let service = AllocationService::new(storage);

    match cmd {
        StructureCommands::Show { income, month } => {
            let owner = session.authorize(storage, Access::Read)?;
            let month = parse_month(month.as_deref())?;
            let income = resolve_income(storage, owner, month, income.as_deref())?;

            let editor = service.open_editor(owner)?;
            println!("Budget structure for {}", owner);
            println!();
            print!(
                "{}",
                format_allocation(editor.categories(), editor.allocation(), income)
            );
        }

        StructureCommands::Edit {
            set,
            preset,
            dry_run,
            income,
        } => {
            let owner = session.authorize(storage, Access::Write)?;
            let income = resolve_income(storage, owner, Month::current(), income.as_deref())?;

            let mut editor = service.open_editor(owner)?;
            apply_edits(&mut editor, &preset, &set)?;

            print!(
                "{}",
                format_allocation(editor.categories(), editor.allocation(), income)
            );

            if dry_run {
                println!();
                println!("Dry run: nothing saved.");
            } else if !editor.is_dirty() {
                println!();
                println!("No changes to save.");
            } else {
                let outcome = service.commit(&mut editor)?;
                println!();
                println!("Saved budget structure for {}.", owner);
                if let Some(err) = outcome.audit_error {
                    println!("Warning: the change was not written to the audit log: {}", err);
                }
            }
        }

        StructureCommands::Presets => {
            println!("{}", format_preset_list(&Preset::builtin(), &settings.default_preset));
        }

        StructureCommands::Reset => {
            let owner = session.authorize(storage, Access::Write)?;
            let allocation = service.reset(owner)?;
            let categories = storage.categories.get_all()?;

            println!("Budget structure for {} reset to defaults.", owner);
            println!();
            print!("{}", format_allocation(&categories, &allocation, None));
        }
    }

    Ok(())
}

/// Apply presets, then slider moves, to an editing session
pub fn apply_edits(
    editor: &mut AllocationEditor,
    presets: &[String],
    sets: &[String],
) -> SplitResult<()> {
    for raw in presets {
        let preset = Preset::parse(raw)?;
        editor.apply_preset(&preset);
    }
    for raw in sets {
        let change = editor.parse_change(raw)?;
        editor.apply_change(change);
    }
    Ok(())
}

/// The income to project onto: an explicit value, else the month's available income
fn resolve_income(
    storage: &Storage,
    owner: &UserId,
    month: Month,
    explicit: Option<&str>,
) -> SplitResult<Option<f64>> {
    if let Some(raw) = explicit {
        return Ok(Some(parse_money(raw)?.as_major_units()));
    }

    Ok(BudgetService::new(storage)
        .get(owner, month)?
        .map(|budget| budget.available_income().as_major_units()))
}
