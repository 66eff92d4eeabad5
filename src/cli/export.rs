//! Export CLI commands

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Subcommand;

use crate::error::{SplitError, SplitResult};
use crate::export::{
    export_comparison_csv, export_expenses_csv, export_full_json, export_full_yaml,
    import_from_json, import_from_yaml,
};
use crate::models::Access;
use crate::reports::BudgetComparisonReport;
use crate::services::{ExpenseFilter, ExpenseService};
use crate::storage::Storage;

use super::{parse_month, Session};

/// Export subcommands
#[derive(Subcommand)]
pub enum ExportCommands {
    /// Comparison report (or expenses) as CSV
    Csv {
        #[arg(short, long)]
        month: Option<String>,
        /// Export the month's expenses instead of the comparison
        #[arg(long)]
        expenses: bool,
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Every stored record as JSON
    Json {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Every stored record as YAML
    Yaml {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check that an export file can be read back
    Verify {
        /// A .json, .yaml or .yml export
        file: PathBuf,
    },
}

/// Handle an export command
pub fn handle_export_command(
    storage: &Storage,
    session: &Session,
    cmd: ExportCommands,
) -> SplitResult<()> {
    match cmd {
        ExportCommands::Csv {
            month,
            expenses,
            output,
        } => {
            let owner = session.authorize(storage, Access::Read)?;
            let month = parse_month(month.as_deref())?;
            let out = open_output(output.as_ref())?;

            if expenses {
                let filter = ExpenseFilter {
                    month: Some(month),
                    category_id: None,
                };
                let list = ExpenseService::new(storage).list(owner, filter)?;
                export_expenses_csv(storage, &list, out)?;
            } else {
                let report = BudgetComparisonReport::generate(storage, owner, month)?;
                export_comparison_csv(&report, out)?;
            }
            report_written(output.as_ref());
        }

        ExportCommands::Json { output } => {
            let mut out = open_output(output.as_ref())?;
            export_full_json(storage, &mut out)?;
            report_written(output.as_ref());
        }

        ExportCommands::Yaml { output } => {
            let mut out = open_output(output.as_ref())?;
            export_full_yaml(storage, &mut out)?;
            report_written(output.as_ref());
        }

        ExportCommands::Verify { file } => {
            let contents = std::fs::read_to_string(&file)
                .map_err(|e| SplitError::Io(format!("Failed to read {}: {}", file.display(), e)))?;
            let is_yaml = file
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));

            let export = if is_yaml {
                import_from_yaml(&contents)?
            } else {
                import_from_json(&contents)?
            };

            println!("Export is valid (schema {})", export.schema_version);
            println!("  Categories:     {}", export.categories.len());
            println!("  Percentages:    {}", export.percentages.len());
            println!("  Income sources: {}", export.income_sources.len());
            println!("  Budgets:        {}", export.budgets.len());
            println!("  Planned items:  {}", export.planned_items.len());
            println!("  Expenses:       {}", export.expenses.len());
            println!("  Family grants:  {}", export.family.len());
        }
    }

    Ok(())
}

fn open_output(path: Option<&PathBuf>) -> SplitResult<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                SplitError::Export(format!("Failed to create {}: {}", path.display(), e))
            })?;
            Ok(Box::new(file))
        }
        None => Ok(Box::new(io::stdout())),
    }
}

fn report_written(path: Option<&PathBuf>) {
    if let Some(path) = path {
        eprintln!("Exported to {}", path.display());
    }
}
