//! Report CLI commands

use clap::Subcommand;

use crate::error::SplitResult;
use crate::export::export_comparison_csv;
use crate::models::Access;
use crate::reports::BudgetComparisonReport;
use crate::storage::Storage;

use super::{parse_month, Session};

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Assigned vs. planned vs. actual per category for a month
    Comparison {
        #[arg(short, long)]
        month: Option<String>,
        /// Print CSV instead of a table
        #[arg(long)]
        csv: bool,
    },
}

/// Handle a report command
pub fn handle_report_command(
    storage: &Storage,
    session: &Session,
    cmd: ReportCommands,
) -> SplitResult<()> {
    match cmd {
        ReportCommands::Comparison { month, csv } => {
            let owner = session.authorize(storage, Access::Read)?;
            let month = parse_month(month.as_deref())?;
            let report = BudgetComparisonReport::generate(storage, owner, month)?;

            if csv {
                export_comparison_csv(&report, std::io::stdout())?;
            } else {
                print!("{}", report.format_terminal());
            }
        }
    }

    Ok(())
}
