//! CSV export
//!
//! Spreadsheet-friendly exports of the comparison report and of expenses.
//! Amounts are written in major units with two decimals.

use std::collections::HashMap;
use std::io::Write;

use crate::error::SplitResult;
use crate::models::{Expense, Money};
use crate::reports::BudgetComparisonReport;
use crate::storage::Storage;

fn major(amount: Money) -> String {
    format!("{:.2}", amount.as_major_units())
}

/// Write a comparison report, one row per category plus a total row
pub fn export_comparison_csv<W: Write>(
    report: &BudgetComparisonReport,
    writer: W,
) -> SplitResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record([
        "Month",
        "Category",
        "Percentage",
        "Assigned",
        "Planned",
        "Actual",
        "Planned Remaining",
        "Assigned Remaining",
    ])?;

    let month = report.month.to_string();
    for row in &report.rows {
        wtr.write_record(vec![
            month.clone(),
            row.name.clone(),
            format!("{:.2}", row.percentage),
            format!("{:.2}", row.assigned),
            major(row.planned),
            major(row.actual),
            major(row.planned_remaining()),
            format!("{:.2}", row.assigned_remaining()),
        ])?;
    }

    wtr.write_record(vec![
        month,
        "TOTAL".to_string(),
        format!("{:.2}", report.total_percentage()),
        major(report.total_assigned()),
        major(report.total_planned()),
        major(report.total_actual()),
        String::new(),
        String::new(),
    ])?;

    wtr.flush()?;
    Ok(())
}

/// Write a list of expenses with category names resolved
pub fn export_expenses_csv<W: Write>(
    storage: &Storage,
    expenses: &[Expense],
    writer: W,
) -> SplitResult<()> {
    let names: HashMap<_, _> = storage
        .categories
        .get_all()?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect();

    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["ID", "Date", "User", "Category", "Description", "Amount"])?;

    for expense in expenses {
        let category = names
            .get(&expense.category_id)
            .cloned()
            .unwrap_or_else(|| "Unknown".to_string());
        wtr.write_record(vec![
            expense.id.to_string(),
            expense.date.to_string(),
            expense.user_id.to_string(),
            category,
            expense.description.clone(),
            major(expense.amount),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::SplitPaths;
    use crate::models::{Month, UserId};
    use crate::services::{BudgetService, ExpenseService};
    use crate::storage::initialize_storage;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = SplitPaths::with_base_dir(temp_dir.path().to_path_buf());
        initialize_storage(&paths).unwrap();
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_comparison_csv() {
        let (_temp_dir, storage) = create_test_storage();
        let ana = UserId::new("ana");
        let month = Month::new(2025, 1).unwrap();
        BudgetService::new(&storage)
            .create(&ana, month, Some(Money::from_cents(1_000_000)))
            .unwrap();

        let report = BudgetComparisonReport::generate(&storage, &ana, month).unwrap();
        let mut out = Vec::new();
        export_comparison_csv(&report, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("Month,Category,Percentage,Assigned"));
        assert_eq!(lines[1], "2025-01,Necesidades,50.00,5000.00,0.00,0.00,0.00,5000.00");
        assert!(lines[4].starts_with("2025-01,TOTAL,100.00,10000.00"));
    }

    #[test]
    fn test_expenses_csv_quotes_fields() {
        let (_temp_dir, storage) = create_test_storage();
        let ana = UserId::new("ana");
        let gustos = storage.categories.get_all().unwrap()[1].id;
        let expense = ExpenseService::new(&storage)
            .add(
                &ana,
                gustos,
                NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(),
                Money::from_cents(2_550),
                "Pizza, drinks",
            )
            .unwrap();

        let mut out = Vec::new();
        export_expenses_csv(&storage, &[expense], &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("2025-01-05,ana,Gustos,\"Pizza, drinks\",25.50"));
    }
}
