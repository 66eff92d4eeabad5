//! Budget comparison report
//!
//! For one user and month: the available income, and for every category the
//! percentage, the amount that percentage assigns, what was planned and what
//! was actually spent.

use crate::allocation::{compare, CategoryComparison};
use crate::error::SplitResult;
use crate::models::{Money, Month, UserId};
use crate::services::{AllocationService, BudgetService, ExpenseService};
use crate::storage::Storage;

/// Comparison of assigned, planned and actual amounts for a month
#[derive(Debug, Clone)]
pub struct BudgetComparisonReport {
    pub user_id: UserId,
    pub month: Month,
    /// Whether a budget exists for the month
    pub has_budget: bool,
    pub gross_income: Money,
    pub deductions: Money,
    pub available_income: Money,
    pub rows: Vec<CategoryComparison>,
}

impl BudgetComparisonReport {
    /// Build the report from stored data
    ///
    /// Without a budget for the month the available income is zero, so
    /// nothing is assigned, but planned and actual figures still show.
    pub fn generate(storage: &Storage, user: &UserId, month: Month) -> SplitResult<Self> {
        let budgets = BudgetService::new(storage);
        let budget = budgets.get(user, month)?;

        let categories = storage.categories.get_all()?;
        let allocation = AllocationService::new(storage).current(user)?;
        let planned = budgets.planned_by_category(user, month)?;
        let actual = ExpenseService::new(storage).actual_by_category(user, month)?;

        let (gross_income, deductions, available_income) = match &budget {
            Some(b) => (b.gross_income, b.total_deductions(), b.available_income()),
            None => (Money::zero(), Money::zero(), Money::zero()),
        };

        let rows = compare(
            &categories,
            &allocation,
            available_income.as_major_units(),
            &planned,
            &actual,
        );

        Ok(Self {
            user_id: user.clone(),
            month,
            has_budget: budget.is_some(),
            gross_income,
            deductions,
            available_income,
            rows,
        })
    }

    pub fn total_percentage(&self) -> f64 {
        self.rows.iter().map(|r| r.percentage).sum()
    }

    /// Sum of assigned amounts, rounded to cents
    pub fn total_assigned(&self) -> Money {
        Money::from_major_units(self.rows.iter().map(|r| r.assigned).sum())
    }

    pub fn total_planned(&self) -> Money {
        self.rows.iter().map(|r| r.planned).sum()
    }

    pub fn total_actual(&self) -> Money {
        self.rows.iter().map(|r| r.actual).sum()
    }

    /// Categories where actual spending went past the assigned amount
    pub fn over_assigned(&self) -> Vec<&CategoryComparison> {
        self.rows.iter().filter(|r| r.is_over_assigned()).collect()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("Budget comparison - {} ({})\n", self.month, self.user_id));
        output.push_str(&"=".repeat(84));
        output.push('\n');

        if self.has_budget {
            output.push_str(&format!(
                "Gross: {}  Deductions: {}  Available: {}\n\n",
                self.gross_income, self.deductions, self.available_income
            ));
        } else {
            output.push_str("No budget for this month; nothing is assigned.\n\n");
        }

        output.push_str(&format!(
            "{:<20} {:>8} {:>12} {:>12} {:>12} {:>12}\n",
            "Category", "%", "Assigned", "Planned", "Actual", "Left"
        ));
        output.push_str(&"-".repeat(84));
        output.push('\n');

        for row in &self.rows {
            let left = Money::from_major_units(row.assigned_remaining());
            let left_display = if row.is_over_assigned() {
                format!("{} *", left)
            } else {
                left.to_string()
            };
            output.push_str(&format!(
                "{:<20} {:>7.2}% {:>12} {:>12} {:>12} {:>12}\n",
                row.name,
                row.percentage,
                Money::from_major_units(row.assigned).to_string(),
                row.planned.to_string(),
                row.actual.to_string(),
                left_display
            ));
        }

        output.push_str(&"-".repeat(84));
        output.push('\n');
        output.push_str(&format!(
            "{:<20} {:>7.2}% {:>12} {:>12} {:>12}\n",
            "TOTAL",
            self.total_percentage(),
            self.total_assigned().to_string(),
            self.total_planned().to_string(),
            self.total_actual().to_string()
        ));

        if !self.over_assigned().is_empty() {
            output.push_str("\n* = spent more than assigned\n");
        }

        output
    }
}
