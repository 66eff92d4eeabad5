//! Reports for budget-split

pub mod comparison;

pub use comparison::BudgetComparisonReport;
