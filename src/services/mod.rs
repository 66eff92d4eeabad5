//! Service layer for budget-split
//!
//! Services sit on top of the storage layer: they validate input, persist
//! through the repositories and write the audit log.

pub mod allocation;
pub mod budget;
pub mod category;
pub mod expense;
pub mod family;
pub mod income;

pub use allocation::{AllocationService, CommitOutcome};
pub use budget::BudgetService;
pub use category::CategoryService;
pub use expense::{ExpenseFilter, ExpenseService};
pub use family::FamilyService;
pub use income::IncomeService;
