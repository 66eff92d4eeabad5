//! Display formatting for terminal output
//!
//! Turns allocations, budgets and the other records into plain-text tables
//! for the CLI. Percentages and amounts are rounded to two decimals here and
//! nowhere else.

pub mod allocation;
pub mod budget;
pub mod category;
pub mod expense;
pub mod family;
pub mod income;

pub use allocation::{format_allocation, format_amount, format_preset_list};
pub use budget::{format_budget_details, format_budget_list, format_planned_list};
pub use category::format_category_list;
pub use expense::format_expense_list;
pub use family::format_member_list;
pub use income::format_income_list;
