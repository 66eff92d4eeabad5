//! Core data models for budget-split
//!
//! This module contains the data structures of the budgeting domain:
//! categories, per-user percentages, income sources, monthly budgets,
//! planned items, expenses and family grants.

pub mod budget;
pub mod category;
pub mod expense;
pub mod family;
pub mod ids;
pub mod income;
pub mod money;
pub mod percentage;
pub mod period;

pub use budget::{Deduction, MonthlyBudget, PlannedItem};
pub use category::{Category, DefaultCategory};
pub use expense::Expense;
pub use family::{Access, FamilyMembership, FamilyRole};
pub use ids::{BudgetId, CategoryId, DeductionId, ExpenseId, IncomeId, PlanId, UserId};
pub use income::{IncomeFrequency, IncomeSource};
pub use money::Money;
pub use percentage::{PercentagePair, UserPercentage};
pub use period::Month;
