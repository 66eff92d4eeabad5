//! Monthly budget model
//!
//! A monthly budget records the gross income for a month, the deductions
//! taken out of it, and the planned spending items per category. What is left
//! after deductions is the available income the allocation is projected onto.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{BudgetId, CategoryId, DeductionId, PlanId, UserId};
use super::money::Money;
use super::period::Month;

/// An amount taken off gross income before it is split (taxes, pension, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deduction {
    pub id: DeductionId,
    pub name: String,
    pub amount: Money,
}

impl Deduction {
    pub fn new(name: impl Into<String>, amount: Money) -> Self {
        Self {
            id: DeductionId::new(),
            name: name.into(),
            amount,
        }
    }
}

/// A budget for one user and one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyBudget {
    /// Unique identifier
    pub id: BudgetId,

    /// Owner of the budget
    pub user_id: UserId,

    /// The month this budget covers
    pub month: Month,

    /// Income before deductions
    pub gross_income: Money,

    /// Deductions applied to gross income
    #[serde(default)]
    pub deductions: Vec<Deduction>,

    /// Notes for this month
    #[serde(default)]
    pub notes: String,

    /// When this budget was created
    pub created_at: DateTime<Utc>,

    /// When this budget was last modified
    pub updated_at: DateTime<Utc>,
}

impl MonthlyBudget {
    /// Create a new budget with no deductions
    pub fn new(user_id: UserId, month: Month, gross_income: Money) -> Self {
        let now = Utc::now();
        Self {
            id: BudgetId::new(),
            user_id,
            month,
            gross_income,
            deductions: Vec::new(),
            notes: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Sum of all deductions
    pub fn total_deductions(&self) -> Money {
        self.deductions.iter().map(|d| d.amount).sum()
    }

    /// Gross income minus deductions
    pub fn available_income(&self) -> Money {
        self.gross_income - self.total_deductions()
    }

    /// Set the gross income
    pub fn set_gross_income(&mut self, amount: Money) {
        self.gross_income = amount;
        self.updated_at = Utc::now();
    }

    /// Add a deduction and return its id
    pub fn add_deduction(&mut self, name: impl Into<String>, amount: Money) -> DeductionId {
        let deduction = Deduction::new(name, amount);
        let id = deduction.id;
        self.deductions.push(deduction);
        self.updated_at = Utc::now();
        id
    }

    /// Remove a deduction by id or case-insensitive name
    pub fn remove_deduction(&mut self, identifier: &str) -> Option<Deduction> {
        let lower = identifier.trim().to_lowercase();
        let index = self
            .deductions
            .iter()
            .position(|d| d.name.to_lowercase() == lower || d.id.matches(identifier))?;
        self.updated_at = Utc::now();
        Some(self.deductions.remove(index))
    }

    /// Validate the budget
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if self.gross_income.is_negative() {
            return Err(BudgetValidationError::NegativeIncome);
        }

        for deduction in &self.deductions {
            if deduction.name.trim().is_empty() {
                return Err(BudgetValidationError::UnnamedDeduction);
            }
            if deduction.amount.is_negative() {
                return Err(BudgetValidationError::NegativeDeduction(deduction.name.clone()));
            }
        }

        if self.total_deductions() > self.gross_income {
            return Err(BudgetValidationError::DeductionsExceedIncome {
                deductions: self.total_deductions(),
                gross: self.gross_income,
            });
        }

        Ok(())
    }
}

impl fmt::Display for MonthlyBudget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} gross: {} | deductions: {} | available: {}",
            self.month,
            self.gross_income,
            self.total_deductions(),
            self.available_income()
        )
    }
}

/// A planned spending item within a monthly budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedItem {
    pub id: PlanId,
    pub budget_id: BudgetId,
    pub category_id: CategoryId,
    pub description: String,
    pub amount: Money,
    pub created_at: DateTime<Utc>,
}

impl PlannedItem {
    pub fn new(
        budget_id: BudgetId,
        category_id: CategoryId,
        description: impl Into<String>,
        amount: Money,
    ) -> Self {
        Self {
            id: PlanId::new(),
            budget_id,
            category_id,
            description: description.into(),
            amount,
            created_at: Utc::now(),
        }
    }

    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if self.amount.is_negative() {
            return Err(BudgetValidationError::NegativePlan);
        }
        Ok(())
    }
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    NegativeIncome,
    UnnamedDeduction,
    NegativeDeduction(String),
    DeductionsExceedIncome { deductions: Money, gross: Money },
    NegativePlan,
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeIncome => write!(f, "Gross income cannot be negative"),
            Self::UnnamedDeduction => write!(f, "Deduction name cannot be empty"),
            Self::NegativeDeduction(name) => {
                write!(f, "Deduction '{}' cannot be negative", name)
            }
            Self::DeductionsExceedIncome { deductions, gross } => write!(
                f,
                "Deductions ({}) exceed gross income ({})",
                deductions, gross
            ),
            Self::NegativePlan => write!(f, "Planned amount cannot be negative"),
        }
    }
}

impl std::error::Error for BudgetValidationError {}
