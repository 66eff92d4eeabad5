//! Expense model
//!
//! An expense is money actually spent against a category on a given date.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryId, ExpenseId, UserId};
use super::money::Money;

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub user_id: UserId,
    pub category_id: CategoryId,
    pub date: NaiveDate,
    /// Amount spent (positive)
    pub amount: Money,
    #[serde(default)]
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl Expense {
    pub fn new(
        user_id: UserId,
        category_id: CategoryId,
        date: NaiveDate,
        amount: Money,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: ExpenseId::new(),
            user_id,
            category_id,
            date,
            amount,
            description: description.into(),
            created_at: Utc::now(),
        }
    }

    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if !self.amount.is_positive() {
            return Err(ExpenseValidationError::NonPositiveAmount);
        }
        if self.description.len() > 200 {
            return Err(ExpenseValidationError::DescriptionTooLong(
                self.description.len(),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.date, self.amount, self.description)
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    NonPositiveAmount,
    DescriptionTooLong(usize),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount => write!(f, "Expense amount must be greater than zero"),
            Self::DescriptionTooLong(len) => {
                write!(f, "Description too long ({} chars, max 200)", len)
            }
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense(cents: i64) -> Expense {
        Expense::new(
            UserId::new("ana"),
            CategoryId::new(),
            NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            Money::from_cents(cents),
            "Mercadona",
        )
    }

    #[test]
    fn test_validation() {
        assert!(expense(4599).validate().is_ok());
        assert_eq!(
            expense(0).validate(),
            Err(ExpenseValidationError::NonPositiveAmount)
        );

        let mut long = expense(100);
        long.description = "x".repeat(201);
        assert_eq!(
            long.validate(),
            Err(ExpenseValidationError::DescriptionTooLong(201))
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(expense(4599).to_string(), "2025-01-10 $45.99 Mercadona");
    }
}
