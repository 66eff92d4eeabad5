//! Income source model
//!
//! Users record where their money comes from (salary, freelance work, ...).
//! The monthly equivalent of all active sources seeds a new month's gross
//! income.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{IncomeId, UserId};
use super::money::Money;

/// How often an income source pays out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum IncomeFrequency {
    Weekly,
    Biweekly,
    #[default]
    Monthly,
    Annual,
}

impl IncomeFrequency {
    /// Convert one payment into its monthly equivalent
    pub fn monthly_equivalent(&self, amount: Money) -> Money {
        let cents = amount.cents();
        let monthly = match self {
            Self::Weekly => cents * 52 / 12,
            Self::Biweekly => cents * 26 / 12,
            Self::Monthly => cents,
            Self::Annual => cents / 12,
        };
        Money::from_cents(monthly)
    }

    /// Parse a frequency name
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "weekly" | "week" => Some(Self::Weekly),
            "biweekly" | "bi-weekly" | "fortnightly" => Some(Self::Biweekly),
            "monthly" | "month" => Some(Self::Monthly),
            "annual" | "yearly" | "year" => Some(Self::Annual),
            _ => None,
        }
    }
}

impl fmt::Display for IncomeFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weekly => write!(f, "weekly"),
            Self::Biweekly => write!(f, "biweekly"),
            Self::Monthly => write!(f, "monthly"),
            Self::Annual => write!(f, "annual"),
        }
    }
}

/// Validation errors for income sources
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IncomeValidationError {
    EmptyName,
    NegativeAmount,
}

impl fmt::Display for IncomeValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Income source name cannot be empty"),
            Self::NegativeAmount => write!(f, "Income amount cannot be negative"),
        }
    }
}

impl std::error::Error for IncomeValidationError {}

/// A recurring source of income
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeSource {
    pub id: IncomeId,
    pub user_id: UserId,
    pub name: String,
    pub amount: Money,
    #[serde(default)]
    pub frequency: IncomeFrequency,
    #[serde(default = "default_active")]
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

impl IncomeSource {
    /// Create a new active income source
    pub fn new(
        user_id: UserId,
        name: impl Into<String>,
        amount: Money,
        frequency: IncomeFrequency,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: IncomeId::new(),
            user_id,
            name: name.into(),
            amount,
            frequency,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// The amount this source contributes per month
    pub fn monthly_amount(&self) -> Money {
        self.frequency.monthly_equivalent(self.amount)
    }

    /// Set the payment amount
    pub fn set_amount(&mut self, amount: Money) {
        self.amount = amount;
        self.updated_at = Utc::now();
    }

    /// Mark the source active or inactive
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        self.updated_at = Utc::now();
    }

    /// Validate the income source
    pub fn validate(&self) -> Result<(), IncomeValidationError> {
        if self.name.trim().is_empty() {
            return Err(IncomeValidationError::EmptyName);
        }
        if self.amount.is_negative() {
            return Err(IncomeValidationError::NegativeAmount);
        }
        Ok(())
    }
}
