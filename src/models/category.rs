//! Category model
//!
//! Categories are the top-level budget buckets a user splits income across
//! (e.g. "Necesidades", "Gustos", "Ahorro"). They are seeded once and carry a
//! system-wide default percentage that applies until a user saves their own.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use super::ids::CategoryId;

/// A top-level budget category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,

    /// Category name
    pub name: String,

    /// Fixed display order
    pub order: i32,

    /// Percentage used when the user has not saved one
    pub default_percentage: f64,

    /// Short description shown in listings
    #[serde(default)]
    pub description: String,

    /// When the category was created
    pub created_at: DateTime<Utc>,
}

impl Category {
    /// Create a new category
    pub fn new(name: impl Into<String>, order: i32, default_percentage: f64) -> Self {
        Self {
            id: CategoryId::new(),
            name: name.into(),
            order,
            default_percentage,
            description: String::new(),
            created_at: Utc::now(),
        }
    }

    /// Display ordering: `order` first, then name alphabetically
    pub fn display_cmp(&self, other: &Self) -> Ordering {
        self.order
            .cmp(&other.order)
            .then_with(|| self.name.cmp(&other.name))
    }

    /// Validate the category
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        if self.name.len() > 50 {
            return Err(CategoryValidationError::NameTooLong(self.name.len()));
        }

        if !(0.0..=100.0).contains(&self.default_percentage) {
            return Err(CategoryValidationError::PercentageOutOfRange(
                self.default_percentage,
            ));
        }

        Ok(())
    }
}

/// Sort categories into display order
pub fn sort_for_display(categories: &mut [Category]) {
    categories.sort_by(|a, b| a.display_cmp(b));
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// The categories seeded on first run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultCategory {
    Necesidades,
    Gustos,
    Ahorro,
}

impl DefaultCategory {
    /// Get all default categories in display order
    pub fn all() -> &'static [Self] {
        &[Self::Necesidades, Self::Gustos, Self::Ahorro]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Necesidades => "Necesidades",
            Self::Gustos => "Gustos",
            Self::Ahorro => "Ahorro",
        }
    }

    pub fn default_percentage(&self) -> f64 {
        match self {
            Self::Necesidades => 50.0,
            Self::Gustos => 30.0,
            Self::Ahorro => 20.0,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Necesidades => "Rent, groceries, utilities, transport",
            Self::Gustos => "Dining out, entertainment, hobbies",
            Self::Ahorro => "Savings, investments, debt payoff",
        }
    }

    /// Create a Category from this default
    pub fn to_category(&self, order: i32) -> Category {
        let mut category = Category::new(self.name(), order, self.default_percentage());
        category.description = self.description().to_string();
        category
    }
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
    PercentageOutOfRange(f64),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Category name too long ({} chars, max 50)", len)
            }
            Self::PercentageOutOfRange(pct) => {
                write!(f, "Default percentage must be between 0 and 100, got {}", pct)
            }
        }
    }
}

impl std::error::Error for CategoryValidationError {}
