//! Allocation model
//!
//! An allocation maps every category to the percentage of available income it
//! receives. Entries are kept in category display order. Allocations are
//! immutable values: editing produces a new allocation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::category::sort_for_display;
use crate::models::{Category, CategoryId, PercentagePair, UserPercentage};

/// The total every committed allocation must reach
pub const TARGET_TOTAL: f64 = 100.0;

/// How far from [`TARGET_TOTAL`] a total may drift and still be committable
pub const SUM_TOLERANCE: f64 = 0.01;

/// Check a percentage total against the commit tolerance
pub fn is_within_tolerance(total: f64) -> bool {
    // The epsilon absorbs representation error right at the boundary (99.99, 100.01).
    (total - TARGET_TOTAL).abs() <= SUM_TOLERANCE + f64::EPSILON * TARGET_TOTAL
}

/// One category's share
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AllocationEntry {
    pub category_id: CategoryId,
    pub percentage: f64,
}

/// The full set of category percentages for one user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    entries: Vec<AllocationEntry>,
}

impl Allocation {
    /// Build the allocation a user starts editing from
    ///
    /// Each category takes the user's saved percentage when there is one and
    /// the category default otherwise.
    pub fn initialize(categories: &[Category], saved: &[UserPercentage]) -> Self {
        let overrides: HashMap<CategoryId, f64> = saved
            .iter()
            .map(|p| (p.category_id, p.percentage))
            .collect();

        let mut ordered = categories.to_vec();
        sort_for_display(&mut ordered);

        let entries = ordered
            .iter()
            .map(|category| AllocationEntry {
                category_id: category.id,
                percentage: overrides
                    .get(&category.id)
                    .copied()
                    .unwrap_or(category.default_percentage),
            })
            .collect();

        Self { entries }
    }

    /// Build an allocation from entries already in display order
    pub fn from_entries(entries: Vec<AllocationEntry>) -> Self {
        Self { entries }
    }

    /// Entries in display order
    pub fn entries(&self) -> &[AllocationEntry] {
        &self.entries
    }

    /// Percentage for one category
    pub fn percentage(&self, category_id: CategoryId) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.category_id == category_id)
            .map(|e| e.percentage)
    }

    /// Percentages in display order
    pub fn percentages(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.percentage).collect()
    }

    /// Sum of all percentages
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|e| e.percentage).sum()
    }

    /// Whether the total is 100 within [`SUM_TOLERANCE`]
    pub fn is_valid(&self) -> bool {
        is_within_tolerance(self.total())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The `{category_id, percentage}` list handed to persistence on save
    pub fn to_pairs(&self) -> Vec<PercentagePair> {
        self.entries
            .iter()
            .map(|e| PercentagePair {
                category_id: e.category_id,
                percentage: e.percentage,
            })
            .collect()
    }
}
