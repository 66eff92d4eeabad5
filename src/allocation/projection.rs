//! Amount projection
//!
//! Turns percentages into currency amounts for a given available income, and
//! lines them up against planned and actual spending per category.

use std::collections::HashMap;
use std::hash::Hash;
use std::ops::Add;

use serde::Serialize;

use crate::models::category::sort_for_display;
use crate::models::{Category, CategoryId, Money};

use super::model::Allocation;

/// The amount a category receives from the available income
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProjectedAmount {
    pub category_id: CategoryId,
    pub percentage: f64,
    /// In major currency units, unrounded
    pub amount: f64,
}

/// Project an allocation onto an available income
///
/// `amount = available_income * percentage / 100`. Rounding is left to the
/// caller that displays or stores the amount.
pub fn project(allocation: &Allocation, available_income: f64) -> Vec<ProjectedAmount> {
    allocation
        .entries()
        .iter()
        .map(|entry| ProjectedAmount {
            category_id: entry.category_id,
            percentage: entry.percentage,
            amount: available_income * entry.percentage / 100.0,
        })
        .collect()
}

/// Group `(key, amount)` pairs by key and sum each group
pub fn sum_by_category<K, T, I>(items: I) -> HashMap<K, T>
where
    K: Eq + Hash,
    T: Copy + Default + Add<Output = T>,
    I: IntoIterator<Item = (K, T)>,
{
    let mut totals: HashMap<K, T> = HashMap::new();
    for (key, amount) in items {
        let total = totals.entry(key).or_default();
        *total = *total + amount;
    }
    totals
}

/// Assigned vs. planned vs. actual for one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryComparison {
    pub category_id: CategoryId,
    pub name: String,
    pub order: i32,
    pub percentage: f64,
    /// Projected from the allocation, major units, unrounded
    pub assigned: f64,
    pub planned: Money,
    pub actual: Money,
}

impl CategoryComparison {
    /// Planned minus actual; negative means spending ran over the plan
    pub fn planned_remaining(&self) -> Money {
        self.planned - self.actual
    }

    /// Assigned minus actual, in major units
    pub fn assigned_remaining(&self) -> f64 {
        self.assigned - self.actual.as_major_units()
    }

    /// Whether actual spending exceeded the assigned amount
    pub fn is_over_assigned(&self) -> bool {
        self.assigned_remaining() < 0.0
    }
}

/// Build comparison rows for every category, in display order
///
/// Categories missing from `allocation`, `planned` or `actual` count as zero.
pub fn compare(
    categories: &[Category],
    allocation: &Allocation,
    available_income: f64,
    planned: &HashMap<CategoryId, Money>,
    actual: &HashMap<CategoryId, Money>,
) -> Vec<CategoryComparison> {
    let mut ordered = categories.to_vec();
    sort_for_display(&mut ordered);

    ordered
        .into_iter()
        .map(|category| {
            let percentage = allocation.percentage(category.id).unwrap_or(0.0);
            CategoryComparison {
                category_id: category.id,
                percentage,
                assigned: available_income * percentage / 100.0,
                planned: planned.get(&category.id).copied().unwrap_or_default(),
                actual: actual.get(&category.id).copied().unwrap_or_default(),
                name: category.name,
                order: category.order,
            }
        })
        .collect()
}
