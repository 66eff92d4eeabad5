//! Proportional redistribution
//!
//! When one slider moves, every other category is rescaled so that the
//! untouched categories keep their share of what is left. With Gustos=30 and
//! Ahorro=20 (3:2), pushing Necesidades from 50 to 70 leaves 30 to split,
//! giving Gustos=18 and Ahorro=12.

use serde::{Deserialize, Serialize};

use crate::models::CategoryId;

use super::model::{Allocation, AllocationEntry, TARGET_TOTAL};

/// A single slider interaction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentageChange {
    pub category_id: CategoryId,
    pub value: f64,
}

impl PercentageChange {
    pub fn new(category_id: CategoryId, value: f64) -> Self {
        Self { category_id, value }
    }
}

/// Clamp a user-supplied percentage into [0, 100]
///
/// NaN is treated as 0.
pub fn clamp_percentage(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, TARGET_TOTAL)
    }
}

/// Set one category's percentage and rescale the others
///
/// Never fails. Out-of-range values are clamped, and a category that is not
/// part of the allocation leaves it unchanged. The result is not normalised;
/// floating-point drift is left for the commit gate to judge.
pub fn redistribute(allocation: &Allocation, changed: CategoryId, new_value: f64) -> Allocation {
    if allocation.percentage(changed).is_none() {
        return allocation.clone();
    }

    let new_value = clamp_percentage(new_value);
    let others_total: f64 = allocation
        .entries()
        .iter()
        .filter(|e| e.category_id != changed)
        .map(|e| e.percentage)
        .sum();
    let remaining = TARGET_TOTAL - new_value;

    let entries = if others_total > 0.0 && remaining > 0.0 {
        let ratio = remaining / others_total;
        allocation
            .entries()
            .iter()
            .map(|e| AllocationEntry {
                category_id: e.category_id,
                percentage: if e.category_id == changed {
                    new_value
                } else {
                    clamp_percentage(e.percentage * ratio)
                },
            })
            .collect()
    } else {
        // Nothing left to rescale: the changed category absorbs everything.
        allocation
            .entries()
            .iter()
            .map(|e| AllocationEntry {
                category_id: e.category_id,
                percentage: if e.category_id == changed {
                    TARGET_TOTAL
                } else {
                    0.0
                },
            })
            .collect()
    };

    Allocation::from_entries(entries)
}

impl Allocation {
    /// Apply a slider interaction, returning the redistributed allocation
    pub fn apply_change(&self, change: PercentageChange) -> Allocation {
        redistribute(self, change.category_id, change.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocation::model::is_within_tolerance;
    use crate::allocation::test_support::{allocation_of, assert_close};

    #[test]
    fn test_scenario_push_necesidades_to_seventy() {
        let (ids, allocation) = allocation_of(&[50.0, 30.0, 20.0]);

        let result = redistribute(&allocation, ids[0], 70.0);

        assert_close(result.percentage(ids[0]).unwrap(), 70.0);
        assert_close(result.percentage(ids[1]).unwrap(), 18.0);
        assert_close(result.percentage(ids[2]).unwrap(), 12.0);
        assert!(result.is_valid());
    }

    #[test]
    fn test_input_is_not_mutated() {
        let (ids, allocation) = allocation_of(&[50.0, 30.0, 20.0]);
        let _ = redistribute(&allocation, ids[0], 10.0);
        assert_eq!(allocation.percentages(), vec![50.0, 30.0, 20.0]);
    }

    #[test]
    fn test_zero_with_others_at_full_total_leaves_them_unchanged() {
        let (ids, allocation) = allocation_of(&[0.0, 30.0, 70.0]);

        let result = redistribute(&allocation, ids[0], 0.0);
        assert_eq!(result.percentages(), vec![0.0, 30.0, 70.0]);
    }

    #[test]
    fn test_degenerate_all_others_zero() {
        let (ids, allocation) = allocation_of(&[100.0, 0.0, 0.0]);
        let result = redistribute(&allocation, ids[0], 100.0);
        assert_eq!(result.percentages(), vec![100.0, 0.0, 0.0]);

        // Dragging down with nothing to rescale still forces the slider to 100.
        let result = redistribute(&allocation, ids[0], 40.0);
        assert_eq!(result.percentages(), vec![100.0, 0.0, 0.0]);
    }

    #[test]
    fn test_pushing_to_hundred_zeroes_others() {
        let (ids, allocation) = allocation_of(&[50.0, 30.0, 20.0]);
        let result = redistribute(&allocation, ids[1], 100.0);
        assert_eq!(result.percentages(), vec![0.0, 100.0, 0.0]);
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let (ids, allocation) = allocation_of(&[50.0, 30.0, 20.0]);

        let high = redistribute(&allocation, ids[0], 250.0);
        assert_eq!(high.percentages(), vec![100.0, 0.0, 0.0]);

        let low = redistribute(&allocation, ids[0], -20.0);
        assert_close(low.percentage(ids[0]).unwrap(), 0.0);
        assert_close(low.percentage(ids[1]).unwrap(), 60.0);
        assert_close(low.percentage(ids[2]).unwrap(), 40.0);

        let nan = redistribute(&allocation, ids[0], f64::NAN);
        assert_close(nan.percentage(ids[0]).unwrap(), 0.0);
        assert!(nan.is_valid());
    }

    #[test]
    fn test_unknown_category_is_ignored() {
        let (_, allocation) = allocation_of(&[50.0, 30.0, 20.0]);
        let result = redistribute(&allocation, CategoryId::new(), 90.0);
        assert_eq!(result, allocation);
    }

    #[test]
    fn test_apply_change() {
        let (ids, allocation) = allocation_of(&[50.0, 30.0, 20.0]);
        let result = allocation.apply_change(PercentageChange::new(ids[2], 40.0));

        assert_close(result.percentage(ids[0]).unwrap(), 37.5);
        assert_close(result.percentage(ids[1]).unwrap(), 22.5);
        assert_close(result.percentage(ids[2]).unwrap(), 40.0);
    }

    #[test]
    fn test_sum_is_preserved_across_inputs() {
        let starts: &[&[f64]] = &[
            &[50.0, 30.0, 20.0],
            &[33.3, 33.3, 33.4],
            &[1.0, 99.0, 0.0],
            &[10.0, 20.0, 30.0, 40.0],
            &[25.0, 25.0, 25.0, 12.5, 12.5],
        ];

        for start in starts {
            let (ids, allocation) = allocation_of(start);
            for (index, id) in ids.iter().enumerate() {
                let others_positive = start
                    .iter()
                    .enumerate()
                    .any(|(i, pct)| i != index && *pct > 0.0);
                if !others_positive {
                    continue;
                }

                let mut value = 0.0;
                while value <= 100.0 {
                    let result = redistribute(&allocation, *id, value);
                    assert!(
                        is_within_tolerance(result.total()),
                        "start {:?}, category {}, value {} gave total {}",
                        start,
                        index,
                        value,
                        result.total()
                    );
                    value += 0.5;
                }
            }
        }
    }

    #[test]
    fn test_ratios_between_untouched_categories_are_preserved() {
        let (ids, allocation) = allocation_of(&[40.0, 15.0, 35.0, 10.0]);

        for value in [0.0, 5.0, 27.5, 60.0, 99.0] {
            let result = redistribute(&allocation, ids[0], value);
            for (b, c) in [(1, 2), (1, 3), (2, 3)] {
                let before = allocation.percentage(ids[b]).unwrap()
                    / allocation.percentage(ids[c]).unwrap();
                let after =
                    result.percentage(ids[b]).unwrap() / result.percentage(ids[c]).unwrap();
                assert_close(before, after);
            }
        }
    }

    #[test]
    fn test_repeated_drags_drift_but_stay_committable() {
        let (ids, mut allocation) = allocation_of(&[50.0, 30.0, 20.0]);

        for step in 0..200 {
            let id = ids[step % ids.len()];
            let value = (step as f64 * 7.3) % 95.0 + 1.0;
            allocation = redistribute(&allocation, id, value);
        }

        assert!(allocation.is_valid());
    }

    #[test]
    fn test_clamp_percentage() {
        assert_eq!(clamp_percentage(-1.0), 0.0);
        assert_eq!(clamp_percentage(101.0), 100.0);
        assert_eq!(clamp_percentage(42.5), 42.5);
        assert_eq!(clamp_percentage(f64::NAN), 0.0);
        assert_eq!(clamp_percentage(f64::INFINITY), 100.0);
    }
}
