//! Allocation presets
//!
//! A preset is a fixed list of percentages applied wholesale to the
//! categories in display order (e.g. 50·30·20). Presets are absolute: applying
//! one ignores whatever the allocation looked like before.

use std::fmt;

use crate::error::{SplitError, SplitResult};
use crate::models::category::sort_for_display;
use crate::models::Category;

use super::model::{Allocation, AllocationEntry};
use super::redistribute::clamp_percentage;

const BUILTIN: &[(&str, &[f64])] = &[
    ("50-30-20", &[50.0, 30.0, 20.0]),
    ("60-20-20", &[60.0, 20.0, 20.0]),
    ("70-20-10", &[70.0, 20.0, 10.0]),
    ("40-30-30", &[40.0, 30.0, 30.0]),
];

/// A named percentage template
#[derive(Debug, Clone, PartialEq)]
pub struct Preset {
    name: String,
    values: Vec<f64>,
}

impl Preset {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// The presets shipped with the application
    pub fn builtin() -> Vec<Preset> {
        BUILTIN
            .iter()
            .map(|(name, values)| Preset::new(*name, values.to_vec()))
            .collect()
    }

    /// Look up a built-in preset
    ///
    /// `50-30-20`, `50/30/20`, `50·30·20` and `50,30,20` all name the same preset.
    pub fn find(name: &str) -> Option<Preset> {
        let wanted = normalize_name(name);
        Self::builtin().into_iter().find(|p| p.name == wanted)
    }

    /// Parse a preset from user input
    ///
    /// Accepts a built-in name or any list of percentages such as `45,35,20`.
    pub fn parse(input: &str) -> SplitResult<Preset> {
        if let Some(preset) = Self::find(input) {
            return Ok(preset);
        }

        let normalized = normalize_name(input);
        let values = normalized
            .split('-')
            .map(|part| {
                part.trim().parse::<f64>().map_err(|_| {
                    SplitError::Validation(format!("Invalid preset '{}'", input.trim()))
                })
            })
            .collect::<SplitResult<Vec<f64>>>()?;

        if let Some(bad) = values.iter().find(|v| !(0.0..=100.0).contains(*v)) {
            return Err(SplitError::Validation(format!(
                "Preset values must be between 0 and 100, got {}",
                bad
            )));
        }

        Ok(Preset::new(normalized, values))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Display label, e.g. `50·30·20`
    pub fn label(&self) -> String {
        self.values
            .iter()
            .map(|v| format_value(*v))
            .collect::<Vec<_>>()
            .join("·")
    }

    /// Apply this preset to a category list
    pub fn apply(&self, categories: &[Category]) -> Allocation {
        apply_preset(categories, &self.values)
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Overwrite an allocation from a list of preset values
///
/// Categories are zipped with the values in display order. Categories beyond
/// the preset's length get 0 and surplus values are dropped. The total is not
/// checked here; the commit gate does that.
pub fn apply_preset(categories: &[Category], values: &[f64]) -> Allocation {
    let mut ordered = categories.to_vec();
    sort_for_display(&mut ordered);

    let entries = ordered
        .iter()
        .enumerate()
        .map(|(index, category)| AllocationEntry {
            category_id: category.id,
            percentage: values.get(index).copied().map(clamp_percentage).unwrap_or(0.0),
        })
        .collect();

    Allocation::from_entries(entries)
}

fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            '/' | '·' | ',' => '-',
            other => other,
        })
        .collect()
}

fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocation::test_support::fifty_thirty_twenty;

    #[test]
    fn test_builtin_presets_sum_to_hundred() {
        for preset in Preset::builtin() {
            let total: f64 = preset.values().iter().sum();
            assert_eq!(total, 100.0, "preset {}", preset.name());
        }
    }

    #[test]
    fn test_apply_overwrites_prior_state() {
        let categories = fifty_thirty_twenty();
        let preset = Preset::find("60-20-20").unwrap();

        let allocation = preset.apply(&categories);
        assert_eq!(allocation.percentages(), vec![60.0, 20.0, 20.0]);
        assert!(allocation.is_valid());
    }

    #[test]
    fn test_apply_is_idempotent() {
        let categories = fifty_thirty_twenty();
        let once = apply_preset(&categories, &[70.0, 20.0, 10.0]);
        let twice = apply_preset(&categories, &[70.0, 20.0, 10.0]);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_short_preset_pads_with_zero() {
        let categories = fifty_thirty_twenty();
        let allocation = apply_preset(&categories, &[80.0, 20.0]);
        assert_eq!(allocation.percentages(), vec![80.0, 20.0, 0.0]);
    }

    #[test]
    fn test_long_preset_drops_surplus() {
        let categories = fifty_thirty_twenty();
        let allocation = apply_preset(&categories, &[40.0, 30.0, 20.0, 10.0]);
        assert_eq!(allocation.percentages(), vec![40.0, 30.0, 20.0]);
        assert!(!allocation.is_valid());
    }

    #[test]
    fn test_apply_follows_display_order() {
        let mut categories = fifty_thirty_twenty();
        categories.swap(0, 2);

        let allocation = apply_preset(&categories, &[60.0, 25.0, 15.0]);
        assert_eq!(allocation.entries()[0].category_id, categories[2].id);
        assert_eq!(allocation.percentage(categories[2].id), Some(60.0));
    }

    #[test]
    fn test_find_accepts_separators() {
        assert!(Preset::find("50/30/20").is_some());
        assert!(Preset::find("50·30·20").is_some());
        assert!(Preset::find(" 50,30,20 ").is_some());
        assert!(Preset::find("33-33-34").is_none());
    }

    #[test]
    fn test_parse_custom_preset() {
        let preset = Preset::parse("45,35,20").unwrap();
        assert_eq!(preset.values(), &[45.0, 35.0, 20.0]);
        assert_eq!(preset.label(), "45·35·20");
        assert_eq!(Preset::parse("45, 35, 20").unwrap(), preset);

        let fractional = Preset::parse("33.5/33.5/33").unwrap();
        assert_eq!(fractional.label(), "33.5·33.5·33");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Preset::parse("lots-of-savings").unwrap_err().is_validation());
        assert!(Preset::parse("150,-50").unwrap_err().is_validation());
    }
}
