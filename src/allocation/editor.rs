//! Allocation editing session
//!
//! One editor holds the live allocation for one user while they move sliders
//! or pick presets. Saving hands the full allocation to an
//! [`AllocationStore`]; at most one save may be outstanding at a time, and a
//! failed save leaves the edited allocation in place so the user can retry.
//! Dropping the editor discards unsaved changes.

use crate::error::{SplitError, SplitResult};
use crate::models::category::sort_for_display;
use crate::models::{Category, CategoryId, PercentagePair, UserId, UserPercentage};

use super::gate;
use super::model::Allocation;
use super::preset::{apply_preset, Preset};
use super::redistribute::{redistribute, PercentageChange};

/// Persistence side of a save
///
/// Implementations replace every saved percentage of `user` with `pairs` as
/// one batch, and must refuse (without writing) a batch whose total is not
/// 100 within tolerance.
pub trait AllocationStore {
    fn replace_percentages(&self, user: &UserId, pairs: &[PercentagePair]) -> SplitResult<()>;
}

/// Live editing state for one user's allocation
#[derive(Debug, Clone)]
pub struct AllocationEditor {
    user_id: UserId,
    categories: Vec<Category>,
    saved: Allocation,
    current: Allocation,
    commit_in_flight: bool,
}

impl AllocationEditor {
    /// Start editing from the user's saved percentages (or category defaults)
    pub fn open(user_id: UserId, categories: Vec<Category>, saved: &[UserPercentage]) -> Self {
        let mut categories = categories;
        sort_for_display(&mut categories);

        let initial = Allocation::initialize(&categories, saved);
        Self {
            user_id,
            categories,
            saved: initial.clone(),
            current: initial,
            commit_in_flight: false,
        }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Categories in display order
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// The allocation as currently edited
    pub fn allocation(&self) -> &Allocation {
        &self.current
    }

    /// Whether there are unsaved changes
    pub fn is_dirty(&self) -> bool {
        self.current != self.saved
    }

    /// Move one slider
    pub fn set_percentage(&mut self, category_id: CategoryId, value: f64) -> &Allocation {
        self.current = redistribute(&self.current, category_id, value);
        &self.current
    }

    /// Apply a slider event
    pub fn apply_change(&mut self, change: PercentageChange) -> &Allocation {
        self.set_percentage(change.category_id, change.value)
    }

    /// Resolve `name=value` as typed by a user into a slider event
    ///
    /// The category may be given by name (any case) or id. The value is not
    /// range-checked here; redistribution clamps it.
    pub fn parse_change(&self, input: &str) -> SplitResult<PercentageChange> {
        let (name, value) = input.split_once('=').ok_or_else(|| {
            SplitError::Validation(format!(
                "Expected <category>=<percentage>, got '{}'",
                input.trim()
            ))
        })?;

        let name = name.trim();
        let category = self
            .categories
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name) || c.id.matches(name))
            .ok_or_else(|| SplitError::category_not_found(name))?;

        let value = value.trim().trim_end_matches('%').trim();
        let value = value
            .parse::<f64>()
            .map_err(|_| SplitError::Validation(format!("Invalid percentage '{}'", value)))?;

        Ok(PercentageChange::new(category.id, value))
    }

    /// Replace the allocation with a preset
    pub fn apply_preset(&mut self, preset: &Preset) -> &Allocation {
        self.current = apply_preset(&self.categories, preset.values());
        &self.current
    }

    /// Go back to the category defaults
    pub fn reset_to_defaults(&mut self) -> &Allocation {
        self.current = Allocation::initialize(&self.categories, &[]);
        &self.current
    }

    /// Drop unsaved changes, returning to the last saved allocation
    pub fn revert(&mut self) -> &Allocation {
        self.current = self.saved.clone();
        &self.current
    }

    /// Whether the save control should be enabled
    pub fn can_commit(&self) -> bool {
        !self.commit_in_flight && gate::can_commit(&self.current)
    }

    /// Message to show next to a disabled save control
    pub fn blocking_message(&self) -> Option<String> {
        gate::blocking_message(&self.current)
    }

    pub fn is_commit_in_flight(&self) -> bool {
        self.commit_in_flight
    }

    /// Start a save, returning the batch to hand to persistence
    ///
    /// Refused when the allocation does not total 100% or another save is
    /// still outstanding. Must be paired with [`finish_commit`](Self::finish_commit).
    pub fn begin_commit(&mut self) -> SplitResult<Vec<PercentagePair>> {
        if self.commit_in_flight {
            return Err(SplitError::CommitInFlight);
        }
        gate::ensure_committable(&self.current)?;

        self.commit_in_flight = true;
        Ok(self.current.to_pairs())
    }

    /// Record the outcome of a save started with [`begin_commit`](Self::begin_commit)
    ///
    /// On failure the edited allocation is kept and the error is returned.
    pub fn finish_commit(
        &mut self,
        submitted: &[PercentagePair],
        outcome: SplitResult<()>,
    ) -> SplitResult<()> {
        self.commit_in_flight = false;
        outcome?;
        self.saved = Allocation::from_entries(
            submitted
                .iter()
                .map(|p| super::model::AllocationEntry {
                    category_id: p.category_id,
                    percentage: p.percentage,
                })
                .collect(),
        );
        Ok(())
    }

    /// Validate, save through `store`, and settle the session
    pub fn commit<S>(&mut self, store: &S) -> SplitResult<()>
    where
        S: AllocationStore + ?Sized,
    {
        let pairs = self.begin_commit()?;
        let outcome = store.replace_percentages(&self.user_id, &pairs);
        self.finish_commit(&pairs, outcome)
    }
}
