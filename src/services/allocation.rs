//! Allocation service
//!
//! Opens structure-editor sessions for a user and records committed
//! allocations in the audit log.

use std::collections::BTreeMap;

use crate::allocation::{Allocation, AllocationEditor};
use crate::audit::{generate_diff, EntityType};
use crate::error::{SplitError, SplitResult};
use crate::models::{Category, UserId, UserPercentage};
use crate::storage::Storage;

/// Result of a save that reached disk
#[derive(Debug, Default)]
pub struct CommitOutcome {
    /// Set when the percentages were saved but the audit entry was not written
    pub audit_error: Option<SplitError>,
}

pub struct AllocationService<'a> {
    storage: &'a Storage,
}

impl<'a> AllocationService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// The allocation currently in force for `user`
    pub fn current(&self, user: &UserId) -> SplitResult<Allocation> {
        let categories = self.storage.categories.get_all()?;
        let saved = self.storage.percentages.get_for_user(user)?;
        Ok(Allocation::initialize(&categories, &saved))
    }

    /// Start an editing session seeded with the user's saved allocation
    pub fn open_editor(&self, user: &UserId) -> SplitResult<AllocationEditor> {
        let categories = self.storage.categories.get_all()?;
        let saved = self.storage.percentages.get_for_user(user)?;
        Ok(AllocationEditor::open(user.clone(), categories, &saved))
    }

    /// Save the editor's allocation and audit the change
    ///
    /// Once the percentages are on disk the save stands; a failed audit write
    /// is reported in the outcome instead of as an error.
    pub fn commit(&self, editor: &mut AllocationEditor) -> SplitResult<CommitOutcome> {
        let user = editor.user_id().clone();
        let before = self.current(&user)?;

        editor.commit(self.storage)?;

        let after = editor.allocation().clone();
        let before_json = named_percentages(editor.categories(), &before);
        let after_json = named_percentages(editor.categories(), &after);
        let audit_error = self
            .storage
            .log_update(
                EntityType::UserPercentages,
                user.to_string(),
                Some("allocation".to_string()),
                &before_json,
                &after_json,
                generate_diff(&before_json, &after_json),
            )
            .err();

        Ok(CommitOutcome { audit_error })
    }

    /// Drop the user's saved percentages so category defaults apply again
    pub fn reset(&self, user: &UserId) -> SplitResult<Allocation> {
        let categories = self.storage.categories.get_all()?;
        let before = self.current(user)?;

        let removed: Vec<UserPercentage> = self.storage.percentages.clear_for_user(user)?;
        if let Err(err) = self.storage.percentages.save() {
            self.storage.percentages.restore_for_user(user, removed)?;
            return Err(err);
        }

        let after = Allocation::initialize(&categories, &[]);
        if !removed.is_empty() {
            let before_json = named_percentages(&categories, &before);
            let after_json = named_percentages(&categories, &after);
            self.storage.log_update(
                EntityType::UserPercentages,
                user.to_string(),
                Some("allocation reset".to_string()),
                &before_json,
                &after_json,
                generate_diff(&before_json, &after_json),
            )?;
        }

        Ok(after)
    }
}

/// `{category name: percentage}` for audit entries
fn named_percentages(categories: &[Category], allocation: &Allocation) -> serde_json::Value {
    let named: BTreeMap<&str, f64> = categories
        .iter()
        .filter_map(|c| allocation.percentage(c.id).map(|p| (c.name.as_str(), p)))
        .collect();
    serde_json::to_value(named).unwrap_or_default()
}
