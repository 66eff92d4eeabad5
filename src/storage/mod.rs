//! Storage layer for budget-split
//!
//! JSON file repositories with atomic writes, coordinated by [`Storage`],
//! which also owns the audit logger.

pub mod budgets;
pub mod categories;
pub mod expenses;
pub mod family;
pub mod file_io;
pub mod income;
pub mod init;
pub mod percentages;

pub use budgets::BudgetRepository;
pub use categories::CategoryRepository;
pub use expenses::ExpenseRepository;
pub use family::FamilyRepository;
pub use file_io::{read_json, write_json_atomic};
pub use income::IncomeRepository;
pub use init::initialize_storage;
pub use percentages::PercentageRepository;

use std::collections::HashSet;

use serde::Serialize;

use crate::allocation::AllocationStore;
use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::SplitPaths;
use crate::error::{SplitError, SplitResult};
use crate::models::{CategoryId, PercentagePair, UserId};

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: SplitPaths,
    audit: AuditLogger,
    actor: Option<UserId>,
    pub categories: CategoryRepository,
    pub percentages: PercentageRepository,
    pub income: IncomeRepository,
    pub budgets: BudgetRepository,
    pub expenses: ExpenseRepository,
    pub family: FamilyRepository,
}

impl Storage {
    /// Create a new Storage instance, creating directories as needed
    pub fn new(paths: SplitPaths) -> Result<Self, SplitError> {
        paths.ensure_directories()?;

        Ok(Self {
            audit: AuditLogger::new(paths.audit_log()),
            actor: None,
            categories: CategoryRepository::new(paths.categories_file()),
            percentages: PercentageRepository::new(paths.percentages_file()),
            income: IncomeRepository::new(paths.income_file()),
            budgets: BudgetRepository::new(paths.budgets_file()),
            expenses: ExpenseRepository::new(paths.expenses_file()),
            family: FamilyRepository::new(paths.family_file()),
            paths,
        })
    }

    pub fn paths(&self) -> &SplitPaths {
        &self.paths
    }

    /// Set the user recorded as the actor of audited changes
    pub fn set_actor(&mut self, actor: UserId) {
        self.actor = Some(actor);
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), SplitError> {
        self.categories.load()?;
        self.percentages.load()?;
        self.income.load()?;
        self.budgets.load()?;
        self.expenses.load()?;
        self.family.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), SplitError> {
        self.categories.save()?;
        self.percentages.save()?;
        self.income.save()?;
        self.budgets.save()?;
        self.expenses.save()?;
        self.family.save()?;
        Ok(())
    }

    /// Check if storage has been initialized (has a settings file)
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    /// IDs of every known category
    pub fn category_ids(&self) -> SplitResult<HashSet<CategoryId>> {
        Ok(self.categories.get_all()?.into_iter().map(|c| c.id).collect())
    }

    fn record(&self, entry: AuditEntry) -> SplitResult<()> {
        let entry = match &self.actor {
            Some(actor) => entry.by(actor),
            None => entry,
        };
        self.audit.log(&entry)
    }

    /// Audit a created record
    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> SplitResult<()> {
        self.record(AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    /// Audit a changed record
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        diff_summary: Option<String>,
    ) -> SplitResult<()> {
        self.record(AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
            diff_summary,
        ))
    }

    /// Audit a removed record
    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> SplitResult<()> {
        self.record(AuditEntry::delete(entity_type, entity_id, entity_name, entity))
    }
}

impl AllocationStore for Storage {
    /// Validate and persist a user's full percentage set as one batch
    ///
    /// If writing the file fails the in-memory set is rolled back, so the
    /// repository never holds a batch that is not on disk.
    fn replace_percentages(&self, user: &UserId, pairs: &[PercentagePair]) -> SplitResult<()> {
        let known = self.category_ids()?;
        let previous = self.percentages.replace_for_user(user, pairs, &known)?;

        if let Err(err) = self.percentages.save() {
            self.percentages.restore_for_user(user, previous)?;
            return Err(SplitError::PersistenceRejected(err.to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn seeded_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = SplitPaths::with_base_dir(temp_dir.path().to_path_buf());
        initialize_storage(&paths).unwrap();
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SplitPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(!storage.is_initialized());
    }

    #[test]
    fn test_replace_percentages_persists_batch() {
        let (temp_dir, storage) = seeded_storage();
        let ana = UserId::new("ana");
        let pairs: Vec<_> = storage
            .categories
            .get_all()
            .unwrap()
            .iter()
            .zip([60.0, 20.0, 20.0])
            .map(|(c, percentage)| PercentagePair {
                category_id: c.id,
                percentage,
            })
            .collect();

        storage.replace_percentages(&ana, &pairs).unwrap();

        let reloaded = PercentageRepository::new(
            SplitPaths::with_base_dir(temp_dir.path().to_path_buf()).percentages_file(),
        );
        reloaded.load().unwrap();
        assert_eq!(reloaded.get_for_user(&ana).unwrap().len(), 3);
    }

    #[test]
    fn test_replace_percentages_rejects_unknown_category() {
        let (_temp_dir, storage) = seeded_storage();
        let pairs = vec![PercentagePair {
            category_id: CategoryId::new(),
            percentage: 100.0,
        }];

        let err = storage
            .replace_percentages(&UserId::new("ana"), &pairs)
            .unwrap_err();
        assert!(matches!(err, SplitError::PersistenceRejected(_)));
    }

    #[test]
    fn test_replace_percentages_requires_every_category() {
        let (_temp_dir, storage) = seeded_storage();
        let ana = UserId::new("ana");
        let necesidades = storage
            .categories
            .get_all()
            .unwrap()
            .into_iter()
            .find(|c| c.name == "Necesidades")
            .unwrap();
        let pairs = vec![PercentagePair {
            category_id: necesidades.id,
            percentage: 100.0,
        }];

        let err = storage.replace_percentages(&ana, &pairs).unwrap_err();
        assert!(matches!(err, SplitError::PersistenceRejected(_)));

        let categories = storage.categories.get_all().unwrap();
        let saved = storage.percentages.get_for_user(&ana).unwrap();
        assert!(saved.is_empty());
        assert!(crate::allocation::Allocation::initialize(&categories, &saved).is_valid());
    }

    #[test]
    fn test_audit_entries_carry_actor() {
        let (_temp_dir, mut storage) = seeded_storage();
        storage.set_actor(UserId::new("ana"));

        storage
            .log_create(EntityType::Category, "cat-1", None, &serde_json::json!({}))
            .unwrap();

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].actor, Some(UserId::new("ana")));
    }
}
