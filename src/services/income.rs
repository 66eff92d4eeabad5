//! Income service
//!
//! Manages a user's income sources and the monthly total that seeds new
//! budgets.

use crate::audit::EntityType;
use crate::error::{SplitError, SplitResult};
use crate::models::{IncomeFrequency, IncomeSource, Money, UserId};
use crate::storage::Storage;

/// Service for income source management
pub struct IncomeService<'a> {
    storage: &'a Storage,
}

impl<'a> IncomeService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Add an income source
    pub fn add(
        &self,
        user: &UserId,
        name: &str,
        amount: Money,
        frequency: IncomeFrequency,
    ) -> SplitResult<IncomeSource> {
        let name = name.trim();
        if self.find(user, name)?.is_some() {
            return Err(SplitError::Duplicate {
                entity_type: "Income source",
                identifier: name.to_string(),
            });
        }

        let source = IncomeSource::new(user.clone(), name, amount, frequency);
        source
            .validate()
            .map_err(|e| SplitError::Validation(e.to_string()))?;

        self.storage.income.upsert(source.clone())?;
        self.storage.income.save()?;

        self.storage.log_create(
            EntityType::IncomeSource,
            source.id.to_string(),
            Some(source.name.clone()),
            &source,
        )?;

        Ok(source)
    }

    /// A user's income sources, oldest first
    pub fn list(&self, user: &UserId) -> SplitResult<Vec<IncomeSource>> {
        self.storage.income.get_for_user(user)
    }

    /// Find one of the user's sources by name (case-insensitive) or ID
    pub fn find(&self, user: &UserId, identifier: &str) -> SplitResult<Option<IncomeSource>> {
        let lower = identifier.trim().to_lowercase();
        Ok(self
            .list(user)?
            .into_iter()
            .find(|s| s.name.to_lowercase() == lower || s.id.matches(identifier)))
    }

    fn require(&self, user: &UserId, identifier: &str) -> SplitResult<IncomeSource> {
        self.find(user, identifier)?
            .ok_or_else(|| SplitError::income_not_found(identifier))
    }

    /// Change the name, amount or frequency of a source
    pub fn update(
        &self,
        user: &UserId,
        identifier: &str,
        name: Option<&str>,
        amount: Option<Money>,
        frequency: Option<IncomeFrequency>,
    ) -> SplitResult<IncomeSource> {
        let before = self.require(user, identifier)?;
        let mut source = before.clone();

        if let Some(name) = name {
            source.name = name.trim().to_string();
        }
        if let Some(amount) = amount {
            source.set_amount(amount);
        }
        if let Some(frequency) = frequency {
            source.frequency = frequency;
        }
        source
            .validate()
            .map_err(|e| SplitError::Validation(e.to_string()))?;

        self.save_update(&before, &source)?;
        Ok(source)
    }

    /// Mark a source active or inactive
    pub fn set_active(
        &self,
        user: &UserId,
        identifier: &str,
        active: bool,
    ) -> SplitResult<IncomeSource> {
        let before = self.require(user, identifier)?;
        let mut source = before.clone();
        source.set_active(active);

        self.save_update(&before, &source)?;
        Ok(source)
    }

    fn save_update(&self, before: &IncomeSource, after: &IncomeSource) -> SplitResult<()> {
        self.storage.income.upsert(after.clone())?;
        self.storage.income.save()?;

        let diff = crate::audit::generate_diff(
            &serde_json::to_value(before)?,
            &serde_json::to_value(after)?,
        );
        self.storage.log_update(
            EntityType::IncomeSource,
            after.id.to_string(),
            Some(after.name.clone()),
            before,
            after,
            diff,
        )
    }

    /// Delete a source
    pub fn delete(&self, user: &UserId, identifier: &str) -> SplitResult<IncomeSource> {
        let source = self.require(user, identifier)?;
        self.storage.income.delete(source.id)?;
        self.storage.income.save()?;

        self.storage.log_delete(
            EntityType::IncomeSource,
            source.id.to_string(),
            Some(source.name.clone()),
            &source,
        )?;

        Ok(source)
    }

    /// Monthly equivalent of all active sources
    pub fn total_monthly(&self, user: &UserId) -> SplitResult<Money> {
        Ok(self
            .list(user)?
            .iter()
            .filter(|s| s.active)
            .map(|s| s.monthly_amount())
            .sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::SplitPaths;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = SplitPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_total_monthly_counts_active_sources() {
        let (_temp_dir, storage) = create_test_storage();
        let service = IncomeService::new(&storage);
        let ana = UserId::new("ana");

        service
            .add(&ana, "Salary", Money::from_cents(900_000), IncomeFrequency::Monthly)
            .unwrap();
        service
            .add(&ana, "Freelance", Money::from_cents(1_200_000), IncomeFrequency::Annual)
            .unwrap();
        service
            .add(&ana, "Old job", Money::from_cents(500_000), IncomeFrequency::Monthly)
            .unwrap();
        service.set_active(&ana, "old job", false).unwrap();

        assert_eq!(service.total_monthly(&ana).unwrap().cents(), 1_000_000);
        assert!(service.total_monthly(&UserId::new("luis")).unwrap().is_zero());
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        let service = IncomeService::new(&storage);
        let ana = UserId::new("ana");

        service
            .add(&ana, "Salary", Money::from_cents(100), IncomeFrequency::Monthly)
            .unwrap();
        let err = service
            .add(&ana, "salary", Money::from_cents(100), IncomeFrequency::Monthly)
            .unwrap_err();
        assert!(matches!(err, SplitError::Duplicate { .. }));
    }

    #[test]
    fn test_update_and_delete() {
        let (_temp_dir, storage) = create_test_storage();
        let service = IncomeService::new(&storage);
        let ana = UserId::new("ana");

        service
            .add(&ana, "Salary", Money::from_cents(100_000), IncomeFrequency::Monthly)
            .unwrap();
        let updated = service
            .update(&ana, "Salary", None, Some(Money::from_cents(150_000)), None)
            .unwrap();
        assert_eq!(updated.amount.cents(), 150_000);

        let err = service
            .update(&ana, "Salary", None, Some(Money::from_cents(-1)), None)
            .unwrap_err();
        assert!(err.is_validation());

        service.delete(&ana, "salary").unwrap();
        assert!(service.list(&ana).unwrap().is_empty());
        assert!(service.delete(&ana, "salary").unwrap_err().is_not_found());

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 3);
        assert!(entries[1]
            .diff_summary
            .as_deref()
            .unwrap()
            .contains("amount: 100000 -> 150000"));
    }
}
