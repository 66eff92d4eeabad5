//! Expense service
//!
//! Records actual spending and aggregates it per category for comparison
//! against the assigned and planned amounts.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::allocation::sum_by_category;
use crate::audit::EntityType;
use crate::error::{SplitError, SplitResult};
use crate::models::{CategoryId, Expense, Money, Month, UserId};
use crate::storage::Storage;

pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

/// Filters for [`ExpenseService::list`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpenseFilter {
    pub month: Option<Month>,
    pub category_id: Option<CategoryId>,
}

impl<'a> ExpenseService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record an expense
    pub fn add(
        &self,
        user: &UserId,
        category_id: CategoryId,
        date: NaiveDate,
        amount: Money,
        description: &str,
    ) -> SplitResult<Expense> {
        if !self.storage.categories.contains(category_id)? {
            return Err(SplitError::category_not_found(category_id.to_string()));
        }

        let expense = Expense::new(user.clone(), category_id, date, amount, description.trim());
        expense
            .validate()
            .map_err(|e| SplitError::Validation(e.to_string()))?;

        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()?;

        self.storage.log_create(
            EntityType::Expense,
            expense.id.to_string(),
            Some(expense.description.clone()),
            &expense,
        )?;

        Ok(expense)
    }

    /// A user's expenses, oldest first
    pub fn list(&self, user: &UserId, filter: ExpenseFilter) -> SplitResult<Vec<Expense>> {
        Ok(self
            .storage
            .expenses
            .get_all()?
            .into_iter()
            .filter(|e| &e.user_id == user)
            .filter(|e| filter.month.map_or(true, |m| m.contains(e.date)))
            .filter(|e| filter.category_id.map_or(true, |c| e.category_id == c))
            .collect())
    }

    /// Delete one of the user's expenses by ID
    pub fn delete(&self, user: &UserId, identifier: &str) -> SplitResult<Expense> {
        let expense = self
            .storage
            .expenses
            .find(identifier)?
            .filter(|e| &e.user_id == user)
            .ok_or_else(|| SplitError::expense_not_found(identifier))?;

        self.storage.expenses.delete(expense.id)?;
        self.storage.expenses.save()?;

        self.storage.log_delete(
            EntityType::Expense,
            expense.id.to_string(),
            Some(expense.description.clone()),
            &expense,
        )?;

        Ok(expense)
    }

    /// Actual spending per category in `month`
    pub fn actual_by_category(
        &self,
        user: &UserId,
        month: Month,
    ) -> SplitResult<HashMap<CategoryId, Money>> {
        let expenses = self.storage.expenses.get_for_month(user, month)?;
        Ok(sum_by_category(
            expenses.into_iter().map(|e| (e.category_id, e.amount)),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::SplitPaths;
    use crate::storage::initialize_storage;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = SplitPaths::with_base_dir(temp_dir.path().to_path_buf());
        initialize_storage(&paths).unwrap();
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, month, day).unwrap()
    }

    #[test]
    fn test_actual_by_category_for_month() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let ana = UserId::new("ana");
        let categories = storage.categories.get_all().unwrap();
        let (necesidades, gustos) = (categories[0].id, categories[1].id);

        service
            .add(&ana, necesidades, date(1, 3), Money::from_cents(40_000), "Groceries")
            .unwrap();
        service
            .add(&ana, necesidades, date(1, 20), Money::from_cents(10_000), "Pharmacy")
            .unwrap();
        service
            .add(&ana, gustos, date(1, 21), Money::from_cents(6_000), "Cinema")
            .unwrap();
        service
            .add(&ana, gustos, date(2, 1), Money::from_cents(9_900), "Concert")
            .unwrap();

        let actual = service
            .actual_by_category(&ana, Month::new(2025, 1).unwrap())
            .unwrap();
        assert_eq!(actual[&necesidades].cents(), 50_000);
        assert_eq!(actual[&gustos].cents(), 6_000);

        let filter = ExpenseFilter {
            month: None,
            category_id: Some(gustos),
        };
        assert_eq!(service.list(&ana, filter).unwrap().len(), 2);
    }

    #[test]
    fn test_add_validates() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let ana = UserId::new("ana");
        let necesidades = storage.categories.get_all().unwrap()[0].id;

        let err = service
            .add(&ana, necesidades, date(1, 1), Money::zero(), "Nothing")
            .unwrap_err();
        assert!(err.is_validation());

        let err = service
            .add(&ana, CategoryId::new(), date(1, 1), Money::from_cents(100), "Lost")
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_delete_only_own_expenses() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let ana = UserId::new("ana");
        let necesidades = storage.categories.get_all().unwrap()[0].id;

        let expense = service
            .add(&ana, necesidades, date(1, 1), Money::from_cents(100), "Bread")
            .unwrap();
        let id = expense.id.to_string();

        assert!(service
            .delete(&UserId::new("luis"), &id)
            .unwrap_err()
            .is_not_found());
        service.delete(&ana, &id).unwrap();
        assert!(service.list(&ana, ExpenseFilter::default()).unwrap().is_empty());
    }
}
