//! Budget service
//!
//! Monthly budgets: gross income, deductions and planned spending per
//! category. A new budget's gross income defaults to the user's total
//! monthly income.

use std::collections::HashMap;

use crate::allocation::sum_by_category;
use crate::audit::{generate_diff, EntityType};
use crate::error::{SplitError, SplitResult};
use crate::models::{CategoryId, Money, Month, MonthlyBudget, PlannedItem, UserId};
use crate::storage::Storage;

use super::income::IncomeService;

/// Service for monthly budgets and planned items
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

impl<'a> BudgetService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create the budget for `month`
    ///
    /// Without an explicit `gross_income` the total monthly income of the
    /// user's active sources is used.
    pub fn create(
        &self,
        user: &UserId,
        month: Month,
        gross_income: Option<Money>,
    ) -> SplitResult<MonthlyBudget> {
        if self.storage.budgets.get_for_month(user, month)?.is_some() {
            return Err(SplitError::Duplicate {
                entity_type: "Budget",
                identifier: month.to_string(),
            });
        }

        let gross = match gross_income {
            Some(amount) => amount,
            None => IncomeService::new(self.storage).total_monthly(user)?,
        };

        let budget = MonthlyBudget::new(user.clone(), month, gross);
        budget
            .validate()
            .map_err(|e| SplitError::Validation(e.to_string()))?;

        self.storage.budgets.upsert(budget.clone())?;
        self.storage.budgets.save()?;

        self.storage.log_create(
            EntityType::Budget,
            budget.id.to_string(),
            Some(month.to_string()),
            &budget,
        )?;

        Ok(budget)
    }

    pub fn get(&self, user: &UserId, month: Month) -> SplitResult<Option<MonthlyBudget>> {
        self.storage.budgets.get_for_month(user, month)
    }

    /// The budget for `month`, or a not-found error
    pub fn require(&self, user: &UserId, month: Month) -> SplitResult<MonthlyBudget> {
        self.get(user, month)?
            .ok_or_else(|| SplitError::budget_not_found(month.to_string()))
    }

    /// A user's budgets, most recent first
    pub fn list(&self, user: &UserId) -> SplitResult<Vec<MonthlyBudget>> {
        self.storage.budgets.get_for_user(user)
    }

    /// Change the gross income of a month
    pub fn set_gross_income(
        &self,
        user: &UserId,
        month: Month,
        amount: Money,
    ) -> SplitResult<MonthlyBudget> {
        self.modify(user, month, |budget| {
            budget.set_gross_income(amount);
            Ok(())
        })
    }

    /// Add a named deduction (taxes, social security ...)
    pub fn add_deduction(
        &self,
        user: &UserId,
        month: Month,
        name: &str,
        amount: Money,
    ) -> SplitResult<MonthlyBudget> {
        self.modify(user, month, |budget| {
            let lower = name.trim().to_lowercase();
            if budget.deductions.iter().any(|d| d.name.to_lowercase() == lower) {
                return Err(SplitError::Duplicate {
                    entity_type: "Deduction",
                    identifier: name.trim().to_string(),
                });
            }
            budget.add_deduction(name.trim(), amount);
            Ok(())
        })
    }

    /// Remove a deduction by name or ID
    pub fn remove_deduction(
        &self,
        user: &UserId,
        month: Month,
        identifier: &str,
    ) -> SplitResult<MonthlyBudget> {
        self.modify(user, month, |budget| {
            budget
                .remove_deduction(identifier)
                .map(|_| ())
                .ok_or_else(|| SplitError::NotFound {
                    entity_type: "Deduction",
                    identifier: identifier.to_string(),
                })
        })
    }

    fn modify<F>(&self, user: &UserId, month: Month, change: F) -> SplitResult<MonthlyBudget>
    where
        F: FnOnce(&mut MonthlyBudget) -> SplitResult<()>,
    {
        let before = self.require(user, month)?;
        let mut budget = before.clone();
        change(&mut budget)?;
        budget
            .validate()
            .map_err(|e| SplitError::Validation(e.to_string()))?;

        self.storage.budgets.upsert(budget.clone())?;
        self.storage.budgets.save()?;

        let diff = generate_diff(&serde_json::to_value(&before)?, &serde_json::to_value(&budget)?);
        self.storage.log_update(
            EntityType::Budget,
            budget.id.to_string(),
            Some(month.to_string()),
            &before,
            &budget,
            diff,
        )?;

        Ok(budget)
    }

    /// Delete a month's budget and its planned items
    pub fn delete(&self, user: &UserId, month: Month) -> SplitResult<MonthlyBudget> {
        let budget = self.require(user, month)?;
        self.storage.budgets.delete(budget.id)?;
        self.storage.budgets.save()?;

        self.storage.log_delete(
            EntityType::Budget,
            budget.id.to_string(),
            Some(month.to_string()),
            &budget,
        )?;

        Ok(budget)
    }

    /// Plan spending against a category
    pub fn add_plan(
        &self,
        user: &UserId,
        month: Month,
        category_id: CategoryId,
        description: &str,
        amount: Money,
    ) -> SplitResult<PlannedItem> {
        let budget = self.require(user, month)?;
        if !self.storage.categories.contains(category_id)? {
            return Err(SplitError::category_not_found(category_id.to_string()));
        }

        let item = PlannedItem::new(budget.id, category_id, description.trim(), amount);
        item.validate()
            .map_err(|e| SplitError::Validation(e.to_string()))?;

        self.storage.budgets.upsert_planned(item.clone())?;
        self.storage.budgets.save()?;

        self.storage.log_create(
            EntityType::PlannedItem,
            item.id.to_string(),
            Some(item.description.clone()),
            &item,
        )?;

        Ok(item)
    }

    /// Planned items of a month
    pub fn planned(&self, user: &UserId, month: Month) -> SplitResult<Vec<PlannedItem>> {
        let budget = self.require(user, month)?;
        self.storage.budgets.get_planned(budget.id)
    }

    /// Remove a planned item by ID
    pub fn remove_plan(
        &self,
        user: &UserId,
        month: Month,
        identifier: &str,
    ) -> SplitResult<PlannedItem> {
        let item = self
            .planned(user, month)?
            .into_iter()
            .find(|p| p.id.matches(identifier))
            .ok_or_else(|| SplitError::NotFound {
                entity_type: "Planned item",
                identifier: identifier.to_string(),
            })?;

        self.storage.budgets.delete_planned(item.id)?;
        self.storage.budgets.save()?;

        self.storage.log_delete(
            EntityType::PlannedItem,
            item.id.to_string(),
            Some(item.description.clone()),
            &item,
        )?;

        Ok(item)
    }

    /// Planned totals per category for a month (empty without a budget)
    pub fn planned_by_category(
        &self,
        user: &UserId,
        month: Month,
    ) -> SplitResult<HashMap<CategoryId, Money>> {
        let Some(budget) = self.get(user, month)? else {
            return Ok(HashMap::new());
        };

        let items = self.storage.budgets.get_planned(budget.id)?;
        Ok(sum_by_category(
            items.into_iter().map(|p| (p.category_id, p.amount)),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::SplitPaths;
    use crate::models::IncomeFrequency;
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

    fn january() -> Month {
        Month::new(2025, 1).unwrap()
    }

    #[test]
    fn test_create_defaults_to_monthly_income() {
        let (_temp_dir, storage) = create_test_storage();
        let ana = UserId::new("ana");
        IncomeService::new(&storage)
            .add(&ana, "Salary", Money::from_cents(1_200_000), IncomeFrequency::Monthly)
            .unwrap();

        let service = BudgetService::new(&storage);
        let budget = service.create(&ana, january(), None).unwrap();
        assert_eq!(budget.gross_income.cents(), 1_200_000);

        let err = service.create(&ana, january(), None).unwrap_err();
        assert!(matches!(err, SplitError::Duplicate { .. }));
    }

    #[test]
    fn test_deductions_reduce_available_income() {
        let (_temp_dir, storage) = create_test_storage();
        let ana = UserId::new("ana");
        let service = BudgetService::new(&storage);
        service
            .create(&ana, january(), Some(Money::from_cents(1_200_000)))
            .unwrap();

        service
            .add_deduction(&ana, january(), "Taxes", Money::from_cents(150_000))
            .unwrap();
        let budget = service
            .add_deduction(&ana, january(), "Social security", Money::from_cents(50_000))
            .unwrap();
        assert_eq!(budget.available_income().cents(), 1_000_000);

        let err = service
            .add_deduction(&ana, january(), "Pension", Money::from_cents(5_000_000))
            .unwrap_err();
        assert!(err.is_validation());
        // The rejected deduction was not stored
        assert_eq!(
            service.require(&ana, january()).unwrap().deductions.len(),
            2
        );

        let budget = service.remove_deduction(&ana, january(), "taxes").unwrap();
        assert_eq!(budget.available_income().cents(), 1_150_000);
    }

    #[test]
    fn test_planned_items_by_category() {
        let (_temp_dir, storage) = create_test_storage();
        let ana = UserId::new("ana");
        let service = BudgetService::new(&storage);
        service
            .create(&ana, january(), Some(Money::from_cents(1_000_000)))
            .unwrap();

        let categories = storage.categories.get_all().unwrap();
        let necesidades = categories[0].id;
        service
            .add_plan(&ana, january(), necesidades, "Rent", Money::from_cents(350_000))
            .unwrap();
        let groceries = service
            .add_plan(&ana, january(), necesidades, "Groceries", Money::from_cents(80_000))
            .unwrap();

        let planned = service.planned_by_category(&ana, january()).unwrap();
        assert_eq!(planned[&necesidades].cents(), 430_000);

        service
            .remove_plan(&ana, january(), &groceries.id.to_string())
            .unwrap();
        let planned = service.planned_by_category(&ana, january()).unwrap();
        assert_eq!(planned[&necesidades].cents(), 350_000);

        assert!(service
            .planned_by_category(&ana, january().next())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_plan_requires_budget_and_category() {
        let (_temp_dir, storage) = create_test_storage();
        let ana = UserId::new("ana");
        let service = BudgetService::new(&storage);

        let err = service
            .add_plan(&ana, january(), CategoryId::new(), "Rent", Money::from_cents(1))
            .unwrap_err();
        assert!(err.is_not_found());

        service.create(&ana, january(), Some(Money::zero())).unwrap();
        let err = service
            .add_plan(&ana, january(), CategoryId::new(), "Rent", Money::from_cents(1))
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
