//! Monthly budget repository
//!
//! Monthly budgets and their planned items share budgets.json. A user has at
//! most one budget per month.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::SplitError;
use crate::models::{BudgetId, Month, MonthlyBudget, PlanId, PlannedItem, UserId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable budget file
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct BudgetData {
    #[serde(default)]
    pub budgets: Vec<MonthlyBudget>,
    #[serde(default)]
    pub planned_items: Vec<PlannedItem>,
}

/// Repository for monthly budgets and planned items
pub struct BudgetRepository {
    path: PathBuf,
    budgets: RwLock<HashMap<BudgetId, MonthlyBudget>>,
    planned: RwLock<HashMap<PlanId, PlannedItem>>,
}

impl BudgetRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            budgets: RwLock::new(HashMap::new()),
            planned: RwLock::new(HashMap::new()),
        }
    }

    /// Load budgets from disk
    pub fn load(&self) -> Result<(), SplitError> {
        let file_data: BudgetData = read_json(&self.path)?;

        let mut budgets = self
            .budgets
            .write()
            .map_err(|e| SplitError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut planned = self
            .planned
            .write()
            .map_err(|e| SplitError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        budgets.clear();
        planned.clear();

        for budget in file_data.budgets {
            budgets.insert(budget.id, budget);
        }
        for item in file_data.planned_items {
            planned.insert(item.id, item);
        }

        Ok(())
    }

    /// Save budgets to disk
    pub fn save(&self) -> Result<(), SplitError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| SplitError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        let planned = self
            .planned
            .read()
            .map_err(|e| SplitError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut budget_list: Vec<_> = budgets.values().cloned().collect();
        budget_list.sort_by(|a, b| (&a.user_id, a.month).cmp(&(&b.user_id, b.month)));

        let mut planned_list: Vec<_> = planned.values().cloned().collect();
        planned_list.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        let file_data = BudgetData {
            budgets: budget_list,
            planned_items: planned_list,
        };

        write_json_atomic(&self.path, &file_data)
    }

    /// Get a budget by ID
    pub fn get(&self, id: BudgetId) -> Result<Option<MonthlyBudget>, SplitError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| SplitError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(budgets.get(&id).cloned())
    }

    /// Get a user's budget for a month
    pub fn get_for_month(
        &self,
        user: &UserId,
        month: Month,
    ) -> Result<Option<MonthlyBudget>, SplitError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| SplitError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(budgets
            .values()
            .find(|b| &b.user_id == user && b.month == month)
            .cloned())
    }

    /// A user's budgets, most recent month first
    pub fn get_for_user(&self, user: &UserId) -> Result<Vec<MonthlyBudget>, SplitError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| SplitError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = budgets
            .values()
            .filter(|b| &b.user_id == user)
            .cloned()
            .collect();
        list.sort_by(|a, b| b.month.cmp(&a.month));
        Ok(list)
    }

    /// All budgets
    pub fn get_all(&self) -> Result<Vec<MonthlyBudget>, SplitError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| SplitError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = budgets.values().cloned().collect();
        list.sort_by(|a, b| (&a.user_id, a.month).cmp(&(&b.user_id, b.month)));
        Ok(list)
    }

    /// Insert or update a budget
    pub fn upsert(&self, budget: MonthlyBudget) -> Result<(), SplitError> {
        let mut budgets = self
            .budgets
            .write()
            .map_err(|e| SplitError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        budgets.insert(budget.id, budget);
        Ok(())
    }

    /// Delete a budget together with its planned items
    pub fn delete(&self, id: BudgetId) -> Result<bool, SplitError> {
        let mut budgets = self
            .budgets
            .write()
            .map_err(|e| SplitError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut planned = self
            .planned
            .write()
            .map_err(|e| SplitError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        planned.retain(|_, item| item.budget_id != id);
        Ok(budgets.remove(&id).is_some())
    }

    /// Planned items of one budget, in creation order
    pub fn get_planned(&self, budget_id: BudgetId) -> Result<Vec<PlannedItem>, SplitError> {
        let planned = self
            .planned
            .read()
            .map_err(|e| SplitError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = planned
            .values()
            .filter(|p| p.budget_id == budget_id)
            .cloned()
            .collect();
        list.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(list)
    }

    /// All planned items
    pub fn get_all_planned(&self) -> Result<Vec<PlannedItem>, SplitError> {
        let planned = self
            .planned
            .read()
            .map_err(|e| SplitError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = planned.values().cloned().collect();
        list.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(list)
    }

    /// Insert or update a planned item
    pub fn upsert_planned(&self, item: PlannedItem) -> Result<(), SplitError> {
        let mut planned = self
            .planned
            .write()
            .map_err(|e| SplitError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        planned.insert(item.id, item);
        Ok(())
    }

    /// Delete a planned item
    pub fn delete_planned(&self, id: PlanId) -> Result<Option<PlannedItem>, SplitError> {
        let mut planned = self
            .planned
            .write()
            .map_err(|e| SplitError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(planned.remove(&id))
    }
}
