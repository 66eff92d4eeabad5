//! Expense repository
//!
//! Handles persistence of actual spending to expenses.json.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::SplitError;
use crate::models::{Expense, ExpenseId, Month, UserId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ExpenseData {
    #[serde(default)]
    expenses: Vec<Expense>,
}

/// Repository for expenses
pub struct ExpenseRepository {
    path: PathBuf,
    expenses: RwLock<HashMap<ExpenseId, Expense>>,
}

impl ExpenseRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            expenses: RwLock::new(HashMap::new()),
        }
    }

    /// Load expenses from disk
    pub fn load(&self) -> Result<(), SplitError> {
        let file_data: ExpenseData = read_json(&self.path)?;

        let mut expenses = self
            .expenses
            .write()
            .map_err(|e| SplitError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        expenses.clear();
        for expense in file_data.expenses {
            expenses.insert(expense.id, expense);
        }

        Ok(())
    }

    /// Save expenses to disk, ordered by date
    pub fn save(&self) -> Result<(), SplitError> {
        let file_data = ExpenseData {
            expenses: self.get_all()?,
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get an expense by ID
    pub fn get(&self, id: ExpenseId) -> Result<Option<Expense>, SplitError> {
        let expenses = self
            .expenses
            .read()
            .map_err(|e| SplitError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(expenses.get(&id).cloned())
    }

    /// Find an expense by full or short ID
    pub fn find(&self, identifier: &str) -> Result<Option<Expense>, SplitError> {
        let expenses = self
            .expenses
            .read()
            .map_err(|e| SplitError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(expenses.values().find(|e| e.id.matches(identifier)).cloned())
    }

    /// All expenses ordered by date, then creation time
    pub fn get_all(&self) -> Result<Vec<Expense>, SplitError> {
        let expenses = self
            .expenses
            .read()
            .map_err(|e| SplitError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = expenses.values().cloned().collect();
        list.sort_by(|a, b| (a.date, a.created_at).cmp(&(b.date, b.created_at)));
        Ok(list)
    }

    /// A user's expenses dated within `month`
    pub fn get_for_month(&self, user: &UserId, month: Month) -> Result<Vec<Expense>, SplitError> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|e| &e.user_id == user && month.contains(e.date))
            .collect())
    }

    /// Insert or update an expense
    pub fn upsert(&self, expense: Expense) -> Result<(), SplitError> {
        let mut expenses = self
            .expenses
            .write()
            .map_err(|e| SplitError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        expenses.insert(expense.id, expense);
        Ok(())
    }

    /// Delete an expense
    pub fn delete(&self, id: ExpenseId) -> Result<bool, SplitError> {
        let mut expenses = self
            .expenses
            .write()
            .map_err(|e| SplitError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(expenses.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryId, Money};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn expense(user: &str, date: (i32, u32, u32), cents: i64) -> Expense {
        Expense::new(
            UserId::new(user),
            CategoryId::new(),
            NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            Money::from_cents(cents),
            "Groceries",
        )
    }

    #[test]
    fn test_month_filter() {
        let temp_dir = TempDir::new().unwrap();
        let repo = ExpenseRepository::new(temp_dir.path().join("expenses.json"));
        repo.load().unwrap();

        repo.upsert(expense("ana", (2025, 1, 31), 1000)).unwrap();
        repo.upsert(expense("ana", (2025, 2, 1), 2000)).unwrap();
        repo.upsert(expense("luis", (2025, 1, 15), 3000)).unwrap();

        let january = repo
            .get_for_month(&UserId::new("ana"), Month::new(2025, 1).unwrap())
            .unwrap();
        assert_eq!(january.len(), 1);
        assert_eq!(january[0].amount.cents(), 1000);
    }

    #[test]
    fn test_find_by_short_id_and_delete() {
        let temp_dir = TempDir::new().unwrap();
        let repo = ExpenseRepository::new(temp_dir.path().join("expenses.json"));
        repo.load().unwrap();

        let e = expense("ana", (2025, 1, 10), 1500);
        let id = e.id;
        repo.upsert(e).unwrap();
        repo.save().unwrap();

        let found = repo.find(&id.to_string()).unwrap().unwrap();
        assert_eq!(found.id, id);

        assert!(repo.delete(id).unwrap());
        assert!(repo.get(id).unwrap().is_none());
    }
}
