//! Income source repository
//!
//! Handles persistence of income sources to income.json.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::SplitError;
use crate::models::{IncomeId, IncomeSource, UserId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct IncomeData {
    #[serde(default)]
    sources: Vec<IncomeSource>,
}

/// Repository for income sources
pub struct IncomeRepository {
    path: PathBuf,
    sources: RwLock<HashMap<IncomeId, IncomeSource>>,
}

impl IncomeRepository {
    /// Create a new repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            sources: RwLock::new(HashMap::new()),
        }
    }

    /// Load income sources from disk
    pub fn load(&self) -> Result<(), SplitError> {
        let file_data: IncomeData = read_json(&self.path)?;

        let mut sources = self
            .sources
            .write()
            .map_err(|e| SplitError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        sources.clear();
        for source in file_data.sources {
            sources.insert(source.id, source);
        }

        Ok(())
    }

    /// Save income sources to disk
    pub fn save(&self) -> Result<(), SplitError> {
        let sources = self
            .sources
            .read()
            .map_err(|e| SplitError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = sources.values().cloned().collect();
        list.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        write_json_atomic(&self.path, &IncomeData { sources: list })
    }

    /// Get an income source by ID
    pub fn get(&self, id: IncomeId) -> Result<Option<IncomeSource>, SplitError> {
        let sources = self
            .sources
            .read()
            .map_err(|e| SplitError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(sources.get(&id).cloned())
    }

    /// All income sources of one user, oldest first
    pub fn get_for_user(&self, user: &UserId) -> Result<Vec<IncomeSource>, SplitError> {
        let sources = self
            .sources
            .read()
            .map_err(|e| SplitError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = sources
            .values()
            .filter(|s| &s.user_id == user)
            .cloned()
            .collect();
        list.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(list)
    }

    /// All income sources
    pub fn get_all(&self) -> Result<Vec<IncomeSource>, SplitError> {
        let sources = self
            .sources
            .read()
            .map_err(|e| SplitError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = sources.values().cloned().collect();
        list.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(list)
    }

    /// Insert or update an income source
    pub fn upsert(&self, source: IncomeSource) -> Result<(), SplitError> {
        let mut sources = self
            .sources
            .write()
            .map_err(|e| SplitError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        sources.insert(source.id, source);
        Ok(())
    }

    /// Delete an income source
    pub fn delete(&self, id: IncomeId) -> Result<bool, SplitError> {
        let mut sources = self
            .sources
            .write()
            .map_err(|e| SplitError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(sources.remove(&id).is_some())
    }
}
