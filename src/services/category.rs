//! Category service
//!
//! Categories are seeded at first run; this service looks them up for the
//! rest of the application.

use crate::error::{SplitError, SplitResult};
use crate::models::{Category, CategoryId};
use crate::storage::Storage;

/// Service for category lookup
pub struct CategoryService<'a> {
    storage: &'a Storage,
}

impl<'a> CategoryService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// All categories in display order
    pub fn list(&self) -> SplitResult<Vec<Category>> {
        self.storage.categories.get_all()
    }

    pub fn get(&self, id: CategoryId) -> SplitResult<Option<Category>> {
        self.storage.categories.get(id)
    }

    /// Find a category by name (case-insensitive) or ID
    pub fn find(&self, identifier: &str) -> SplitResult<Option<Category>> {
        if let Some(category) = self.storage.categories.get_by_name(identifier.trim())? {
            return Ok(Some(category));
        }

        Ok(self
            .storage
            .categories
            .get_all()?
            .into_iter()
            .find(|c| c.id.matches(identifier)))
    }

    /// Like [`find`](Self::find), but a missing category is an error
    pub fn require(&self, identifier: &str) -> SplitResult<Category> {
        self.find(identifier)?
            .ok_or_else(|| SplitError::category_not_found(identifier))
    }
}
