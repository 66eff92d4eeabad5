//! Per-user category percentages
//!
//! A saved percentage overrides the category's default for one user. The
//! full set for a user is always replaced at once when the structure editor
//! saves.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{CategoryId, UserId};

/// A user's saved percentage for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPercentage {
    pub user_id: UserId,
    pub category_id: CategoryId,
    pub percentage: f64,
    pub updated_at: DateTime<Utc>,
}

impl UserPercentage {
    pub fn new(user_id: UserId, category_id: CategoryId, percentage: f64) -> Self {
        Self {
            user_id,
            category_id,
            percentage,
            updated_at: Utc::now(),
        }
    }
}

/// One `{category_id, percentage}` pair handed to persistence on save
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentagePair {
    pub category_id: CategoryId,
    pub percentage: f64,
}
