//! Family membership repository
//!
//! Records which users may view or edit another user's budget data.

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::SplitError;
use crate::models::{FamilyMembership, UserId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct FamilyData {
    #[serde(default)]
    memberships: Vec<FamilyMembership>,
}

/// Repository for family memberships
pub struct FamilyRepository {
    path: PathBuf,
    memberships: RwLock<Vec<FamilyMembership>>,
}

impl FamilyRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            memberships: RwLock::new(Vec::new()),
        }
    }

    pub fn load(&self) -> Result<(), SplitError> {
        let file_data: FamilyData = read_json(&self.path)?;

        let mut memberships = self
            .memberships
            .write()
            .map_err(|e| SplitError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *memberships = file_data.memberships;

        Ok(())
    }

    pub fn save(&self) -> Result<(), SplitError> {
        let file_data = FamilyData {
            memberships: self.get_all()?,
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// All memberships, ordered by owner then member
    pub fn get_all(&self) -> Result<Vec<FamilyMembership>, SplitError> {
        let memberships = self
            .memberships
            .read()
            .map_err(|e| SplitError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list = memberships.clone();
        list.sort_by(|a, b| (&a.owner_id, &a.member_id).cmp(&(&b.owner_id, &b.member_id)));
        Ok(list)
    }

    /// Members of one owner's family
    pub fn get_members(&self, owner: &UserId) -> Result<Vec<FamilyMembership>, SplitError> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|m| &m.owner_id == owner)
            .collect())
    }

    /// The grant `member` holds on `owner`'s data, if any
    pub fn get(
        &self,
        owner: &UserId,
        member: &UserId,
    ) -> Result<Option<FamilyMembership>, SplitError> {
        let memberships = self
            .memberships
            .read()
            .map_err(|e| SplitError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(memberships
            .iter()
            .find(|m| &m.owner_id == owner && &m.member_id == member)
            .cloned())
    }

    /// Insert or replace the grant for an owner/member pair
    pub fn upsert(&self, membership: FamilyMembership) -> Result<(), SplitError> {
        let mut memberships = self
            .memberships
            .write()
            .map_err(|e| SplitError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        memberships.retain(|m| {
            !(m.owner_id == membership.owner_id && m.member_id == membership.member_id)
        });
        memberships.push(membership);
        Ok(())
    }

    /// Remove a grant, returning it if it existed
    pub fn delete(
        &self,
        owner: &UserId,
        member: &UserId,
    ) -> Result<Option<FamilyMembership>, SplitError> {
        let mut memberships = self
            .memberships
            .write()
            .map_err(|e| SplitError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let position = memberships
            .iter()
            .position(|m| &m.owner_id == owner && &m.member_id == member);
        Ok(position.map(|i| memberships.remove(i)))
    }
}
