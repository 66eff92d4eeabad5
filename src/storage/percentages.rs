//! Per-user percentage repository
//!
//! Stores each user's saved allocation in percentages.json. A user's
//! percentages are only ever replaced as a whole, and a batch is checked
//! again here before it is accepted, so nothing that fails the 100% rule is
//! written even if a caller skipped the editor's gate.

use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;
use std::sync::RwLock;

use crate::allocation::model::is_within_tolerance;
use crate::error::SplitError;
use crate::models::{CategoryId, PercentagePair, UserId, UserPercentage};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct PercentageData {
    #[serde(default)]
    percentages: Vec<UserPercentage>,
}

/// Repository for saved user percentages
pub struct PercentageRepository {
    path: PathBuf,
    by_user: RwLock<BTreeMap<UserId, Vec<UserPercentage>>>,
}

impl PercentageRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            by_user: RwLock::new(BTreeMap::new()),
        }
    }

    /// Load percentages from disk
    pub fn load(&self) -> Result<(), SplitError> {
        let file_data: PercentageData = read_json(&self.path)?;

        let mut by_user = self
            .by_user
            .write()
            .map_err(|e| SplitError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        by_user.clear();
        for percentage in file_data.percentages {
            by_user
                .entry(percentage.user_id.clone())
                .or_default()
                .push(percentage);
        }

        Ok(())
    }

    /// Save percentages to disk
    pub fn save(&self) -> Result<(), SplitError> {
        let by_user = self
            .by_user
            .read()
            .map_err(|e| SplitError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let file_data = PercentageData {
            percentages: by_user.values().flatten().cloned().collect(),
        };

        write_json_atomic(&self.path, &file_data)
    }

    /// A user's saved percentages (empty when they never saved)
    pub fn get_for_user(&self, user: &UserId) -> Result<Vec<UserPercentage>, SplitError> {
        let by_user = self
            .by_user
            .read()
            .map_err(|e| SplitError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(by_user.get(user).cloned().unwrap_or_default())
    }

    /// All saved percentages, grouped by user
    pub fn get_all(&self) -> Result<Vec<UserPercentage>, SplitError> {
        let by_user = self
            .by_user
            .read()
            .map_err(|e| SplitError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(by_user.values().flatten().cloned().collect())
    }

    /// Replace every saved percentage of `user` with `pairs`
    ///
    /// Returns the previous set so a caller can restore it if persisting the
    /// batch fails. Nothing changes when the batch is rejected.
    pub fn replace_for_user(
        &self,
        user: &UserId,
        pairs: &[PercentagePair],
        known_categories: &HashSet<CategoryId>,
    ) -> Result<Vec<UserPercentage>, SplitError> {
        validate_batch(pairs, known_categories)?;

        let mut by_user = self
            .by_user
            .write()
            .map_err(|e| SplitError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let replacement = pairs
            .iter()
            .map(|p| UserPercentage::new(user.clone(), p.category_id, p.percentage))
            .collect();

        Ok(by_user.insert(user.clone(), replacement).unwrap_or_default())
    }

    /// Put back a previous set (used to undo a batch that failed to persist)
    pub fn restore_for_user(
        &self,
        user: &UserId,
        previous: Vec<UserPercentage>,
    ) -> Result<(), SplitError> {
        let mut by_user = self
            .by_user
            .write()
            .map_err(|e| SplitError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        if previous.is_empty() {
            by_user.remove(user);
        } else {
            by_user.insert(user.clone(), previous);
        }
        Ok(())
    }

    /// Forget a user's overrides so category defaults apply again
    pub fn clear_for_user(&self, user: &UserId) -> Result<Vec<UserPercentage>, SplitError> {
        let mut by_user = self
            .by_user
            .write()
            .map_err(|e| SplitError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(by_user.remove(user).unwrap_or_default())
    }
}

/// Server-side check of a percentage batch
///
/// The batch must name every known category exactly once, each value must lie
/// in [0, 100] and the values must total 100 within tolerance.
pub fn validate_batch(
    pairs: &[PercentagePair],
    known_categories: &HashSet<CategoryId>,
) -> Result<(), SplitError> {
    let mut seen = HashSet::new();

    for pair in pairs {
        if !known_categories.contains(&pair.category_id) {
            return Err(SplitError::PersistenceRejected(format!(
                "unknown category {}",
                pair.category_id
            )));
        }
        if !seen.insert(pair.category_id) {
            return Err(SplitError::PersistenceRejected(format!(
                "category {} appears more than once",
                pair.category_id
            )));
        }
        if !(0.0..=100.0).contains(&pair.percentage) {
            return Err(SplitError::PersistenceRejected(format!(
                "percentage {} for {} is outside 0-100",
                pair.percentage, pair.category_id
            )));
        }
    }

    if let Some(missing) = known_categories.iter().find(|id| !seen.contains(*id)) {
        return Err(SplitError::PersistenceRejected(format!(
            "no percentage given for category {}",
            missing
        )));
    }

    let total: f64 = pairs.iter().map(|p| p.percentage).sum();
    if !is_within_tolerance(total) {
        return Err(SplitError::PersistenceRejected(format!(
            "percentages total {:.2}, expected 100",
            total
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, PercentageRepository, Vec<CategoryId>, HashSet<CategoryId>) {
        let temp_dir = TempDir::new().unwrap();
        let repo = PercentageRepository::new(temp_dir.path().join("percentages.json"));
        repo.load().unwrap();
        let ids: Vec<CategoryId> = (0..3).map(|_| CategoryId::new()).collect();
        let known = ids.iter().copied().collect();
        (temp_dir, repo, ids, known)
    }

    fn pairs(ids: &[CategoryId], values: &[f64]) -> Vec<PercentagePair> {
        ids.iter()
            .zip(values)
            .map(|(id, pct)| PercentagePair {
                category_id: *id,
                percentage: *pct,
            })
            .collect()
    }

    #[test]
    fn test_replace_and_reload() {
        let (temp_dir, repo, ids, known) = setup();
        let ana = UserId::new("ana");

        let previous = repo
            .replace_for_user(&ana, &pairs(&ids, &[60.0, 20.0, 20.0]), &known)
            .unwrap();
        assert!(previous.is_empty());
        repo.save().unwrap();

        let reloaded = PercentageRepository::new(temp_dir.path().join("percentages.json"));
        reloaded.load().unwrap();
        let saved = reloaded.get_for_user(&ana).unwrap();
        assert_eq!(saved.len(), 3);
        assert_eq!(saved[0].percentage, 60.0);
        assert!(reloaded.get_for_user(&UserId::new("luis")).unwrap().is_empty());
    }

    #[test]
    fn test_bad_total_is_rejected_without_writing() {
        let (_temp_dir, repo, ids, known) = setup();
        let ana = UserId::new("ana");
        repo.replace_for_user(&ana, &pairs(&ids, &[50.0, 30.0, 20.0]), &known)
            .unwrap();

        let err = repo
            .replace_for_user(&ana, &pairs(&ids, &[50.0, 30.0, 19.0]), &known)
            .unwrap_err();

        assert!(matches!(err, SplitError::PersistenceRejected(_)));
        let kept: Vec<f64> = repo
            .get_for_user(&ana)
            .unwrap()
            .iter()
            .map(|p| p.percentage)
            .collect();
        assert_eq!(kept, vec![50.0, 30.0, 20.0]);
    }

    #[test]
    fn test_validate_batch_rules() {
        let (_temp_dir, _repo, ids, known) = setup();

        assert!(validate_batch(&pairs(&ids, &[50.0, 30.0, 20.0]), &known).is_ok());
        assert!(validate_batch(&pairs(&ids, &[50.0, 30.0, 20.009]), &known).is_ok());

        let unknown = vec![PercentagePair {
            category_id: CategoryId::new(),
            percentage: 100.0,
        }];
        assert!(validate_batch(&unknown, &known).is_err());

        let duplicate = pairs(&[ids[0], ids[0]], &[50.0, 50.0]);
        assert!(validate_batch(&duplicate, &known).is_err());

        let out_of_range = pairs(&ids, &[120.0, -10.0, -10.0]);
        assert!(validate_batch(&out_of_range, &known).is_err());
    }

    #[test]
    fn test_partial_batch_is_rejected() {
        let (_temp_dir, repo, ids, known) = setup();
        let ana = UserId::new("ana");

        // Sums to 100 but leaves two categories to their defaults
        let partial = pairs(&ids[..1], &[100.0]);
        let err = validate_batch(&partial, &known).unwrap_err();
        assert!(matches!(err, SplitError::PersistenceRejected(_)));

        assert!(repo.replace_for_user(&ana, &partial, &known).is_err());
        assert!(repo.get_for_user(&ana).unwrap().is_empty());
    }

    #[test]
    fn test_restore_and_clear() {
        let (_temp_dir, repo, ids, known) = setup();
        let ana = UserId::new("ana");

        repo.replace_for_user(&ana, &pairs(&ids, &[50.0, 30.0, 20.0]), &known)
            .unwrap();
        let previous = repo
            .replace_for_user(&ana, &pairs(&ids, &[70.0, 20.0, 10.0]), &known)
            .unwrap();
        repo.restore_for_user(&ana, previous).unwrap();
        assert_eq!(repo.get_for_user(&ana).unwrap()[0].percentage, 50.0);

        let cleared = repo.clear_for_user(&ana).unwrap();
        assert_eq!(cleared.len(), 3);
        assert!(repo.get_for_user(&ana).unwrap().is_empty());
    }
}
