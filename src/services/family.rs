//! Family sharing service
//!
//! Owners grant other users viewer or editor access to their data. Commands
//! acting on someone else's data go through [`FamilyService::check_access`].

use crate::audit::EntityType;
use crate::error::{SplitError, SplitResult};
use crate::models::{Access, FamilyMembership, FamilyRole, UserId};
use crate::storage::Storage;

pub struct FamilyService<'a> {
    storage: &'a Storage,
}

impl<'a> FamilyService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Grant `member` a role on `owner`'s data, replacing any earlier grant
    pub fn add_member(
        &self,
        owner: &UserId,
        member: &UserId,
        role: FamilyRole,
    ) -> SplitResult<FamilyMembership> {
        if owner == member {
            return Err(SplitError::Validation(
                "You cannot add yourself to your own family".into(),
            ));
        }

        let previous = self.storage.family.get(owner, member)?;
        let membership = FamilyMembership::new(owner.clone(), member.clone(), role);

        self.storage.family.upsert(membership.clone())?;
        self.storage.family.save()?;

        match previous {
            Some(before) => self.storage.log_update(
                EntityType::FamilyMember,
                member.to_string(),
                Some(format!("member of {}", owner)),
                &before,
                &membership,
                Some(format!("role: {} -> {}", before.role, membership.role)),
            )?,
            None => self.storage.log_create(
                EntityType::FamilyMember,
                member.to_string(),
                Some(format!("member of {}", owner)),
                &membership,
            )?,
        }

        Ok(membership)
    }

    /// Revoke a member's access
    pub fn remove_member(&self, owner: &UserId, member: &UserId) -> SplitResult<FamilyMembership> {
        let removed = self.storage.family.delete(owner, member)?.ok_or_else(|| {
            SplitError::NotFound {
                entity_type: "Family member",
                identifier: member.to_string(),
            }
        })?;
        self.storage.family.save()?;

        self.storage.log_delete(
            EntityType::FamilyMember,
            member.to_string(),
            Some(format!("member of {}", owner)),
            &removed,
        )?;

        Ok(removed)
    }

    pub fn list_members(&self, owner: &UserId) -> SplitResult<Vec<FamilyMembership>> {
        self.storage.family.get_members(owner)
    }

    /// Families `member` belongs to
    pub fn memberships_of(&self, member: &UserId) -> SplitResult<Vec<FamilyMembership>> {
        Ok(self
            .storage
            .family
            .get_all()?
            .into_iter()
            .filter(|m| &m.member_id == member)
            .collect())
    }

    /// Whether `actor` may read or write `owner`'s data
    ///
    /// Owners may always act on their own data.
    pub fn check_access(&self, actor: &UserId, owner: &UserId, access: Access) -> SplitResult<()> {
        if actor == owner {
            return Ok(());
        }

        let allowed = self
            .storage
            .family
            .get(owner, actor)?
            .map(|m| m.allows(access))
            .unwrap_or(false);

        if allowed {
            Ok(())
        } else {
            Err(SplitError::AccessDenied {
                user: actor.to_string(),
                owner: owner.to_string(),
                action: access.verb(),
            })
        }
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
    fn test_access_by_role() {
        let (_temp_dir, storage) = create_test_storage();
        let service = FamilyService::new(&storage);
        let ana = UserId::new("ana");
        let luis = UserId::new("luis");
        let eva = UserId::new("eva");

        service.add_member(&ana, &luis, FamilyRole::Viewer).unwrap();
        service.add_member(&ana, &eva, FamilyRole::Editor).unwrap();

        assert!(service.check_access(&ana, &ana, Access::Write).is_ok());
        assert!(service.check_access(&luis, &ana, Access::Read).is_ok());
        assert!(matches!(
            service.check_access(&luis, &ana, Access::Write),
            Err(SplitError::AccessDenied { action: "edit", .. })
        ));
        assert!(service.check_access(&eva, &ana, Access::Write).is_ok());
        assert!(service.check_access(&ana, &luis, Access::Read).is_err());
    }

    #[test]
    fn test_role_change_and_removal_are_audited() {
        let (_temp_dir, storage) = create_test_storage();
        let service = FamilyService::new(&storage);
        let ana = UserId::new("ana");
        let luis = UserId::new("luis");

        service.add_member(&ana, &luis, FamilyRole::Viewer).unwrap();
        service.add_member(&ana, &luis, FamilyRole::Editor).unwrap();
        assert_eq!(service.list_members(&ana).unwrap().len(), 1);
        assert_eq!(service.memberships_of(&luis).unwrap().len(), 1);

        service.remove_member(&ana, &luis).unwrap();
        assert!(service.remove_member(&ana, &luis).unwrap_err().is_not_found());

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(
            entries[1].diff_summary.as_deref(),
            Some("role: viewer -> editor")
        );
    }

    #[test]
    fn test_cannot_add_self() {
        let (_temp_dir, storage) = create_test_storage();
        let ana = UserId::new("ana");
        let err = FamilyService::new(&storage)
            .add_member(&ana, &ana, FamilyRole::Editor)
            .unwrap_err();
        assert!(err.is_validation());
    }
}
