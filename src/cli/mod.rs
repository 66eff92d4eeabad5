//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

use std::collections::HashMap;

use crate::error::{SplitError, SplitResult};
use crate::models::{Access, CategoryId, Money, Month, UserId};
use crate::services::FamilyService;
use crate::storage::Storage;

pub mod audit;
pub mod budget;
pub mod category;
pub mod expense;
pub mod export;
pub mod family;
pub mod income;
pub mod plan;
pub mod report;
pub mod structure;

pub use audit::handle_audit_command;
pub use budget::{handle_budget_command, BudgetCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use export::{handle_export_command, ExportCommands};
pub use family::{handle_family_command, FamilyCommands};
pub use income::{handle_income_command, IncomeCommands};
pub use plan::{handle_plan_command, PlanCommands};
pub use report::{handle_report_command, ReportCommands};
pub use structure::{handle_structure_command, StructureCommands};

/// Who is running a command and whose data it targets
#[derive(Debug, Clone)]
pub struct Session {
    pub actor: UserId,
    pub owner: UserId,
}

impl Session {
    /// `owner` defaults to the actor
    pub fn new(actor: UserId, owner: Option<UserId>) -> Self {
        let owner = owner.unwrap_or_else(|| actor.clone());
        Self { actor, owner }
    }

    /// Check the actor may perform `access` on the owner's data, returning the owner
    pub fn authorize(&self, storage: &Storage, access: Access) -> SplitResult<&UserId> {
        FamilyService::new(storage).check_access(&self.actor, &self.owner, access)?;
        Ok(&self.owner)
    }
}

/// Parse `YYYY-MM`, defaulting to the current month
pub fn parse_month(input: Option<&str>) -> SplitResult<Month> {
    match input {
        Some(raw) => Month::parse(raw).map_err(|e| SplitError::Validation(e.to_string())),
        None => Ok(Month::current()),
    }
}

/// Parse a money amount typed on the command line
pub fn parse_money(input: &str) -> SplitResult<Money> {
    Money::parse(input).map_err(|e| SplitError::Validation(format!("Invalid amount: {}", e)))
}

/// Category names keyed by id, for labelling rows
pub fn category_names(storage: &Storage) -> SplitResult<HashMap<CategoryId, String>> {
    Ok(storage
        .categories
        .get_all()?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SplitPaths;
    use crate::models::FamilyRole;
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

    #[test]
    fn test_session_defaults_to_self() {
        let (_temp_dir, storage) = create_test_storage();
        let session = Session::new(UserId::new("ana"), None);
        assert_eq!(session.authorize(&storage, Access::Write).unwrap().as_str(), "ana");
    }

    #[test]
    fn test_session_on_behalf_of_owner() {
        let (_temp_dir, storage) = create_test_storage();
        let ana = UserId::new("ana");
        let luis = UserId::new("luis");
        FamilyService::new(&storage)
            .add_member(&ana, &luis, FamilyRole::Viewer)
            .unwrap();

        let session = Session::new(luis, Some(ana));
        assert!(session.authorize(&storage, Access::Read).is_ok());
        assert!(matches!(
            session.authorize(&storage, Access::Write),
            Err(SplitError::AccessDenied { .. })
        ));
    }

    #[test]
    fn test_parse_helpers() {
        assert_eq!(parse_month(Some("2025-03")).unwrap(), Month::new(2025, 3).unwrap());
        assert!(parse_month(Some("March")).unwrap_err().is_validation());
        assert_eq!(parse_money("12.50").unwrap().cents(), 1250);
        assert!(parse_money("twelve").unwrap_err().is_validation());
    }
}
