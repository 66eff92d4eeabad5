//! JSON export
//!
//! Dumps every record in storage with a schema version, for backup or for
//! other tools to read.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{SplitError, SplitResult};
use crate::models::{
    Category, Expense, FamilyMembership, IncomeSource, MonthlyBudget, PlannedItem, UserPercentage,
};
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full data export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    pub schema_version: String,
    pub exported_at: DateTime<Utc>,
    /// Version of budget-split that wrote the export
    pub app_version: String,
    pub categories: Vec<Category>,
    pub percentages: Vec<UserPercentage>,
    pub income_sources: Vec<IncomeSource>,
    pub budgets: Vec<MonthlyBudget>,
    pub planned_items: Vec<PlannedItem>,
    pub expenses: Vec<Expense>,
    pub family: Vec<FamilyMembership>,
}

impl FullExport {
    /// Collect everything currently in storage
    pub fn from_storage(storage: &Storage) -> SplitResult<Self> {
        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            categories: storage.categories.get_all()?,
            percentages: storage.percentages.get_all()?,
            income_sources: storage.income.get_all()?,
            budgets: storage.budgets.get_all()?,
            planned_items: storage.budgets.get_all_planned()?,
            expenses: storage.expenses.get_all()?,
            family: storage.family.get_all()?,
        })
    }

    /// Check that the export can be read by this version
    pub fn validate(&self) -> Result<(), String> {
        let major = self.schema_version.split('.').next().unwrap_or_default();
        let supported = EXPORT_SCHEMA_VERSION.split('.').next().unwrap_or_default();
        if major != supported {
            return Err(format!(
                "Unsupported export schema {} (expected {}.x)",
                self.schema_version, supported
            ));
        }
        Ok(())
    }
}

/// Write the full export as pretty-printed JSON
pub fn export_full_json<W: Write>(storage: &Storage, writer: &mut W) -> SplitResult<()> {
    let export = FullExport::from_storage(storage)?;
    serde_json::to_writer_pretty(&mut *writer, &export)
        .map_err(|e| SplitError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| SplitError::Export(e.to_string()))?;
    Ok(())
}

/// Read back a JSON export
pub fn import_from_json(json: &str) -> SplitResult<FullExport> {
    let export: FullExport = serde_json::from_str(json)?;
    export.validate().map_err(SplitError::Export)?;
    Ok(export)
}
