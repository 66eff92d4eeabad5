//! Export module for budget-split
//!
//! - CSV: the comparison report and expense lists
//! - JSON / YAML: every stored record, with a schema version

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::{export_comparison_csv, export_expenses_csv};
pub use json::{export_full_json, import_from_json, FullExport, EXPORT_SCHEMA_VERSION};
pub use yaml::{export_full_yaml, import_from_yaml};
