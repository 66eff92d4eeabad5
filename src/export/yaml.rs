//! YAML export
//!
//! The same data as the JSON export, in a format that is easier to read.

use std::io::Write;

use crate::error::{SplitError, SplitResult};
use crate::export::json::FullExport;
use crate::storage::Storage;

/// Write the full export as YAML with a short header comment
pub fn export_full_yaml<W: Write>(storage: &Storage, writer: &mut W) -> SplitResult<()> {
    let export = FullExport::from_storage(storage)?;

    let header = format!(
        "# budget-split full export\n# Generated: {}\n# Schema: {}\n\n",
        export.exported_at, export.schema_version
    );
    writer
        .write_all(header.as_bytes())
        .map_err(|e| SplitError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export)?;
    Ok(())
}

/// Read back a YAML export
pub fn import_from_yaml(yaml: &str) -> SplitResult<FullExport> {
    let export: FullExport = serde_yaml::from_str(yaml)?;
    export.validate().map_err(SplitError::Export)?;
    Ok(export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::SplitPaths;
    use crate::storage::initialize_storage;
    use tempfile::TempDir;

    #[test]
    fn test_yaml_export_reads_back() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SplitPaths::with_base_dir(temp_dir.path().to_path_buf());
        initialize_storage(&paths).unwrap();
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();

        let mut out = Vec::new();
        export_full_yaml(&storage, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("# budget-split full export"));
        assert!(text.contains("Necesidades"));

        let export = import_from_yaml(&text).unwrap();
        assert_eq!(export.categories.len(), 3);
    }

    #[test]
    fn test_import_rejects_garbage() {
        assert!(import_from_yaml("schema_version: [").is_err());
    }
}
