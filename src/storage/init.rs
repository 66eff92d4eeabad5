//! First-run storage setup
//!
//! Seeds the default Necesidades/Gustos/Ahorro categories when no category
//! file exists yet.

use crate::config::paths::SplitPaths;
use crate::error::SplitError;
use crate::models::DefaultCategory;

use super::categories::CategoryData;
use super::file_io::write_json_atomic;

/// Initialize storage for a fresh installation
pub fn initialize_storage(paths: &SplitPaths) -> Result<(), SplitError> {
    paths.ensure_directories()?;

    if needs_initialization(paths) {
        let categories = DefaultCategory::all()
            .iter()
            .enumerate()
            .map(|(order, default)| default.to_category(order as i32))
            .collect();
        write_json_atomic(paths.categories_file(), &CategoryData { categories })?;
    }

    Ok(())
}

/// Check if the category file still has to be seeded
pub fn needs_initialization(paths: &SplitPaths) -> bool {
    !paths.categories_file().exists()
}
