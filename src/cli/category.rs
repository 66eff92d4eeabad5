//! Category CLI commands

use clap::Subcommand;

use crate::display::format_category_list;
use crate::error::SplitResult;
use crate::services::CategoryService;
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List categories in display order
    List,

    /// Show one category
    Show {
        /// Category name or ID
        category: String,
    },
}

/// Handle a category command
pub fn handle_category_command(storage: &Storage, cmd: CategoryCommands) -> SplitResult<()> {
    let service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::List => {
            print!("{}", format_category_list(&service.list()?));
        }

        CategoryCommands::Show { category } => {
            let category = service.require(&category)?;
            println!("Category: {}", category.name);
            println!("  ID:                 {}", category.id);
            println!("  Order:              {}", category.order);
            println!("  Default percentage: {:.2}%", category.default_percentage);
            if !category.description.is_empty() {
                println!("  Description:        {}", category.description);
            }
        }
    }

    Ok(())
}
