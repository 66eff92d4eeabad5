//! Category display formatting

use crate::models::Category;

/// Format categories in display order with their default percentages
pub fn format_category_list(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.\n\nRun 'split init' to create the default categories."
            .to_string();
    }

    let name_width = categories
        .iter()
        .map(|c| c.name.len())
        .max()
        .unwrap_or(8)
        .max(8);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<width$}  {:>7}  {:<12}  {}\n",
        "Category",
        "Default",
        "ID",
        "Description",
        width = name_width
    ));
    output.push_str(&format!(
        "{:-<width$}  {:->7}  {:-<12}  {:-<11}\n",
        "",
        "",
        "",
        "",
        width = name_width
    ));

    for category in categories {
        output.push_str(&format!(
            "{:<width$}  {:>6.2}%  {:<12}  {}\n",
            category.name,
            category.default_percentage,
            category.id.to_string(),
            category.description,
            width = name_width
        ));
    }

    output
}
