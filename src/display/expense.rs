//! Expense display formatting

use std::collections::HashMap;

use crate::models::{CategoryId, Expense, Money};

/// Format expenses as a table, oldest first
pub fn format_expense_list(expenses: &[Expense], names: &HashMap<CategoryId, String>) -> String {
    if expenses.is_empty() {
        return "No expenses found.".to_string();
    }

    let desc_width = expenses
        .iter()
        .map(|e| e.description.len())
        .max()
        .unwrap_or(11)
        .clamp(11, 40);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<10}  {:<12}  {:<16}  {:<width$}  {:>12}\n",
        "Date",
        "ID",
        "Category",
        "Description",
        "Amount",
        width = desc_width
    ));
    output.push_str(&format!(
        "{:-<10}  {:-<12}  {:-<16}  {:-<width$}  {:->12}\n",
        "",
        "",
        "",
        "",
        "",
        width = desc_width
    ));

    for expense in expenses {
        let category = names
            .get(&expense.category_id)
            .map(String::as_str)
            .unwrap_or("Unknown");
        let description: String = expense.description.chars().take(desc_width).collect();
        output.push_str(&format!(
            "{:<10}  {:<12}  {:<16}  {:<width$}  {:>12}\n",
            expense.date.to_string(),
            expense.id.to_string(),
            category,
            description,
            expense.amount.to_string(),
            width = desc_width
        ));
    }

    let total: Money = expenses.iter().map(|e| e.amount).sum();
    output.push_str(&format!("\n{} expense(s), total {}\n", expenses.len(), total));

    output
}
