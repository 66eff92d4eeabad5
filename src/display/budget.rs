//! Monthly budget display formatting

use std::collections::HashMap;

use crate::models::{CategoryId, Money, MonthlyBudget, PlannedItem};

/// Format one month's budget with its deductions
pub fn format_budget_details(budget: &MonthlyBudget) -> String {
    let mut output = String::new();

    output.push_str(&format!("Budget: {} ({})\n", budget.month, budget.user_id));
    output.push_str(&format!("  ID:           {}\n", budget.id));
    output.push_str(&format!("  Gross income: {}\n", budget.gross_income));

    if budget.deductions.is_empty() {
        output.push_str("  Deductions:   none\n");
    } else {
        output.push_str("  Deductions:\n");
        for deduction in &budget.deductions {
            output.push_str(&format!(
                "    {:<24} {:>12}  {}\n",
                deduction.name,
                format!("-{}", deduction.amount),
                deduction.id
            ));
        }
    }

    output.push_str(&format!("  Available:    {}\n", budget.available_income()));

    if !budget.notes.is_empty() {
        output.push_str(&format!("  Notes:        {}\n", budget.notes));
    }

    output
}

/// Format a user's budgets, newest month first
pub fn format_budget_list(budgets: &[MonthlyBudget]) -> String {
    if budgets.is_empty() {
        return "No budgets found.\n\nCreate one with 'split budget create <YYYY-MM>'.".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<8}  {:>12}  {:>12}  {:>12}\n",
        "Month", "Gross", "Deductions", "Available"
    ));
    output.push_str(&format!("{:-<8}  {:->12}  {:->12}  {:->12}\n", "", "", "", ""));

    for budget in budgets {
        output.push_str(&format!(
            "{:<8}  {:>12}  {:>12}  {:>12}\n",
            budget.month.to_string(),
            budget.gross_income.to_string(),
            budget.total_deductions().to_string(),
            budget.available_income().to_string()
        ));
    }

    output
}

/// Format planned items, labelling each with its category name
pub fn format_planned_list(items: &[PlannedItem], names: &HashMap<CategoryId, String>) -> String {
    if items.is_empty() {
        return "No planned items.".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12}  {:<16}  {:<28}  {:>12}\n",
        "ID", "Category", "Description", "Amount"
    ));
    output.push_str(&format!("{:-<12}  {:-<16}  {:-<28}  {:->12}\n", "", "", "", ""));

    for item in items {
        let category = names
            .get(&item.category_id)
            .map(String::as_str)
            .unwrap_or("Unknown");
        output.push_str(&format!(
            "{:<12}  {:<16}  {:<28}  {:>12}\n",
            item.id.to_string(),
            category,
            item.description,
            item.amount.to_string()
        ));
    }

    let total: Money = items.iter().map(|i| i.amount).sum();
    output.push_str(&format!("{:>74}\n", format!("Total: {}", total)));

    output
}
