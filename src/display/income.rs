//! Income source display formatting

use crate::models::{IncomeSource, Money};

/// Format a user's income sources with their monthly equivalents
pub fn format_income_list(sources: &[IncomeSource]) -> String {
    if sources.is_empty() {
        return "No income sources found.\n\nAdd one with 'split income add <name> <amount>'."
            .to_string();
    }

    let name_width = sources
        .iter()
        .map(|s| s.name.len())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<width$}  {:>12}  {:<9}  {:>12}  {:<12}  {}\n",
        "Name",
        "Amount",
        "Frequency",
        "Monthly",
        "ID",
        "Status",
        width = name_width
    ));
    output.push_str(&format!(
        "{:-<width$}  {:->12}  {:-<9}  {:->12}  {:-<12}  {:-<8}\n",
        "",
        "",
        "",
        "",
        "",
        "",
        width = name_width
    ));

    for source in sources {
        output.push_str(&format!(
            "{:<width$}  {:>12}  {:<9}  {:>12}  {:<12}  {}\n",
            source.name,
            source.amount.to_string(),
            source.frequency.to_string(),
            source.monthly_amount().to_string(),
            source.id.to_string(),
            if source.active { "" } else { "Inactive" },
            width = name_width
        ));
    }

    let monthly: Money = sources
        .iter()
        .filter(|s| s.active)
        .map(|s| s.monthly_amount())
        .sum();
    output.push_str(&format!("\nMonthly income (active): {}\n", monthly));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{IncomeFrequency, UserId};

    #[test]
    fn test_format_income_list() {
        let salary = IncomeSource::new(
            UserId::new("ana"),
            "Salary",
            Money::from_cents(800_000),
            IncomeFrequency::Monthly,
        );
        let mut side = IncomeSource::new(
            UserId::new("ana"),
            "Side gig",
            Money::from_cents(120_000),
            IncomeFrequency::Annual,
        );
        side.set_active(false);

        let output = format_income_list(&[salary, side]);
        assert!(output.contains("Salary"));
        assert!(output.contains("$8000.00"));
        assert!(output.contains("Inactive"));
        assert!(output.contains("Monthly income (active): $8000.00"));
    }

    #[test]
    fn test_format_empty_income() {
        assert!(format_income_list(&[]).contains("No income sources"));
    }
}
