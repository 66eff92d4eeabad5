//! Allocation display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::allocation::{gate, project, Allocation, Preset};
use crate::models::{Category, CategoryId, Money};

/// Format an unrounded major-unit amount as currency
pub fn format_amount(amount: f64) -> String {
    Money::from_major_units(amount).to_string()
}

/// Format an allocation, with projected amounts when an income is given
///
/// The last line says whether the allocation can be saved.
pub fn format_allocation(
    categories: &[Category],
    allocation: &Allocation,
    available_income: Option<f64>,
) -> String {
    if allocation.is_empty() {
        return "No categories found.\n\nRun 'split init' to create the default categories."
            .to_string();
    }

    let name_of = |entry_id: CategoryId| {
        categories
            .iter()
            .find(|c| c.id == entry_id)
            .map(|c| c.name.as_str())
            .unwrap_or("Unknown")
    };

    let name_width = categories
        .iter()
        .map(|c| c.name.len())
        .max()
        .unwrap_or(8)
        .max(8);
    let line_width = name_width + if available_income.is_some() { 28 } else { 14 };

    let mut output = String::new();
    match available_income {
        Some(_) => output.push_str(&format!(
            "{:<width$}  {:>10}  {:>14}\n",
            "Category",
            "Percentage",
            "Amount",
            width = name_width
        )),
        None => output.push_str(&format!(
            "{:<width$}  {:>10}\n",
            "Category",
            "Percentage",
            width = name_width
        )),
    }
    output.push_str(&"-".repeat(line_width));
    output.push('\n');

    let projected = project(allocation, available_income.unwrap_or(0.0));
    for amount in &projected {
        let percentage = format!("{:.2}%", amount.percentage);
        match available_income {
            Some(_) => output.push_str(&format!(
                "{:<width$}  {:>10}  {:>14}\n",
                name_of(amount.category_id),
                percentage,
                format_amount(amount.amount),
                width = name_width
            )),
            None => output.push_str(&format!(
                "{:<width$}  {:>10}\n",
                name_of(amount.category_id),
                percentage,
                width = name_width
            )),
        }
    }

    output.push_str(&"-".repeat(line_width));
    output.push('\n');

    let total = format!("{:.2}%", allocation.total());
    match available_income {
        Some(_) => output.push_str(&format!(
            "{:<width$}  {:>10}  {:>14}\n",
            "Total",
            total,
            format_amount(projected.iter().map(|p| p.amount).sum::<f64>()),
            width = name_width
        )),
        None => output.push_str(&format!(
            "{:<width$}  {:>10}\n",
            "Total",
            total,
            width = name_width
        )),
    }

    output.push('\n');
    match gate::blocking_message(allocation) {
        Some(message) => output.push_str(&format!("Cannot save: {}\n", message)),
        None => output.push_str("Ready to save.\n"),
    }

    output
}

#[derive(Tabled)]
struct PresetRow {
    #[tabled(rename = "Preset")]
    name: String,
    #[tabled(rename = "Split")]
    label: String,
    #[tabled(rename = "Default")]
    default: String,
}

/// Format the preset catalogue, marking the user's preferred preset
pub fn format_preset_list(presets: &[Preset], preferred: &str) -> String {
    let preferred = Preset::find(preferred);
    let rows: Vec<PresetRow> = presets
        .iter()
        .map(|preset| PresetRow {
            name: preset.name().to_string(),
            label: preset.label(),
            default: if preferred.as_ref() == Some(preset) {
                "*".to_string()
            } else {
                String::new()
            },
        })
        .collect();

    Table::new(rows).with(Style::rounded()).to_string()
}
