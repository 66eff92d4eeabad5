//! Distribution step
//!
//! Lets the user pick a preset or move individual sliders until the
//! allocation totals 100%.

use std::io::{BufRead, Write};

use crate::allocation::{AllocationEditor, Preset};
use crate::display::format_allocation;
use crate::error::SplitResult;
use crate::setup::prompt::Prompter;

pub struct DistributionSetupStep;

impl DistributionSetupStep {
    /// Edit `editor` until the user accepts a committable allocation
    pub fn run<R: BufRead, W: Write>(
        prompter: &mut Prompter<R, W>,
        editor: &mut AllocationEditor,
        monthly_income: Option<f64>,
    ) -> SplitResult<()> {
        let presets = Preset::builtin();

        prompter.say("")?;
        prompter.say("Step 3: Distribution")?;
        prompter.say("====================")?;
        prompter.say("How should your income be split?")?;
        for (index, preset) in presets.iter().enumerate() {
            prompter.say(&format!("  {}. {}", index + 1, preset.label()))?;
        }
        prompter.say("Or type <category>=<percentage> to move one slider.")?;

        loop {
            prompter.say("")?;
            prompter.say(&format_allocation(
                editor.categories(),
                editor.allocation(),
                monthly_income,
            ))?;

            let answer = prompter.ask("Preset, <category>=<percentage>, or Enter to accept: ")?;

            if answer.is_empty() {
                if editor.can_commit() {
                    return Ok(());
                }
                continue;
            }

            if let Ok(number) = answer.parse::<usize>() {
                if let Some(preset) = number.checked_sub(1).and_then(|i| presets.get(i)) {
                    editor.apply_preset(preset);
                    continue;
                }
            }

            if answer.contains('=') {
                match editor.parse_change(&answer) {
                    Ok(change) => {
                        editor.apply_change(change);
                    }
                    Err(e) => prompter.say(&e.to_string())?,
                }
                continue;
            }

            match Preset::parse(&answer) {
                Ok(preset) => {
                    editor.apply_preset(&preset);
                }
                Err(e) => prompter.say(&e.to_string())?,
            }
        }
    }
}
