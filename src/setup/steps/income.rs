//! Income step
//!
//! Collects one income source. An empty amount skips the step.

use std::io::{BufRead, Write};

use crate::error::SplitResult;
use crate::models::{IncomeFrequency, Money};
use crate::setup::prompt::Prompter;

/// The income source the user described
pub struct IncomeSetupResult {
    pub name: String,
    pub amount: Money,
    pub frequency: IncomeFrequency,
}

pub struct IncomeSetupStep;

impl IncomeSetupStep {
    pub fn run<R: BufRead, W: Write>(
        prompter: &mut Prompter<R, W>,
    ) -> SplitResult<Option<IncomeSetupResult>> {
        prompter.say("")?;
        prompter.say("Step 2: Income")?;
        prompter.say("==============")?;
        prompter.say("Enter your main income. Leave the amount empty to skip.")?;

        let name = prompter.ask_or("Income name", "Salary")?;

        let amount = loop {
            let answer = prompter.ask("Amount (e.g. 2500.00): ")?;
            if answer.is_empty() {
                return Ok(None);
            }
            match Money::parse(&answer) {
                Ok(amount) if !amount.is_negative() => break amount,
                Ok(_) => prompter.say("The amount cannot be negative.")?,
                Err(e) => prompter.say(&e.to_string())?,
            }
        };

        let frequency = loop {
            let answer = prompter.ask_or("Frequency (weekly/biweekly/monthly/annual)", "monthly")?;
            match IncomeFrequency::parse(&answer) {
                Some(frequency) => break frequency,
                None => prompter.say(&format!("Unknown frequency '{}'.", answer))?,
            }
        };

        Ok(Some(IncomeSetupResult {
            name,
            amount,
            frequency,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_income() {
        let mut prompter = Prompter::new("\nabc\n10000\nsometimes\n\n".as_bytes(), Vec::new());
        let result = IncomeSetupStep::run(&mut prompter).unwrap().unwrap();

        assert_eq!(result.name, "Salary");
        assert_eq!(result.amount.cents(), 1_000_000);
        assert_eq!(result.frequency, IncomeFrequency::Monthly);

        let output = String::from_utf8_lossy(prompter.output()).to_string();
        assert!(output.contains("Unknown frequency 'sometimes'"));
    }

    #[test]
    fn test_empty_amount_skips() {
        let mut prompter = Prompter::new("Freelance\n\n".as_bytes(), Vec::new());
        assert!(IncomeSetupStep::run(&mut prompter).unwrap().is_none());
    }
}
