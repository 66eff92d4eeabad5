//! Setup wizard orchestration
//!
//! Coordinates the setup steps and only writes anything once the user has
//! confirmed the summary.

use std::io::{BufRead, Write};

use crate::allocation::Allocation;
use crate::config::{paths::SplitPaths, settings::Settings};
use crate::error::SplitResult;
use crate::models::{IncomeSource, UserId};
use crate::services::{AllocationService, IncomeService};
use crate::storage::{init::initialize_storage, Storage};

use super::prompt::Prompter;
use super::steps::{DistributionSetupStep, IdentitySetupStep, IncomeSetupStep};

/// Result of running the setup wizard
pub struct SetupResult {
    /// Whether setup was completed successfully
    pub completed: bool,
    pub user_id: Option<UserId>,
    /// The income source that was recorded, if any
    pub income: Option<IncomeSource>,
    /// The allocation that was saved
    pub allocation: Option<Allocation>,
}

impl SetupResult {
    fn cancelled() -> Self {
        Self {
            completed: false,
            user_id: None,
            income: None,
            allocation: None,
        }
    }
}

/// The setup wizard
pub struct SetupWizard {
    paths: SplitPaths,
}

impl SetupWizard {
    pub fn new(paths: SplitPaths) -> Self {
        Self { paths }
    }

    /// Check if setup is needed (first run)
    pub fn needs_setup(&self, settings: &Settings) -> bool {
        !settings.setup_completed
    }

    /// Run the interactive setup wizard
    pub fn run<R: BufRead, W: Write>(
        &self,
        storage: &mut Storage,
        settings: &mut Settings,
        prompter: &mut Prompter<R, W>,
        suggested_user: Option<&UserId>,
    ) -> SplitResult<SetupResult> {
        prompter.say("")?;
        prompter.say("===========================================")?;
        prompter.say("  Welcome to budget-split setup!")?;
        prompter.say("===========================================")?;
        prompter.say("")?;
        prompter.say("This wizard splits your income between Necesidades, Gustos and Ahorro.")?;

        if !prompter.confirm("Ready to begin?", true)? {
            prompter.say("Setup cancelled.")?;
            return Ok(SetupResult::cancelled());
        }

        let user = IdentitySetupStep::run(prompter, suggested_user)?;
        storage.set_actor(user.clone());

        let income = IncomeSetupStep::run(prompter)?;

        let existing_monthly = IncomeService::new(storage).total_monthly(&user)?;
        let monthly = match &income {
            Some(income) => income.frequency.monthly_equivalent(income.amount),
            None => existing_monthly,
        };
        let projected_income = if monthly.is_positive() {
            Some(monthly.as_major_units())
        } else {
            None
        };

        let allocations = AllocationService::new(storage);
        let mut editor = allocations.open_editor(&user)?;
        DistributionSetupStep::run(prompter, &mut editor, projected_income)?;

        prompter.say("")?;
        prompter.say("===========================================")?;
        prompter.say("  Setup Summary")?;
        prompter.say("===========================================")?;
        prompter.say(&format!("User: {}", user))?;
        match &income {
            Some(income) => prompter.say(&format!(
                "Income: {} {} ({})",
                income.name, income.amount, income.frequency
            ))?,
            None => prompter.say("Income: unchanged")?,
        }
        let split = editor
            .categories()
            .iter()
            .zip(editor.allocation().percentages())
            .map(|(category, pct)| format!("{} {:.2}%", category.name, pct))
            .collect::<Vec<_>>()
            .join(", ");
        prompter.say(&format!("Split: {}", split))?;
        prompter.say("")?;

        if !prompter.confirm("Apply these settings?", true)? {
            prompter.say("Setup cancelled.")?;
            return Ok(SetupResult::cancelled());
        }

        let saved_income = match income {
            Some(income) => {
                let service = IncomeService::new(storage);
                Some(match service.find(&user, &income.name)? {
                    Some(existing) => service.update(
                        &user,
                        &existing.id.to_string(),
                        None,
                        Some(income.amount),
                        Some(income.frequency),
                    )?,
                    None => service.add(&user, &income.name, income.amount, income.frequency)?,
                })
            }
            None => None,
        };

        let outcome = allocations.commit(&mut editor)?;
        if let Some(err) = outcome.audit_error {
            prompter.say(&format!(
                "Warning: the new split was not written to the audit log: {}",
                err
            ))?;
        }

        settings.current_user = Some(user.clone());
        settings.setup_completed = true;
        settings.save(&self.paths)?;

        prompter.say("")?;
        prompter.say("Setup complete!")?;
        prompter.say("  - Run 'split budget create' to start this month's budget")?;
        prompter.say("  - Run 'split structure edit' to change the split later")?;

        Ok(SetupResult {
            completed: true,
            user_id: Some(user),
            income: saved_income,
            allocation: Some(editor.allocation().clone()),
        })
    }

    /// Non-interactive setup: seed categories and mark setup done
    pub fn run_minimal(&self, settings: &mut Settings) -> SplitResult<SetupResult> {
        initialize_storage(&self.paths)?;

        settings.setup_completed = true;
        settings.save(&self.paths)?;

        Ok(SetupResult {
            completed: true,
            user_id: settings.current_user.clone(),
            income: None,
            allocation: None,
        })
    }
}
