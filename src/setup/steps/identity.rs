//! Identity step
//!
//! Confirms the user id handed over by the identity provider, or asks for one.

use std::io::{BufRead, Write};

use crate::error::SplitResult;
use crate::models::UserId;
use crate::setup::prompt::Prompter;

pub struct IdentitySetupStep;

impl IdentitySetupStep {
    pub fn run<R: BufRead, W: Write>(
        prompter: &mut Prompter<R, W>,
        suggested: Option<&UserId>,
    ) -> SplitResult<UserId> {
        prompter.say("")?;
        prompter.say("Step 1: Who are you?")?;
        prompter.say("====================")?;

        if let Some(user) = suggested {
            if prompter.confirm(&format!("Set up the budget for '{}'?", user), true)? {
                return Ok(user.clone());
            }
        }

        loop {
            let answer = prompter.ask("User id: ")?;
            if !answer.is_empty() {
                return Ok(UserId::new(answer));
            }
            prompter.say("A user id is required.")?;
        }
    }
}
