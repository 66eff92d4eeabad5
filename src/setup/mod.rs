//! First-run setup wizard
//!
//! Walks a new user through choosing who they are, recording one income
//! source and picking how their income is split between categories.

pub mod prompt;
pub mod steps;
pub mod wizard;

pub use prompt::Prompter;
pub use wizard::{SetupResult, SetupWizard};
