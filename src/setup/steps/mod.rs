//! Setup wizard steps

pub mod distribution;
pub mod identity;
pub mod income;

pub use distribution::DistributionSetupStep;
pub use identity::IdentitySetupStep;
pub use income::{IncomeSetupResult, IncomeSetupStep};
