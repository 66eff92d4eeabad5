//! Configuration module for budget-split
//!
//! This module provides configuration management including:
//! - Path resolution for config and data files
//! - User settings persistence
//! - Resolution of the current user identity

pub mod identity;
pub mod paths;
pub mod settings;

pub use identity::resolve_current_user;
pub use paths::SplitPaths;
pub use settings::Settings;
