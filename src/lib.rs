//! budget-split - percentage-based budgeting from the terminal
//!
//! This library splits a user's monthly income between spending categories
//! (by default 50% Necesidades, 30% Gustos, 20% Ahorro). Moving one category's
//! percentage rescales the others so the split always adds up to 100%, and a
//! split can only be saved when it does.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `allocation`: The percentage engine (redistribution, presets, projection)
//! - `config`: Configuration, path management and the current user
//! - `error`: Custom error types
//! - `models`: Core data models (categories, budgets, expenses, etc.)
//! - `storage`: JSON file storage layer
//! - `services`: Business logic layer
//! - `audit`: Audit logging system
//! - `reports`: Assigned vs. planned vs. actual comparison
//! - `export`: CSV, JSON and YAML export
//! - `display`: Terminal formatting
//! - `setup`: First-run wizard
//! - `cli`: Command handlers for the `split` binary
//!
//! # Example
//!
//! ```rust
//! use budget_split::allocation::{redistribute, Allocation};
//! use budget_split::models::DefaultCategory;
//!
//! let categories: Vec<_> = DefaultCategory::all()
//!     .iter()
//!     .enumerate()
//!     .map(|(order, default)| default.to_category(order as i32))
//!     .collect();
//!
//! let allocation = Allocation::initialize(&categories, &[]);
//! let moved = redistribute(&allocation, categories[0].id, 70.0);
//!
//! let gustos = moved.percentage(categories[1].id).unwrap();
//! assert!((gustos - 18.0).abs() < 1e-9);
//! assert!(moved.is_valid());
//! ```

pub mod allocation;
pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod setup;
pub mod storage;

pub use error::{SplitError, SplitResult};
