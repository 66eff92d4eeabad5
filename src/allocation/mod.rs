//! Percentage allocation engine
//!
//! Everything that turns category percentages into a committable budget
//! structure lives here: the allocation value itself, proportional
//! redistribution when a slider moves, presets, amount projection and the
//! commit gate. The editor ties these together into one editing session.

pub mod editor;
pub mod gate;
pub mod model;
pub mod preset;
pub mod projection;
pub mod redistribute;

pub use editor::{AllocationEditor, AllocationStore};
pub use gate::{can_commit, ensure_committable};
pub use model::{Allocation, AllocationEntry, SUM_TOLERANCE, TARGET_TOTAL};
pub use preset::{apply_preset, Preset};
pub use projection::{compare, project, sum_by_category, CategoryComparison, ProjectedAmount};
pub use redistribute::{redistribute, PercentageChange};
