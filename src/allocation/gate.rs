//! Commit gate
//!
//! An allocation may only be saved when it totals 100% within tolerance. The
//! check runs before any persistence call is attempted.

use crate::error::{SplitError, SplitResult};

use super::model::Allocation;

/// Whether the allocation may be saved
pub fn can_commit(allocation: &Allocation) -> bool {
    allocation.is_valid()
}

/// Fail with [`SplitError::InvalidSum`] unless the allocation may be saved
pub fn ensure_committable(allocation: &Allocation) -> SplitResult<()> {
    if can_commit(allocation) {
        Ok(())
    } else {
        Err(SplitError::InvalidSum {
            total: allocation.total(),
        })
    }
}

/// Inline message for the presentation layer, `None` when committable
pub fn blocking_message(allocation: &Allocation) -> Option<String> {
    ensure_committable(allocation).err().map(|e| e.to_string())
}
