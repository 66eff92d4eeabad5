//! Current-user lookup
//!
//! Identity comes from outside the application. The id is taken from the
//! `--user` flag (or `BUDGET_SPLIT_USER`), falling back to the id saved by
//! `split login`.

use crate::error::{SplitError, SplitResult};
use crate::models::UserId;

use super::settings::Settings;

/// Resolve the user the current command acts for
pub fn resolve_current_user(flag: Option<&str>, settings: &Settings) -> SplitResult<UserId> {
    if let Some(raw) = flag {
        let raw = raw.trim();
        if !raw.is_empty() {
            return Ok(UserId::new(raw));
        }
    }

    settings.current_user.clone().ok_or_else(|| {
        SplitError::Config(
            "No user signed in. Run 'split login <user-id>' or pass --user.".into(),
        )
    })
}
