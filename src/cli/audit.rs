//! Audit log CLI command

use crate::error::SplitResult;
use crate::storage::Storage;

use super::Session;

/// Print the most recent audit entries
///
/// Only the signed-in user's own actions are shown unless `all` is set.
pub fn handle_audit_command(
    storage: &Storage,
    session: &Session,
    limit: usize,
    all: bool,
) -> SplitResult<()> {
    let actor = if all { None } else { Some(&session.actor) };
    let entries = storage.audit().read_recent(limit, actor)?;

    if entries.is_empty() {
        println!("No audit entries.");
        return Ok(());
    }

    for entry in entries {
        println!("{}", entry.format_human_readable());
    }

    Ok(())
}
