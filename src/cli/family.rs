//! Family sharing CLI commands
//!
//! Members are always managed by the signed-in user for their own data;
//! `--owner` does not apply here.

use clap::Subcommand;

use crate::display::format_member_list;
use crate::error::{SplitError, SplitResult};
use crate::models::{FamilyRole, UserId};
use crate::services::FamilyService;
use crate::storage::Storage;

use super::Session;

/// Family subcommands
#[derive(Subcommand)]
pub enum FamilyCommands {
    /// Give another user access to your data
    Add {
        /// Member's user id
        member: String,
        /// viewer or editor
        #[arg(short, long, default_value = "viewer")]
        role: String,
    },

    /// Revoke a member's access
    Remove { member: String },

    /// List your members and whose data you can see
    List,
}

/// Handle a family command
pub fn handle_family_command(
    storage: &Storage,
    session: &Session,
    cmd: FamilyCommands,
) -> SplitResult<()> {
    let service = FamilyService::new(storage);
    let me = &session.actor;

    match cmd {
        FamilyCommands::Add { member, role } => {
            let role = FamilyRole::parse(&role).ok_or_else(|| {
                SplitError::Validation(format!("Unknown role '{}'. Use viewer or editor.", role))
            })?;
            let membership = service.add_member(me, &UserId::new(member), role)?;
            println!(
                "{} can now {} your data as {}",
                membership.member_id,
                if role.can_edit() { "edit" } else { "view" },
                membership.role
            );
        }

        FamilyCommands::Remove { member } => {
            let removed = service.remove_member(me, &UserId::new(member))?;
            println!("Removed {} from your family", removed.member_id);
        }

        FamilyCommands::List => {
            println!("Your members:");
            println!("{}", format_member_list(&service.list_members(me)?));

            let shared = service.memberships_of(me)?;
            if !shared.is_empty() {
                println!();
                println!("Shared with you:");
                println!("{}", format_member_list(&shared));
            }
        }
    }

    Ok(())
}
