//! Family membership display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::FamilyMembership;

#[derive(Tabled)]
struct MemberRow {
    #[tabled(rename = "Owner")]
    owner: String,
    #[tabled(rename = "Member")]
    member: String,
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "Since")]
    since: String,
}

/// Format family grants as a table
pub fn format_member_list(memberships: &[FamilyMembership]) -> String {
    if memberships.is_empty() {
        return "No family members.".to_string();
    }

    let rows: Vec<MemberRow> = memberships
        .iter()
        .map(|m| MemberRow {
            owner: m.owner_id.to_string(),
            member: m.member_id.to_string(),
            role: m.role.to_string(),
            since: m.created_at.format("%Y-%m-%d").to_string(),
        })
        .collect();

    Table::new(rows).with(Style::rounded()).to_string()
}
