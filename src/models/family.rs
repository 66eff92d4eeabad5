//! Family sharing model
//!
//! An owner can let other users see or edit their budgets. This is a plain
//! ownership/role check.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::UserId;

/// What a family member may do with the owner's data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FamilyRole {
    /// Read-only access
    Viewer,
    /// May record expenses and change budgets
    Editor,
}

impl FamilyRole {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "viewer" | "view" => Some(Self::Viewer),
            "editor" | "edit" => Some(Self::Editor),
            _ => None,
        }
    }

    pub fn can_edit(&self) -> bool {
        matches!(self, Self::Editor)
    }
}

impl fmt::Display for FamilyRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Viewer => write!(f, "viewer"),
            Self::Editor => write!(f, "editor"),
        }
    }
}

/// Access being requested on someone's data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
}

impl Access {
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Read => "view",
            Self::Write => "edit",
        }
    }
}

/// A grant from an owner to a member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyMembership {
    pub owner_id: UserId,
    pub member_id: UserId,
    pub role: FamilyRole,
    pub created_at: DateTime<Utc>,
}

impl FamilyMembership {
    pub fn new(owner_id: UserId, member_id: UserId, role: FamilyRole) -> Self {
        Self {
            owner_id,
            member_id,
            role,
            created_at: Utc::now(),
        }
    }

    /// Whether this grant allows the requested access
    pub fn allows(&self, access: Access) -> bool {
        match access {
            Access::Read => true,
            Access::Write => self.role.can_edit(),
        }
    }
}
