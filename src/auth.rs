//! Roles, principals and role-set checks.
//!
//! Credentials are verified elsewhere (Discord identifies the caller). This module only
//! maps a caller to a [`Principal`] and decides whether that principal may run an operation.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::{collections::HashMap, fmt};

/// Role a staff member holds during the auction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Manages tournaments, teams and rosters
    Admin,
    /// Runs the auction: assigns and releases players
    Auctioneer,
    /// Read-only access
    Guest,
}

impl Role {
    /// Lowercase name used in config files and messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Auctioneer => "auctioneer",
            Self::Guest => "guest",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Roles allowed to change tournaments, teams and rosters.
pub const ADMIN_ONLY: &[Role] = &[Role::Admin];
/// Roles allowed to run the auction.
pub const AUCTION_STAFF: &[Role] = &[Role::Admin, Role::Auctioneer];
/// Every known role, for read-only views.
pub const ANY_ROLE: &[Role] = &[Role::Admin, Role::Auctioneer, Role::Guest];

/// A caller whose identity has already been resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Principal {
    /// Display username, recorded as `created_by` and in logs
    pub username: String,
    /// Role used for authorization
    pub role: Role,
}

impl Principal {
    /// Creates a principal from a username and role.
    pub fn new(username: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            role,
        }
    }
}

/// Fails with `Forbidden` unless the principal's role is in `allowed`.
pub fn require_role(principal: &Principal, allowed: &[Role]) -> Result<()> {
    if allowed.contains(&principal.role) {
        Ok(())
    } else {
        Err(Error::Forbidden {
            username: principal.username.clone(),
            role: principal.role.to_string(),
        })
    }
}

/// One configured staff member.
#[derive(Clone, Debug, Deserialize)]
pub struct StaffMember {
    /// Discord user id of the member
    pub discord_id: String,
    /// Username recorded for this member
    pub username: String,
    /// Role granted to the member
    pub role: Role,
}

/// Lookup from Discord user id to [`Principal`].
#[derive(Clone, Debug, Default)]
pub struct StaffDirectory {
    members: HashMap<String, Principal>,
    default_role: Option<Role>,
}

impl StaffDirectory {
    /// Builds a directory from configured members. Callers not listed get
    /// `default_role`, or are rejected when it is `None`.
    #[must_use]
    pub fn new(staff: &[StaffMember], default_role: Option<Role>) -> Self {
        let members = staff
            .iter()
            .map(|m| (m.discord_id.clone(), Principal::new(m.username.clone(), m.role)))
            .collect();
        Self {
            members,
            default_role,
        }
    }

    /// Resolves a caller. `display_name` is used for callers that fall back to the
    /// default role.
    #[must_use]
    pub fn resolve(&self, discord_id: &str, display_name: &str) -> Option<Principal> {
        self.members.get(discord_id).cloned().or_else(|| {
            self.default_role
                .map(|role| Principal::new(display_name, role))
        })
    }

    /// Resolves a caller and checks the role set in one step.
    pub fn authorize(
        &self,
        discord_id: &str,
        display_name: &str,
        allowed: &[Role],
    ) -> Result<Principal> {
        let principal = self
            .resolve(discord_id, display_name)
            .ok_or_else(|| Error::Forbidden {
                username: display_name.to_string(),
                role: "unknown".to_string(),
            })?;
        require_role(&principal, allowed)?;
        Ok(principal)
    }

    /// Number of configured members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// True when no members are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
