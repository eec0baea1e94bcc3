//! Marketplace roles and the authenticated principal.

use serde::{Deserialize, Serialize};
use std::fmt;

use roomify_shared::types::UserId;

/// Marketplace role of a user.
///
/// Unlike organization roles these are not a hierarchy: a host is not a
/// "bigger" guest, and only `Admin` overrides ownership checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Browses properties and books stays.
    Guest,
    /// Lists properties and manages bookings on them.
    Host,
    /// Platform administrator.
    Admin,
}

impl Role {
    /// Parse a role from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "guest" => Some(Self::Guest),
            "host" => Some(Self::Host),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    /// Returns the string representation of the role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Guest => "guest",
            Self::Host => "host",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The authenticated caller of an operation.
///
/// Passed explicitly into every ledger and review call; nothing reads the
/// current user from ambient state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    /// The caller's user id.
    pub id: UserId,
    /// The caller's role.
    pub role: Role,
}

impl Principal {
    /// Creates a principal.
    #[must_use]
    pub const fn new(id: UserId, role: Role) -> Self {
        Self { id, role }
    }

    /// Shorthand for a guest principal.
    #[must_use]
    pub const fn guest(id: UserId) -> Self {
        Self::new(id, Role::Guest)
    }

    /// Shorthand for a host principal.
    #[must_use]
    pub const fn host(id: UserId) -> Self {
        Self::new(id, Role::Host)
    }

    /// Shorthand for an admin principal.
    #[must_use]
    pub const fn admin(id: UserId) -> Self {
        Self::new(id, Role::Admin)
    }
}
