//! Permission tokens granted through roles.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A capability granted to a role.
///
/// Stored and serialized as its snake_case token (`"approve_events"`).
/// Tokens this build does not know about are preserved as
/// [`Permission::Custom`] so administrator-defined roles survive a
/// round trip through the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Permission {
    /// Wildcard: grants every capability.
    All,
    /// Read events the principal organizes.
    ReadOwnEvents,
    /// Submit new events.
    CreateOwnEvents,
    /// Edit events the principal organizes.
    UpdateOwnEvents,
    /// Delete events the principal organizes.
    DeleteOwnEvents,
    /// Read every event regardless of approval state.
    ReadAllEvents,
    /// Approve or reject events.
    ApproveEvents,
    /// Delete any event.
    DeleteAnyEvent,
    /// Edit any event.
    UpdateAnyEvent,
    /// A token not known to this build.
    Custom(String),
}

impl Permission {
    /// Return the permission token.
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => "all",
            Self::ReadOwnEvents => "read_own_events",
            Self::CreateOwnEvents => "create_own_events",
            Self::UpdateOwnEvents => "update_own_events",
            Self::DeleteOwnEvents => "delete_own_events",
            Self::ReadAllEvents => "read_all_events",
            Self::ApproveEvents => "approve_events",
            Self::DeleteAnyEvent => "delete_any_event",
            Self::UpdateAnyEvent => "update_any_event",
            Self::Custom(token) => token,
        }
    }

    /// Every well-known permission, excluding the wildcard.
    pub fn known() -> [Permission; 8] {
        [
            Self::ReadOwnEvents,
            Self::CreateOwnEvents,
            Self::UpdateOwnEvents,
            Self::DeleteOwnEvents,
            Self::ReadAllEvents,
            Self::ApproveEvents,
            Self::DeleteAnyEvent,
            Self::UpdateAnyEvent,
        ]
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Permission {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "all" => Self::All,
            "read_own_events" => Self::ReadOwnEvents,
            "create_own_events" => Self::CreateOwnEvents,
            "update_own_events" => Self::UpdateOwnEvents,
            "delete_own_events" => Self::DeleteOwnEvents,
            "read_all_events" => Self::ReadAllEvents,
            "approve_events" => Self::ApproveEvents,
            "delete_any_event" => Self::DeleteAnyEvent,
            "update_any_event" => Self::UpdateAnyEvent,
            other => Self::Custom(other.to_string()),
        })
    }
}

impl From<String> for Permission {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(p) => p,
            Err(never) => match never {},
        }
    }
}

impl From<&str> for Permission {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<Permission> for String {
    fn from(p: Permission) -> Self {
        p.as_str().to_string()
    }
}
