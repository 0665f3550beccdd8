//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use eventhub_auth::Principal;
use eventhub_auth::jwt::IssuedToken;
use eventhub_core::types::{EventId, PageResponse, RoleId, UserId};
use eventhub_entity::event::{ApprovalStatus, EventListing};
use eventhub_entity::role::Role;
use eventhub_entity::user::User;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful.
    pub success: bool,
    /// Optional human-readable note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Response data.
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data,
        }
    }

    /// Creates a successful response with a message.
    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data,
        }
    }
}

/// Paginated response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    /// Items in this page.
    pub items: Vec<T>,
    /// Total matching items.
    pub total: u64,
    /// Page size used.
    pub limit: u32,
    /// Items skipped.
    pub offset: u32,
    /// Whether another page follows.
    pub has_next: bool,
}

impl<T> PaginatedResponse<T> {
    /// Convert every item of a store page.
    pub fn from_page<U>(page: PageResponse<U>) -> Self
    where
        T: From<U>,
    {
        let has_next = page.has_next();
        Self {
            items: page.items.into_iter().map(T::from).collect(),
            total: page.total,
            limit: page.limit,
            offset: page.offset,
            has_next,
        }
    }
}

/// User summary for responses. Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// User ID.
    pub id: UserId,
    /// Username.
    pub username: String,
    /// Email.
    pub email: String,
    /// Role ID.
    pub role_id: RoleId,
    /// Whether the account may sign in.
    pub is_active: bool,
    /// Created at.
    pub created_at: DateTime<Utc>,
    /// Updated at.
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role_id: user.role_id,
            is_active: user.is_active,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Signup and login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Bearer token.
    pub token: String,
    /// Token expiration.
    pub expires_at: DateTime<Utc>,
    /// The signed-in user.
    pub user: UserResponse,
    /// Role name.
    pub role: String,
}

impl AuthResponse {
    pub fn new(user: User, principal: &Principal, token: IssuedToken) -> Self {
        Self {
            token: token.token,
            expires_at: token.expires_at,
            user: user.into(),
            role: principal.role_name.clone(),
        }
    }
}

/// The current principal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeResponse {
    /// User info.
    pub user: UserResponse,
    /// Role name.
    pub role: String,
    /// Effective permission tokens.
    pub permissions: Vec<String>,
}

/// Event with its organizer's public details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventResponse {
    pub id: EventId,
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub address: String,
    pub organizer_id: UserId,
    pub organizer_name: String,
    pub organizer_email: String,
    pub status: ApprovalStatus,
    pub is_approved: bool,
    pub approved_by: Option<UserId>,
    pub approved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<EventListing> for EventResponse {
    fn from(listing: EventListing) -> Self {
        let event = listing.event;
        Self {
            is_approved: event.is_approved(),
            id: event.id,
            title: event.title,
            description: event.description,
            date: event.date,
            address: event.address,
            organizer_id: event.organizer_id,
            organizer_name: listing.organizer_name,
            organizer_email: listing.organizer_email,
            status: event.status,
            approved_by: event.approved_by,
            approved_at: event.approved_at,
            created_at: event.created_at,
            updated_at: event.updated_at,
        }
    }
}

/// Role with its permission tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleResponse {
    /// Role ID.
    pub id: RoleId,
    /// Role name.
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Permission tokens.
    pub permissions: Vec<String>,
}

impl From<Role> for RoleResponse {
    fn from(role: Role) -> Self {
        Self {
            permissions: role.permissions.to_tokens(),
            id: role.id,
            name: role.name,
            description: role.description,
        }
    }
}

/// Result of deleting a role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleDeletedResponse {
    /// Deleted role.
    pub id: RoleId,
    /// Users moved to the default role.
    pub reassigned_users: u64,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok` or `degraded`.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Store reachability.
    pub store: String,
}
