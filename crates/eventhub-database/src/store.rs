//! Store traits consumed by the service layer.
//!
//! Every implementation must enforce email/username uniqueness itself and
//! surface violations as [`ConflictKind::DuplicateEmail`] /
//! [`ConflictKind::DuplicateUsername`], so a race past a service-level
//! pre-check still ends in the same conflict.
//!
//! [`ConflictKind::DuplicateEmail`]: eventhub_core::ConflictKind::DuplicateEmail
//! [`ConflictKind::DuplicateUsername`]: eventhub_core::ConflictKind::DuplicateUsername

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use eventhub_core::result::AppResult;
use eventhub_core::types::{EventId, PageRequest, PageResponse, RoleId, UserId};
use eventhub_entity::event::{ApprovalStatus, EventChanges, EventListing, EventQuery, NewEvent};
use eventhub_entity::role::Role;
use eventhub_entity::user::{NewUser, ProfileChanges, User};

/// Result of a conditional approve/reject write.
#[derive(Debug, Clone)]
pub enum TransitionOutcome {
    /// The guard held and the approval fields were written.
    Applied(EventListing),
    /// The event exists but was already in a state the guard excludes.
    GuardFailed(ApprovalStatus),
    /// No event with that id.
    NotFound,
}

/// User account persistence.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Find a user by primary key.
    async fn find_user(&self, id: UserId) -> AppResult<Option<User>>;

    /// Find a user by email (case-insensitive).
    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Find a user by username (case-insensitive).
    async fn find_user_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// List users, oldest first.
    async fn list_users(&self, page: PageRequest) -> AppResult<PageResponse<User>>;

    /// Insert a new user.
    async fn insert_user(&self, user: NewUser) -> AppResult<User>;

    /// Apply profile changes. `None` when the user does not exist.
    async fn update_profile(&self, id: UserId, changes: ProfileChanges)
    -> AppResult<Option<User>>;

    /// Reassign a user's role. `None` when the user does not exist.
    async fn update_role(&self, id: UserId, role_id: RoleId) -> AppResult<Option<User>>;

    /// Atomically flip `is_active`. `None` when the user does not exist.
    async fn toggle_active(&self, id: UserId) -> AppResult<Option<User>>;

    /// Delete a user and, by cascade, the events they organize.
    async fn delete_user(&self, id: UserId) -> AppResult<bool>;
}

/// Role table persistence.
#[async_trait]
pub trait RoleStore: Send + Sync + 'static {
    /// Every role, ordered by id.
    async fn list_roles(&self) -> AppResult<Vec<Role>>;

    /// Find a role by id.
    async fn find_role(&self, id: RoleId) -> AppResult<Option<Role>>;

    /// Find a role by its unique name.
    async fn find_role_by_name(&self, name: &str) -> AppResult<Option<Role>>;

    /// Insert the role if its id is absent; existing rows are left untouched.
    async fn seed_role(&self, role: &Role) -> AppResult<()>;

    /// Reassign every holder of `id` to `fallback`, then delete `id`, as
    /// one unit. Returns the number of reassigned users, or `None` when the
    /// role does not exist.
    async fn delete_role(&self, id: RoleId, fallback: RoleId) -> AppResult<Option<u64>>;
}

/// Event persistence.
#[async_trait]
pub trait EventStore: Send + Sync + 'static {
    /// Find an event with its organizer, regardless of approval state.
    async fn find_event(&self, id: EventId) -> AppResult<Option<EventListing>>;

    /// Run a read query. Results are ordered by date ascending and already
    /// filtered by the query's visibility.
    async fn query_events(&self, query: &EventQuery) -> AppResult<PageResponse<EventListing>>;

    /// Insert a new event in the pending state.
    async fn insert_event(&self, event: NewEvent) -> AppResult<EventListing>;

    /// Replace the editable fields. Approval state is left as is.
    async fn update_event(
        &self,
        id: EventId,
        changes: EventChanges,
    ) -> AppResult<Option<EventListing>>;

    /// Delete an event.
    async fn delete_event(&self, id: EventId) -> AppResult<bool>;

    /// Set `Approved` with approver fields, unless already approved.
    async fn approve_event(
        &self,
        id: EventId,
        approver: UserId,
        at: DateTime<Utc>,
    ) -> AppResult<TransitionOutcome>;

    /// Set `Rejected` and clear approver fields, only if currently approved.
    async fn reject_event(&self, id: EventId) -> AppResult<TransitionOutcome>;
}
