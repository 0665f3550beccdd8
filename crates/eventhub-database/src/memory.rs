//! Process-local store.
//!
//! All three tables live behind one `RwLock`, so every write observes and
//! mutates a consistent snapshot. Uniqueness and the approve/reject guards
//! are enforced under the write lock exactly as the PostgreSQL indexes and
//! conditional updates enforce them.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use eventhub_core::error::{AppError, ConflictKind};
use eventhub_core::result::AppResult;
use eventhub_core::types::{EventId, PageRequest, PageResponse, RoleId, UserId};
use eventhub_entity::event::{
    ApprovalStatus, Event, EventChanges, EventListing, EventQuery, NewEvent, Transition,
};
use eventhub_entity::role::Role;
use eventhub_entity::user::{NewUser, ProfileChanges, User};

use crate::store::{EventStore, RoleStore, TransitionOutcome, UserStore};

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<UserId, User>,
    roles: BTreeMap<RoleId, Role>,
    events: HashMap<EventId, Event>,
}

impl Tables {
    /// Check email/username uniqueness, ignoring the row being updated.
    fn check_unique(
        &self,
        email: Option<&str>,
        username: Option<&str>,
        exclude: Option<UserId>,
    ) -> AppResult<()> {
        for user in self.users.values() {
            if Some(user.id) == exclude {
                continue;
            }
            if email.is_some_and(|e| user.email.eq_ignore_ascii_case(e)) {
                return Err(AppError::conflict(
                    ConflictKind::DuplicateEmail,
                    "Email already in use",
                ));
            }
            if username.is_some_and(|u| user.username.to_lowercase() == u.to_lowercase()) {
                return Err(AppError::conflict(
                    ConflictKind::DuplicateUsername,
                    "Username already taken",
                ));
            }
        }
        Ok(())
    }

    fn check_role(&self, role_id: RoleId) -> AppResult<()> {
        if self.roles.contains_key(&role_id) {
            Ok(())
        } else {
            Err(AppError::validation("role_id", "Role does not exist"))
        }
    }

    fn listing(&self, event: &Event) -> AppResult<EventListing> {
        let organizer = self.users.get(&event.organizer_id).ok_or_else(|| {
            AppError::internal(format!("Event {} references a missing organizer", event.id))
        })?;
        Ok(EventListing {
            event: event.clone(),
            organizer_name: organizer.username.clone(),
            organizer_email: organizer.email.clone(),
        })
    }
}

/// In-memory implementation of every store trait.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Create an empty store. Roles must be seeded before users are added.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_user(&self, id: UserId) -> AppResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let wanted = username.to_lowercase();
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|u| u.username.to_lowercase() == wanted)
            .cloned())
    }

    async fn list_users(&self, page: PageRequest) -> AppResult<PageResponse<User>> {
        let tables = self.tables.read().await;
        let mut users: Vec<&User> = tables.users.values().collect();
        users.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.0.cmp(&b.id.0)));
        let total = users.len() as u64;
        let items = page.apply(users.into_iter().cloned());
        Ok(PageResponse::new(items, page, total))
    }

    async fn insert_user(&self, user: NewUser) -> AppResult<User> {
        let mut tables = self.tables.write().await;
        tables.check_unique(Some(&user.email), Some(&user.username), None)?;
        tables.check_role(user.role_id)?;

        let now = Utc::now();
        let row = User {
            id: UserId::new(),
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            role_id: user.role_id,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        tables.users.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update_profile(
        &self,
        id: UserId,
        changes: ProfileChanges,
    ) -> AppResult<Option<User>> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&id) {
            return Ok(None);
        }
        tables.check_unique(
            changes.email.as_deref(),
            changes.username.as_deref(),
            Some(id),
        )?;

        let Some(user) = tables.users.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(username) = changes.username {
            user.username = username;
        }
        if let Some(email) = changes.email {
            user.email = email;
        }
        if let Some(hash) = changes.password_hash {
            user.password_hash = hash;
        }
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn update_role(&self, id: UserId, role_id: RoleId) -> AppResult<Option<User>> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&id) {
            return Ok(None);
        }
        tables.check_role(role_id)?;
        Ok(tables.users.get_mut(&id).map(|user| {
            user.role_id = role_id;
            user.updated_at = Utc::now();
            user.clone()
        }))
    }

    async fn toggle_active(&self, id: UserId) -> AppResult<Option<User>> {
        let mut tables = self.tables.write().await;
        Ok(tables.users.get_mut(&id).map(|user| {
            user.is_active = !user.is_active;
            user.updated_at = Utc::now();
            user.clone()
        }))
    }

    async fn delete_user(&self, id: UserId) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.users.remove(&id).is_none() {
            return Ok(false);
        }
        tables.events.retain(|_, e| e.organizer_id != id);
        // an approval by a deleted account stays approved; the approver is unset
        for event in tables.events.values_mut() {
            if event.approved_by == Some(id) {
                event.approved_by = None;
            }
        }
        Ok(true)
    }
}

#[async_trait]
impl RoleStore for MemoryStore {
    async fn list_roles(&self) -> AppResult<Vec<Role>> {
        Ok(self.tables.read().await.roles.values().cloned().collect())
    }

    async fn find_role(&self, id: RoleId) -> AppResult<Option<Role>> {
        Ok(self.tables.read().await.roles.get(&id).cloned())
    }

    async fn find_role_by_name(&self, name: &str) -> AppResult<Option<Role>> {
        let tables = self.tables.read().await;
        Ok(tables.roles.values().find(|r| r.name == name).cloned())
    }

    async fn seed_role(&self, role: &Role) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        tables.roles.entry(role.id).or_insert_with(|| role.clone());
        Ok(())
    }

    async fn delete_role(&self, id: RoleId, fallback: RoleId) -> AppResult<Option<u64>> {
        let mut tables = self.tables.write().await;
        if !tables.roles.contains_key(&id) {
            return Ok(None);
        }
        tables.check_role(fallback)?;

        let now = Utc::now();
        let mut reassigned = 0;
        for user in tables.users.values_mut().filter(|u| u.role_id == id) {
            user.role_id = fallback;
            user.updated_at = now;
            reassigned += 1;
        }
        tables.roles.remove(&id);
        Ok(Some(reassigned))
    }
}

#[async_trait]
impl EventStore for MemoryStore {
    async fn find_event(&self, id: EventId) -> AppResult<Option<EventListing>> {
        let tables = self.tables.read().await;
        tables.events.get(&id).map(|e| tables.listing(e)).transpose()
    }

    async fn query_events(&self, query: &EventQuery) -> AppResult<PageResponse<EventListing>> {
        let tables = self.tables.read().await;
        let mut matched = Vec::new();
        for event in tables.events.values() {
            let listing = tables.listing(event)?;
            if query.admits(&listing) {
                matched.push(listing);
            }
        }
        matched.sort_by(|a, b| {
            a.event
                .date
                .cmp(&b.event.date)
                .then(a.event.created_at.cmp(&b.event.created_at))
        });
        let total = matched.len() as u64;
        Ok(PageResponse::new(query.page.apply(matched), query.page, total))
    }

    async fn insert_event(&self, event: NewEvent) -> AppResult<EventListing> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&event.organizer_id) {
            return Err(AppError::not_found("Organizer not found"));
        }
        let now = Utc::now();
        let row = Event {
            id: EventId::new(),
            title: event.title,
            description: event.description,
            date: event.date,
            address: event.address,
            organizer_id: event.organizer_id,
            status: ApprovalStatus::Pending,
            approved_by: None,
            approved_at: None,
            created_at: now,
            updated_at: now,
        };
        let listing = tables.listing(&row)?;
        tables.events.insert(row.id, row);
        Ok(listing)
    }

    async fn update_event(
        &self,
        id: EventId,
        changes: EventChanges,
    ) -> AppResult<Option<EventListing>> {
        let mut tables = self.tables.write().await;
        let Some(event) = tables.events.get_mut(&id) else {
            return Ok(None);
        };
        event.title = changes.title;
        event.description = changes.description;
        event.date = changes.date;
        event.address = changes.address;
        event.updated_at = Utc::now();
        let event = event.clone();
        tables.listing(&event).map(Some)
    }

    async fn delete_event(&self, id: EventId) -> AppResult<bool> {
        Ok(self.tables.write().await.events.remove(&id).is_some())
    }

    async fn approve_event(
        &self,
        id: EventId,
        approver: UserId,
        at: DateTime<Utc>,
    ) -> AppResult<TransitionOutcome> {
        let mut tables = self.tables.write().await;
        let Some(event) = tables.events.get_mut(&id) else {
            return Ok(TransitionOutcome::NotFound);
        };
        let Some(next) = Transition::Approve.target(event.status) else {
            return Ok(TransitionOutcome::GuardFailed(event.status));
        };
        event.status = next;
        event.approved_by = Some(approver);
        event.approved_at = Some(at);
        event.updated_at = Utc::now();
        let event = event.clone();
        tables.listing(&event).map(TransitionOutcome::Applied)
    }

    async fn reject_event(&self, id: EventId) -> AppResult<TransitionOutcome> {
        let mut tables = self.tables.write().await;
        let Some(event) = tables.events.get_mut(&id) else {
            return Ok(TransitionOutcome::NotFound);
        };
        let Some(next) = Transition::Reject.target(event.status) else {
            return Ok(TransitionOutcome::GuardFailed(event.status));
        };
        event.status = next;
        event.approved_by = None;
        event.approved_at = None;
        event.updated_at = Utc::now();
        let event = event.clone();
        tables.listing(&event).map(TransitionOutcome::Applied)
    }
}
