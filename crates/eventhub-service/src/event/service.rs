//! Event service: the approval workflow and every event read path.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use eventhub_auth::Principal;
use eventhub_auth::rbac::policy::visibility_for;
use eventhub_auth::rbac::{AccessPolicy, RbacEnforcer};
use eventhub_core::error::AppError;
use eventhub_core::result::AppResult;
use eventhub_core::types::{EventId, PageRequest, PageResponse, UserId};
use eventhub_database::store::EventStore;
use eventhub_entity::event::{
    EventChanges, EventFilter, EventListing, EventQuery, NewEvent, Transition,
};

use super::validation::EventInput;
use super::workflow::settle;

/// Creates, edits, moderates and reads events.
///
/// Every read goes through [`visibility_for`], so a principal without
/// read-all rights never sees an unapproved event, whatever the query.
#[derive(Clone)]
pub struct EventService {
    events: Arc<dyn EventStore>,
    rbac: RbacEnforcer,
}

impl std::fmt::Debug for EventService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventService").finish_non_exhaustive()
    }
}

impl EventService {
    /// Creates a new event service.
    pub fn new(events: Arc<dyn EventStore>) -> Self {
        Self {
            events,
            rbac: RbacEnforcer::new(),
        }
    }

    /// Submit a new event organized by `actor`. It starts out pending.
    pub async fn create(&self, actor: &Principal, input: EventInput) -> AppResult<EventListing> {
        let valid = input.validate(Utc::now())?;
        let listing = self
            .events
            .insert_event(NewEvent {
                title: valid.title,
                description: valid.description,
                date: valid.date,
                address: valid.address,
                organizer_id: actor.id,
            })
            .await?;

        info!(event_id = %listing.event.id, organizer = %actor.id, "Event created");
        Ok(listing)
    }

    /// Fetch one event. Events the viewer may not see are reported as missing.
    pub async fn get(&self, viewer: Option<&Principal>, id: EventId) -> AppResult<EventListing> {
        let visibility = visibility_for(viewer);
        self.events
            .find_event(id)
            .await?
            .filter(|listing| visibility.admits(listing.event.status))
            .ok_or_else(|| AppError::not_found("Event not found"))
    }

    /// Run a read query with the viewer's visibility applied.
    pub async fn query(
        &self,
        viewer: Option<&Principal>,
        filter: EventFilter,
        page: PageRequest,
    ) -> AppResult<PageResponse<EventListing>> {
        if let EventFilter::DateRange { start, end } = &filter {
            if start > end {
                return Err(AppError::validation(
                    "end",
                    "End of the date range must not precede its start",
                ));
            }
        }
        let filter = match filter {
            EventFilter::Search(term) if term.trim().is_empty() => EventFilter::All,
            EventFilter::Search(term) => EventFilter::Search(term.trim().to_string()),
            other => other,
        };
        let query = EventQuery::new(filter, visibility_for(viewer), page);
        self.events.query_events(&query).await
    }

    /// Every visible event.
    pub async fn list(
        &self,
        viewer: Option<&Principal>,
        page: PageRequest,
    ) -> AppResult<PageResponse<EventListing>> {
        self.query(viewer, EventFilter::All, page).await
    }

    /// Visible events whose title or description contains `term`.
    pub async fn search(
        &self,
        viewer: Option<&Principal>,
        term: &str,
        page: PageRequest,
    ) -> AppResult<PageResponse<EventListing>> {
        self.query(viewer, EventFilter::Search(term.to_string()), page)
            .await
    }

    /// Visible events organized by `organizer`.
    pub async fn by_organizer(
        &self,
        viewer: Option<&Principal>,
        organizer: UserId,
        page: PageRequest,
    ) -> AppResult<PageResponse<EventListing>> {
        self.query(viewer, EventFilter::ByOrganizer(organizer), page)
            .await
    }

    /// Visible events that have not started yet.
    pub async fn upcoming(
        &self,
        viewer: Option<&Principal>,
        page: PageRequest,
    ) -> AppResult<PageResponse<EventListing>> {
        self.query(viewer, EventFilter::Upcoming(Utc::now()), page)
            .await
    }

    /// Visible events with `start <= date <= end`.
    pub async fn date_range(
        &self,
        viewer: Option<&Principal>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        page: PageRequest,
    ) -> AppResult<PageResponse<EventListing>> {
        self.query(viewer, EventFilter::DateRange { start, end }, page)
            .await
    }

    /// The caller's own events, under the caller's visibility.
    pub async fn mine(
        &self,
        actor: &Principal,
        page: PageRequest,
    ) -> AppResult<PageResponse<EventListing>> {
        self.by_organizer(Some(actor), actor.id, page).await
    }

    /// Edit an event's fields. The approval state is left as it is.
    pub async fn update(
        &self,
        actor: &Principal,
        id: EventId,
        input: EventInput,
    ) -> AppResult<EventListing> {
        let current = self.load(id).await?;
        self.authorize(&AccessPolicy::EDIT_EVENT, actor, &current, "edit")?;
        let valid = input.validate(Utc::now())?;

        let listing = self
            .events
            .update_event(
                id,
                EventChanges {
                    title: valid.title,
                    description: valid.description,
                    date: valid.date,
                    address: valid.address,
                },
            )
            .await?
            .ok_or_else(|| AppError::not_found("Event not found"))?;

        info!(event_id = %id, editor = %actor.id, "Event updated");
        Ok(listing)
    }

    /// Delete an event.
    pub async fn delete(&self, actor: &Principal, id: EventId) -> AppResult<()> {
        let current = self.load(id).await?;
        self.authorize(&AccessPolicy::DELETE_EVENT, actor, &current, "delete")?;

        if !self.events.delete_event(id).await? {
            return Err(AppError::not_found("Event not found"));
        }
        info!(event_id = %id, deleted_by = %actor.id, "Event deleted");
        Ok(())
    }

    /// Approve a pending or rejected event, recording `actor` as approver.
    pub async fn approve(&self, actor: &Principal, id: EventId) -> AppResult<EventListing> {
        self.rbac
            .ensure_any(actor, AccessPolicy::MODERATE_EVENT.permissions)?;
        let outcome = self.events.approve_event(id, actor.id, Utc::now()).await?;
        let listing = settle(Transition::Approve, outcome)?;

        info!(event_id = %id, approver = %actor.id, "Event approved");
        Ok(listing)
    }

    /// Reject an approved event, clearing the approver fields.
    pub async fn reject(&self, actor: &Principal, id: EventId) -> AppResult<EventListing> {
        self.rbac
            .ensure_any(actor, AccessPolicy::MODERATE_EVENT.permissions)?;
        let outcome = self.events.reject_event(id).await?;
        let listing = settle(Transition::Reject, outcome)?;

        info!(event_id = %id, moderator = %actor.id, "Event rejected");
        Ok(listing)
    }

    async fn load(&self, id: EventId) -> AppResult<EventListing> {
        self.events
            .find_event(id)
            .await?
            .ok_or_else(|| AppError::not_found("Event not found"))
    }

    fn authorize(
        &self,
        policy: &AccessPolicy,
        actor: &Principal,
        listing: &EventListing,
        action: &str,
    ) -> AppResult<()> {
        if policy.can_act_on(actor, listing.event.organizer_id) {
            return Ok(());
        }
        warn!(
            user_id = %actor.id,
            event_id = %listing.event.id,
            action,
            "Event access denied"
        );
        Err(AppError::forbidden(format!(
            "You do not have permission to {action} this event"
        )))
    }
}
