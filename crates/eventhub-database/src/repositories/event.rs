//! Event repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};

use eventhub_core::error::{AppError, ErrorKind};
use eventhub_core::result::AppResult;
use eventhub_core::types::{EventId, PageResponse, UserId};
use eventhub_entity::event::{
    ApprovalStatus, EventChanges, EventFilter, EventListing, EventQuery, NewEvent,
};

use crate::store::{EventStore, TransitionOutcome};

/// Columns of an [`EventListing`], over an `events` relation aliased `e`.
const LISTING_COLUMNS: &str =
    "e.*, u.username AS organizer_name, u.email AS organizer_email";

/// PostgreSQL-backed [`EventStore`].
#[derive(Debug, Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    /// Create a new event repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Wrap a mutating `UPDATE ... RETURNING *` as `e` and join the organizer.
    fn listing_from_cte(update_sql: &str) -> String {
        format!(
            "WITH e AS ({update_sql}) \
             SELECT {LISTING_COLUMNS} FROM e JOIN users u ON u.id = e.organizer_id"
        )
    }

    async fn current_status(&self, id: EventId) -> AppResult<Option<ApprovalStatus>> {
        sqlx::query_scalar::<_, ApprovalStatus>("SELECT status FROM events WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to read status", e))
    }

    async fn outcome_for_miss(&self, id: EventId) -> AppResult<TransitionOutcome> {
        Ok(match self.current_status(id).await? {
            Some(status) => TransitionOutcome::GuardFailed(status),
            None => TransitionOutcome::NotFound,
        })
    }
}

/// Escape `%`, `_` and `\` so user input is matched literally by `ILIKE`.
fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len() + 2);
    out.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('%');
    out
}

/// Append the `WHERE` conditions for `query` (filter plus visibility).
fn push_conditions(qb: &mut QueryBuilder<'_, Postgres>, query: &EventQuery) {
    qb.push(" WHERE TRUE");
    if query.visibility.approved_only() {
        qb.push(" AND e.status = 'approved'");
    }
    match &query.filter {
        EventFilter::All => {}
        EventFilter::ByOrganizer(id) => {
            qb.push(" AND e.organizer_id = ").push_bind(*id);
        }
        EventFilter::Search(term) => {
            let pattern = escape_like(term);
            qb.push(" AND (e.title ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR e.description ILIKE ")
                .push_bind(pattern)
                .push(")");
        }
        EventFilter::Upcoming(now) => {
            qb.push(" AND e.date > ").push_bind(*now);
        }
        EventFilter::DateRange { start, end } => {
            qb.push(" AND e.date BETWEEN ")
                .push_bind(*start)
                .push(" AND ")
                .push_bind(*end);
        }
    }
}

#[async_trait]
impl EventStore for EventRepository {
    async fn find_event(&self, id: EventId) -> AppResult<Option<EventListing>> {
        sqlx::query_as::<_, EventListing>(&format!(
            "SELECT {LISTING_COLUMNS} FROM events e \
             JOIN users u ON u.id = e.organizer_id WHERE e.id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find event", e))
    }

    async fn query_events(&self, query: &EventQuery) -> AppResult<PageResponse<EventListing>> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM events e");
        push_conditions(&mut count, query);
        let total: i64 = count
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count events", e))?;

        let mut select = QueryBuilder::<Postgres>::new(format!(
            "SELECT {LISTING_COLUMNS} FROM events e JOIN users u ON u.id = e.organizer_id"
        ));
        push_conditions(&mut select, query);
        select
            .push(" ORDER BY e.date ASC, e.created_at ASC LIMIT ")
            .push_bind(i64::from(query.page.limit))
            .push(" OFFSET ")
            .push_bind(i64::from(query.page.offset));

        let events = select
            .build_query_as::<EventListing>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to query events", e))?;

        Ok(PageResponse::new(events, query.page, total as u64))
    }

    async fn insert_event(&self, event: NewEvent) -> AppResult<EventListing> {
        let sql = Self::listing_from_cte(
            "INSERT INTO events (id, title, description, date, address, organizer_id) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        );
        sqlx::query_as::<_, EventListing>(&sql)
            .bind(EventId::new())
            .bind(&event.title)
            .bind(&event.description)
            .bind(event.date)
            .bind(&event.address)
            .bind(event.organizer_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db_err)
                    if db_err.constraint() == Some("events_organizer_id_fkey") =>
                {
                    AppError::not_found("Organizer not found")
                }
                _ => AppError::with_source(ErrorKind::Database, "Failed to create event", e),
            })
    }

    async fn update_event(
        &self,
        id: EventId,
        changes: EventChanges,
    ) -> AppResult<Option<EventListing>> {
        let sql = Self::listing_from_cte(
            "UPDATE events SET title = $2, description = $3, date = $4, address = $5, \
                               updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        );
        sqlx::query_as::<_, EventListing>(&sql)
            .bind(id)
            .bind(&changes.title)
            .bind(&changes.description)
            .bind(changes.date)
            .bind(&changes.address)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update event", e))
    }

    async fn delete_event(&self, id: EventId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete event", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn approve_event(
        &self,
        id: EventId,
        approver: UserId,
        at: DateTime<Utc>,
    ) -> AppResult<TransitionOutcome> {
        let sql = Self::listing_from_cte(
            "UPDATE events SET status = 'approved', approved_by = $2, approved_at = $3, \
                               updated_at = NOW() \
             WHERE id = $1 AND status <> 'approved' RETURNING *",
        );
        let applied = sqlx::query_as::<_, EventListing>(&sql)
            .bind(id)
            .bind(approver)
            .bind(at)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to approve event", e))?;

        match applied {
            Some(listing) => Ok(TransitionOutcome::Applied(listing)),
            None => self.outcome_for_miss(id).await,
        }
    }

    async fn reject_event(&self, id: EventId) -> AppResult<TransitionOutcome> {
        let sql = Self::listing_from_cte(
            "UPDATE events SET status = 'rejected', approved_by = NULL, approved_at = NULL, \
                               updated_at = NOW() \
             WHERE id = $1 AND status = 'approved' RETURNING *",
        );
        let applied = sqlx::query_as::<_, EventListing>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to reject event", e))?;

        match applied {
            Some(listing) => Ok(TransitionOutcome::Applied(listing)),
            None => self.outcome_for_miss(id).await,
        }
    }
}
