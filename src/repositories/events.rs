use sqlx::SqlitePool;
use tracing::{debug, info, instrument};

use crate::models::{Event, NewEvent};
use crate::utils::error::{AppError, AppResult};

const EVENT_COLUMNS: &str =
    "id, name, description, event_date, event_time, location, available_seats, created_at";

/// Read access to events, plus inserting new ones.
#[derive(Clone)]
pub struct EventCatalog {
    pool: SqlitePool,
}

impl EventCatalog {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    #[instrument(skip(self, event), fields(name = %event.name))]
    pub async fn create(&self, event: NewEvent) -> AppResult<Event> {
        let seats = i32::try_from(event.available_seats)
            .map_err(|_| {
                AppError::ValidationError(format!(
                    "available_seats {} is out of range",
                    event.available_seats
                ))
            })
            .inspect_err(AppError::log)?;

        let query = format!(
            "INSERT INTO events \
             (name, description, event_date, event_time, location, available_seats, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING {EVENT_COLUMNS}"
        );
        let created: Event = sqlx::query_as(&query)
            .bind(&event.name)
            .bind(&event.description)
            .bind(event.event_date)
            .bind(event.event_time)
            .bind(&event.location)
            .bind(seats)
            .bind(event.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::logged)?;

        info!(event_id = created.id, seats, "Event created");
        Ok(created)
    }

    pub async fn list_all(&self) -> AppResult<Vec<Event>> {
        let query = format!("SELECT {EVENT_COLUMNS} FROM events ORDER BY id");
        let events: Vec<Event> = sqlx::query_as(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::logged)?;
        debug!(count = events.len(), "Fetched events");
        Ok(events)
    }

    pub async fn get(&self, id: i64) -> AppResult<Event> {
        let query = format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = ?");
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::logged)?
            .ok_or_else(|| AppError::NotFound(format!("Event with id {id}")))
            .inspect_err(AppError::log)
    }
}
