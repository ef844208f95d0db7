use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub event_date: NaiveDate,
    pub event_time: NaiveTime,
    pub location: String,
    pub available_seats: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewEvent {
    pub name: String,
    pub description: Option<String>,
    pub event_date: NaiveDate,
    pub event_time: NaiveTime,
    pub location: String,
    pub available_seats: u32,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl NewEvent {
    pub fn new(
        name: impl Into<String>,
        event_date: NaiveDate,
        event_time: NaiveTime,
        location: impl Into<String>,
        available_seats: u32,
    ) -> Self {
        Self {
            name: name.into(),
            description: None,
            event_date,
            event_time,
            location: location.into(),
            available_seats,
            created_at: Utc::now(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
