use std::time::Duration;

use chrono::{NaiveDate, NaiveTime};
use event_booking::models::{Event, NewEvent, NewUser, User};
use event_booking::{db, Config, EventCatalog, UserDirectory};
use sqlx::SqlitePool;
use tempfile::TempDir;

/// A migrated database file that lives as long as this value.
pub struct TestDb {
    pub pool: SqlitePool,
    _dir: TempDir,
}

pub async fn setup() -> TestDb {
    setup_with_connections(4).await
}

pub async fn setup_with_connections(max_connections: u32) -> TestDb {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        database_url: format!("sqlite://{}", dir.path().join("bookings.db").display()),
        max_connections,
        busy_timeout: Duration::from_secs(10),
    };
    let pool = db::init(&config).await.unwrap();
    TestDb { pool, _dir: dir }
}

#[allow(dead_code)]
pub async fn register_user(pool: &SqlitePool, email: &str) -> User {
    UserDirectory::new(pool.clone())
        .register(NewUser::new("Test", "User", email, "secret"))
        .await
        .unwrap()
}

#[allow(dead_code)]
pub async fn create_event(pool: &SqlitePool, name: &str, seats: u32) -> Event {
    EventCatalog::new(pool.clone())
        .create(NewEvent::new(
            name,
            NaiveDate::from_ymd_opt(2026, 11, 20).unwrap(),
            NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
            "Main Hall",
            seats,
        ))
        .await
        .unwrap()
}
