use dotenvy::dotenv;
use tracing_subscriber::EnvFilter;

use event_booking::{db, AppResult, Config, EventCatalog};

#[tokio::main]
async fn main() -> AppResult<()> {
    dotenv().ok();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::from_env().inspect_err(|e| e.log())?;
    let pool = db::init(&config).await.inspect_err(|e| e.log())?;

    let events = EventCatalog::new(pool.clone()).list_all().await?;
    let seats: i64 = events.iter().map(|e| i64::from(e.available_seats)).sum();
    tracing::info!(events = events.len(), seats, "Event catalog ready");

    pool.close().await;
    Ok(())
}
