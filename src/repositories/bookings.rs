//! Seat-limited bookings.
//!
//! A booking takes its seats with a single conditional decrement of
//! `events.available_seats` and writes the booking row in the same
//! transaction. Concurrent callers serialize on the decrement, so the counter
//! can never be driven below zero and a failed insert leaves it untouched.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{info, instrument};

use crate::models::Booking;
use crate::utils::error::{AppError, AppResult};

const BOOKING_COLUMNS: &str = "id, user_id, event_id, tickets_booked, booking_date";

#[derive(Clone)]
pub struct BookingLedger {
    pool: SqlitePool,
}

impl BookingLedger {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Books `tickets` seats of `event_id` for `user_id`.
    ///
    /// Fails with [`AppError::NotFound`] for an unknown event or user and
    /// with [`AppError::InsufficientSeats`] when the event cannot cover the
    /// request. Neither failure writes anything.
    #[instrument(skip(self))]
    pub async fn make_booking(
        &self,
        user_id: i64,
        event_id: i64,
        tickets: u32,
    ) -> AppResult<Booking> {
        if tickets == 0 {
            let err = AppError::ValidationError("tickets must be at least 1".to_string());
            err.log();
            return Err(err);
        }
        let requested = i64::from(tickets);

        let mut tx = self.pool.begin().await.map_err(AppError::logged)?;

        let reserved = sqlx::query(
            "UPDATE events SET available_seats = available_seats - ? \
             WHERE id = ? AND available_seats >= ?",
        )
        .bind(requested)
        .bind(event_id)
        .bind(requested)
        .execute(&mut *tx)
        .await
        .map_err(AppError::logged)?;

        if reserved.rows_affected() == 0 {
            let available: Option<i32> =
                sqlx::query_scalar("SELECT available_seats FROM events WHERE id = ?")
                    .bind(event_id)
                    .fetch_optional(&mut *tx)
                    .await
                    .map_err(AppError::logged)?;
            drop(tx);

            let err = match available {
                None => AppError::NotFound(format!("Event with id {event_id}")),
                Some(available) => AppError::InsufficientSeats {
                    requested: tickets,
                    available,
                },
            };
            err.log();
            return Err(err);
        }

        let query = format!(
            "INSERT INTO bookings (user_id, event_id, tickets_booked, booking_date) \
             VALUES (?, ?, ?, ?) RETURNING {BOOKING_COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, Booking>(&query)
            .bind(user_id)
            .bind(event_id)
            .bind(requested)
            .bind(Utc::now())
            .fetch_one(&mut *tx)
            .await;

        let booking = match inserted {
            Ok(booking) => booking,
            Err(e) => {
                drop(tx);
                let err = AppError::from_constraint(
                    e,
                    "Booking already exists",
                    &format!("User with id {user_id}"),
                );
                err.log();
                return Err(err);
            }
        };

        tx.commit().await.map_err(AppError::logged)?;

        info!(booking_id = booking.id, "Booking made successfully");
        Ok(booking)
    }

    pub async fn list_for_user(&self, user_id: i64) -> AppResult<Vec<Booking>> {
        let query =
            format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE user_id = ? ORDER BY id");
        let bookings = sqlx::query_as::<_, Booking>(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::logged)?;
        Ok(bookings)
    }

    pub async fn list_for_event(&self, event_id: i64) -> AppResult<Vec<Booking>> {
        let query =
            format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE event_id = ? ORDER BY id");
        let bookings = sqlx::query_as::<_, Booking>(&query)
            .bind(event_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::logged)?;
        Ok(bookings)
    }
}
