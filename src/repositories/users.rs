use sqlx::SqlitePool;
use tracing::{info, instrument, warn};

use crate::models::{NewUser, User};
use crate::utils::error::{AppError, AppResult};

const USER_COLUMNS: &str = "id, first_name, last_name, email, password, created_at";

#[derive(Clone)]
pub struct UserDirectory {
    pool: SqlitePool,
}

impl UserDirectory {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Inserts a user. Duplicate emails are rejected by the schema.
    #[instrument(skip(self, user), fields(email = %user.email))]
    pub async fn register(&self, user: NewUser) -> AppResult<User> {
        let query = format!(
            "INSERT INTO users (first_name, last_name, email, password, created_at) \
             VALUES (?, ?, ?, ?, ?) RETURNING {USER_COLUMNS}"
        );
        let created: User = sqlx::query_as(&query)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.email)
            .bind(&user.password)
            .bind(user.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::from_constraint(
                    e,
                    &format!("Email '{}' is already registered", user.email),
                    "Referenced row does not exist",
                )
            })
            .inspect_err(AppError::log)?;

        info!(user_id = created.id, "User registered successfully");
        Ok(created)
    }

    /// Returns the user whose email and password both match exactly.
    #[instrument(skip(self, password))]
    pub async fn authenticate(&self, email: &str, password: &str) -> AppResult<Option<User>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE email = ? AND password = ?");
        let user = sqlx::query_as(&query)
            .bind(email)
            .bind(password)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::logged)?;
        Ok(user)
    }

    pub async fn login(&self, email: &str, password: &str) -> AppResult<bool> {
        match self.authenticate(email, password).await? {
            Some(user) => {
                info!(user_id = user.id, "{} logged in successfully", user.full_name());
                Ok(true)
            }
            None => {
                warn!(email, "Invalid email or password");
                Ok(false)
            }
        }
    }

    pub async fn get(&self, id: i64) -> AppResult<User> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::logged)?
            .ok_or_else(|| AppError::NotFound(format!("User with id {id}")))
            .inspect_err(AppError::log)
    }
}
