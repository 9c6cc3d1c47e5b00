// --- File: crates/bookify_db/src/sql.rs ---
//! SQL implementations of the booking and user stores
//!
//! Dates and times are stored as TEXT in the same `YYYY-MM-DD` / `HH:MM`
//! shapes the tool surface speaks, because the `Any` driver cannot decode
//! chrono types directly. Rows are parsed back on read; a row that does not
//! parse is surfaced as an error instead of being silently skipped.

use crate::error::DbError;
use crate::DbClient;
use bookify_common::models::{NewUser, User};
use bookify_core::models::{
    Booking, BookingDraft, BookingId, BookingStatus, UserId, DATE_FORMAT, TIME_FORMAT,
};
use bookify_core::store::{BookingStore, BoxFuture, StoreError, UserStore};
use chrono::{NaiveDate, NaiveTime};
use sqlx::any::AnyRow;
use sqlx::Row;
use std::str::FromStr;
use tracing::{debug, error, info};

fn query_err(context: &str, err: sqlx::Error) -> DbError {
    error!("{context}: {err}");
    DbError::QueryError(err.to_string())
}

fn booking_from_row(row: &AnyRow) -> Result<Booking, DbError> {
    let date_text: String = row
        .try_get("date")
        .map_err(|e| DbError::QueryError(e.to_string()))?;
    let time_text: String = row
        .try_get("time")
        .map_err(|e| DbError::QueryError(e.to_string()))?;
    let status_text: String = row
        .try_get("status")
        .map_err(|e| DbError::QueryError(e.to_string()))?;

    let date = NaiveDate::parse_from_str(&date_text, DATE_FORMAT)
        .map_err(|e| DbError::RowError(format!("bad date {date_text:?}: {e}")))?;
    let time = NaiveTime::parse_from_str(&time_text, TIME_FORMAT)
        .map_err(|e| DbError::RowError(format!("bad time {time_text:?}: {e}")))?;
    let status = BookingStatus::from_str(&status_text)
        .map_err(|e| DbError::RowError(e.to_string()))?;

    Ok(Booking {
        booking_id: row
            .try_get("booking_id")
            .map_err(|e| DbError::QueryError(e.to_string()))?,
        user_id: row
            .try_get("user_id")
            .map_err(|e| DbError::QueryError(e.to_string()))?,
        date,
        time,
        status,
    })
}

fn user_from_row(row: &AnyRow) -> Result<User, DbError> {
    Ok(User {
        user_id: row
            .try_get("user_id")
            .map_err(|e| DbError::QueryError(e.to_string()))?,
        name: row
            .try_get("name")
            .map_err(|e| DbError::QueryError(e.to_string()))?,
        email: row
            .try_get("email")
            .map_err(|e| DbError::QueryError(e.to_string()))?,
        phone_number: row
            .try_get("phone_number")
            .map_err(|e| DbError::QueryError(e.to_string()))?,
        age: row
            .try_get("age")
            .map_err(|e| DbError::QueryError(e.to_string()))?,
    })
}

/// SQL implementation of the booking store
#[derive(Debug, Clone)]
pub struct SqlBookingStore {
    /// The database client
    db_client: DbClient,
}

impl SqlBookingStore {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }

    /// Create the bookings table if it doesn't exist
    ///
    /// # Errors
    ///
    /// Returns an error when the DDL statement fails.
    pub async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing bookings schema");

        let query = r#"
            CREATE TABLE IF NOT EXISTS bookings (
                booking_id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                date TEXT NOT NULL,
                time TEXT NOT NULL,
                status TEXT NOT NULL,
                FOREIGN KEY (user_id) REFERENCES users (user_id)
            )
        "#;

        self.db_client.execute(query).await?;

        info!("Bookings schema initialized successfully");
        Ok(())
    }

    async fn insert_inner(&self, draft: BookingDraft) -> Result<BookingId, DbError> {
        let query = r#"
            INSERT INTO bookings (user_id, date, time, status)
            VALUES ($1, $2, $3, $4)
            RETURNING booking_id
        "#;

        let row = sqlx::query(query)
            .bind(draft.user_id)
            .bind(draft.date.format(DATE_FORMAT).to_string())
            .bind(draft.time.format(TIME_FORMAT).to_string())
            .bind(draft.status.as_str())
            .fetch_one(self.db_client.pool())
            .await
            .map_err(|e| query_err("Failed to insert booking", e))?;

        row.try_get("booking_id")
            .map_err(|e| DbError::QueryError(e.to_string()))
    }

    async fn get_inner(&self, id: BookingId) -> Result<Option<Booking>, DbError> {
        let query = r#"
            SELECT booking_id, user_id, date, time, status
            FROM bookings
            WHERE booking_id = $1
        "#;

        let row = sqlx::query(query)
            .bind(id)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| query_err("Failed to fetch booking", e))?;

        row.as_ref().map(booking_from_row).transpose()
    }

    async fn update_field_inner(
        &self,
        id: BookingId,
        field_query: &str,
        value: String,
    ) -> Result<(), DbError> {
        sqlx::query(field_query)
            .bind(value)
            .bind(id)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| query_err("Failed to update booking", e))?;
        Ok(())
    }

    async fn delete_inner(&self, id: BookingId) -> Result<bool, DbError> {
        let query = "DELETE FROM bookings WHERE booking_id = $1";

        let result = sqlx::query(query)
            .bind(id)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| query_err("Failed to delete booking", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_inner(&self) -> Result<Vec<Booking>, DbError> {
        let query = r#"
            SELECT booking_id, user_id, date, time, status
            FROM bookings
            ORDER BY booking_id
        "#;

        let rows = sqlx::query(query)
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| query_err("Failed to list bookings", e))?;

        rows.iter().map(booking_from_row).collect()
    }
}

impl BookingStore for SqlBookingStore {
    fn insert(&self, draft: BookingDraft) -> BoxFuture<'_, BookingId, StoreError> {
        Box::pin(async move { self.insert_inner(draft).await.map_err(StoreError::from) })
    }

    fn get(&self, id: BookingId) -> BoxFuture<'_, Option<Booking>, StoreError> {
        Box::pin(async move { self.get_inner(id).await.map_err(StoreError::from) })
    }

    fn update_status(
        &self,
        id: BookingId,
        status: BookingStatus,
    ) -> BoxFuture<'_, (), StoreError> {
        Box::pin(async move {
            self.update_field_inner(
                id,
                "UPDATE bookings SET status = $1 WHERE booking_id = $2",
                status.as_str().to_string(),
            )
            .await
            .map_err(StoreError::from)
        })
    }

    fn update_date(&self, id: BookingId, date: NaiveDate) -> BoxFuture<'_, (), StoreError> {
        Box::pin(async move {
            self.update_field_inner(
                id,
                "UPDATE bookings SET date = $1 WHERE booking_id = $2",
                date.format(DATE_FORMAT).to_string(),
            )
            .await
            .map_err(StoreError::from)
        })
    }

    fn update_time(&self, id: BookingId, time: NaiveTime) -> BoxFuture<'_, (), StoreError> {
        Box::pin(async move {
            self.update_field_inner(
                id,
                "UPDATE bookings SET time = $1 WHERE booking_id = $2",
                time.format(TIME_FORMAT).to_string(),
            )
            .await
            .map_err(StoreError::from)
        })
    }

    fn delete(&self, id: BookingId) -> BoxFuture<'_, bool, StoreError> {
        Box::pin(async move { self.delete_inner(id).await.map_err(StoreError::from) })
    }

    fn list(&self) -> BoxFuture<'_, Vec<Booking>, StoreError> {
        Box::pin(async move { self.list_inner().await.map_err(StoreError::from) })
    }
}

/// SQL implementation of the user store
#[derive(Debug, Clone)]
pub struct SqlUserStore {
    /// The database client
    db_client: DbClient,
}

impl SqlUserStore {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }

    /// Create the users table if it doesn't exist
    ///
    /// # Errors
    ///
    /// Returns an error when the DDL statement fails.
    pub async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing users schema");

        let query = r#"
            CREATE TABLE IF NOT EXISTS users (
                user_id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                email TEXT NOT NULL,
                phone_number TEXT NOT NULL,
                age INTEGER NOT NULL
            )
        "#;

        self.db_client.execute(query).await?;

        info!("Users schema initialized successfully");
        Ok(())
    }

    async fn lookup_inner(
        &self,
        name: String,
        email: String,
        phone_number: String,
    ) -> Result<Option<UserId>, DbError> {
        let query = r#"
            SELECT user_id
            FROM users
            WHERE name = $1 AND email = $2 AND phone_number = $3
        "#;

        let row = sqlx::query(query)
            .bind(name)
            .bind(email)
            .bind(phone_number)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| query_err("Failed to look up user", e))?;

        row.map(|r| {
            r.try_get("user_id")
                .map_err(|e| DbError::QueryError(e.to_string()))
        })
        .transpose()
    }

    async fn create_inner(&self, user: NewUser) -> Result<UserId, DbError> {
        let query = r#"
            INSERT INTO users (name, email, phone_number, age)
            VALUES ($1, $2, $3, $4)
            RETURNING user_id
        "#;

        let row = sqlx::query(query)
            .bind(user.name)
            .bind(user.email)
            .bind(user.phone_number)
            .bind(user.age)
            .fetch_one(self.db_client.pool())
            .await
            .map_err(|e| query_err("Failed to insert user", e))?;

        row.try_get("user_id")
            .map_err(|e| DbError::QueryError(e.to_string()))
    }

    async fn get_inner(&self, id: UserId) -> Result<Option<User>, DbError> {
        let query = r#"
            SELECT user_id, name, email, phone_number, age
            FROM users
            WHERE user_id = $1
        "#;

        let row = sqlx::query(query)
            .bind(id)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| query_err("Failed to fetch user", e))?;

        row.as_ref().map(user_from_row).transpose()
    }
}

impl UserStore for SqlUserStore {
    fn lookup(
        &self,
        name: &str,
        email: &str,
        phone_number: &str,
    ) -> BoxFuture<'_, Option<UserId>, StoreError> {
        let name = name.to_string();
        let email = email.to_string();
        let phone_number = phone_number.to_string();
        Box::pin(async move {
            self.lookup_inner(name, email, phone_number)
                .await
                .map_err(StoreError::from)
        })
    }

    fn create(&self, user: NewUser) -> BoxFuture<'_, UserId, StoreError> {
        Box::pin(async move { self.create_inner(user).await.map_err(StoreError::from) })
    }

    fn get(&self, id: UserId) -> BoxFuture<'_, Option<User>, StoreError> {
        Box::pin(async move { self.get_inner(id).await.map_err(StoreError::from) })
    }
}
