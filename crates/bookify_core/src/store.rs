// --- File: crates/bookify_core/src/store.rs ---
//! Storage abstractions for bookings and users.
//!
//! These traits decouple the booking engine from any concrete persistence
//! backend. They are object safe so the engine can hold `Arc<dyn BookingStore>`
//! and be exercised against in-memory doubles in tests.

use crate::models::{Booking, BookingDraft, BookingId, BookingStatus, UserId};
use bookify_common::models::{NewUser, User};
use chrono::{NaiveDate, NaiveTime};
use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// A wrapper error type that implements std::error::Error for
/// Box<dyn std::error::Error + Send + Sync>, so store implementations can
/// surface whatever error type their backend produces.
#[derive(Debug)]
pub struct StoreError(pub Box<dyn StdError + Send + Sync>);

impl StoreError {
    /// A store error carrying just a message.
    pub fn message(msg: impl Into<String>) -> Self {
        StoreError(msg.into().into())
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StdError for StoreError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

impl From<Box<dyn StdError + Send + Sync>> for StoreError {
    fn from(err: Box<dyn StdError + Send + Sync>) -> Self {
        StoreError(err)
    }
}

/// Durable CRUD for booking records.
///
/// Every operation touches a single row and is atomic with respect to
/// concurrent callers; the engine adds its own mutual exclusion on top for
/// compound operations. Updates for an id that does not exist are no-ops.
pub trait BookingStore: Send + Sync {
    /// Insert a new booking and return the id the store assigned.
    fn insert(&self, draft: BookingDraft) -> BoxFuture<'_, BookingId, StoreError>;

    /// Fetch a booking by id.
    fn get(&self, id: BookingId) -> BoxFuture<'_, Option<Booking>, StoreError>;

    /// Set the status of a booking.
    fn update_status(&self, id: BookingId, status: BookingStatus)
        -> BoxFuture<'_, (), StoreError>;

    /// Move a booking to another date, keeping its time.
    fn update_date(&self, id: BookingId, date: NaiveDate) -> BoxFuture<'_, (), StoreError>;

    /// Move a booking to another time on its current date.
    fn update_time(&self, id: BookingId, time: NaiveTime) -> BoxFuture<'_, (), StoreError>;

    /// Remove a booking. Returns whether a row was actually deleted.
    fn delete(&self, id: BookingId) -> BoxFuture<'_, bool, StoreError>;

    /// All bookings, ordered by id. Used for hold restoration at startup
    /// and the admin listing.
    fn list(&self) -> BoxFuture<'_, Vec<Booking>, StoreError>;
}

/// Lookup and registration of users.
pub trait UserStore: Send + Sync {
    /// Find a user by the exact (name, email, phone_number) triple.
    fn lookup(
        &self,
        name: &str,
        email: &str,
        phone_number: &str,
    ) -> BoxFuture<'_, Option<UserId>, StoreError>;

    /// Register a new user and return the id the store assigned.
    fn create(&self, user: NewUser) -> BoxFuture<'_, UserId, StoreError>;

    /// Fetch a user by id.
    fn get(&self, id: UserId) -> BoxFuture<'_, Option<User>, StoreError>;
}
