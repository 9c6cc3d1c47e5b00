// --- File: crates/bookify_db/src/memory.rs ---
//! In-memory implementations of the booking and user stores
//!
//! These back the default deployment where no `[database]` section is
//! configured: all state lives in the process and is gone on restart. The
//! maps sit behind plain mutexes and no lock is held across an await; a
//! poisoned lock surfaces as a store error rather than a panic.

use bookify_common::models::{NewUser, User};
use bookify_core::models::{Booking, BookingDraft, BookingId, BookingStatus, UserId};
use bookify_core::store::{BookingStore, BoxFuture, StoreError, UserStore};
use chrono::{NaiveDate, NaiveTime};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

fn poisoned<T>(_: PoisonError<T>) -> StoreError {
    StoreError::message("in-memory store lock poisoned")
}

/// In-memory booking store
#[derive(Debug)]
pub struct MemoryBookingStore {
    bookings: Mutex<BTreeMap<BookingId, Booking>>,
    next_id: AtomicI64,
}

impl MemoryBookingStore {
    pub fn new() -> Self {
        Self {
            bookings: Mutex::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    fn guard(&self) -> Result<MutexGuard<'_, BTreeMap<BookingId, Booking>>, StoreError> {
        self.bookings.lock().map_err(poisoned)
    }
}

impl Default for MemoryBookingStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingStore for MemoryBookingStore {
    fn insert(&self, draft: BookingDraft) -> BoxFuture<'_, BookingId, StoreError> {
        Box::pin(async move {
            let id = self.next_id.fetch_add(1, Ordering::SeqCst);
            self.guard()?.insert(
                id,
                Booking {
                    booking_id: id,
                    user_id: draft.user_id,
                    date: draft.date,
                    time: draft.time,
                    status: draft.status,
                },
            );
            Ok(id)
        })
    }

    fn get(&self, id: BookingId) -> BoxFuture<'_, Option<Booking>, StoreError> {
        Box::pin(async move { Ok(self.guard()?.get(&id).cloned()) })
    }

    fn update_status(
        &self,
        id: BookingId,
        status: BookingStatus,
    ) -> BoxFuture<'_, (), StoreError> {
        Box::pin(async move {
            if let Some(booking) = self.guard()?.get_mut(&id) {
                booking.status = status;
            }
            Ok(())
        })
    }

    fn update_date(&self, id: BookingId, date: NaiveDate) -> BoxFuture<'_, (), StoreError> {
        Box::pin(async move {
            if let Some(booking) = self.guard()?.get_mut(&id) {
                booking.date = date;
            }
            Ok(())
        })
    }

    fn update_time(&self, id: BookingId, time: NaiveTime) -> BoxFuture<'_, (), StoreError> {
        Box::pin(async move {
            if let Some(booking) = self.guard()?.get_mut(&id) {
                booking.time = time;
            }
            Ok(())
        })
    }

    fn delete(&self, id: BookingId) -> BoxFuture<'_, bool, StoreError> {
        Box::pin(async move { Ok(self.guard()?.remove(&id).is_some()) })
    }

    fn list(&self) -> BoxFuture<'_, Vec<Booking>, StoreError> {
        Box::pin(async move { Ok(self.guard()?.values().cloned().collect()) })
    }
}

/// In-memory user store
#[derive(Debug)]
pub struct MemoryUserStore {
    users: Mutex<BTreeMap<UserId, User>>,
    next_id: AtomicI64,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    fn guard(&self) -> Result<MutexGuard<'_, BTreeMap<UserId, User>>, StoreError> {
        self.users.lock().map_err(poisoned)
    }
}

impl Default for MemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UserStore for MemoryUserStore {
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
            Ok(self
                .guard()?
                .values()
                .find(|user| {
                    user.name == name && user.email == email && user.phone_number == phone_number
                })
                .map(|user| user.user_id))
        })
    }

    fn create(&self, user: NewUser) -> BoxFuture<'_, UserId, StoreError> {
        Box::pin(async move {
            let id = self.next_id.fetch_add(1, Ordering::SeqCst);
            self.guard()?.insert(
                id,
                User {
                    user_id: id,
                    name: user.name,
                    email: user.email,
                    phone_number: user.phone_number,
                    age: user.age,
                },
            );
            Ok(id)
        })
    }

    fn get(&self, id: UserId) -> BoxFuture<'_, Option<User>, StoreError> {
        Box::pin(async move { Ok(self.guard()?.get(&id).cloned()) })
    }
}
