// --- File: crates/bookify_core/src/engine.rs ---
//! The booking engine: the one place where slot availability and persisted
//! bookings are changed together.
//!
//! Every compound operation (create, confirm, cancel, reschedule) runs under
//! a single engine-wide critical section so that the joint invariant holds
//! at all times: a slot is unavailable exactly when a pending or confirmed
//! booking records it. A booking between a date change and the following
//! time selection is the one tolerated exception; it records its new date
//! while holding no slot yet, and every release site checks recorded pairs
//! so that it can never free a slot belonging to another booking. If a
//! store call fails midway, the already-applied inventory change is rolled
//! back before the error is returned.

use crate::inventory::{SlotError, SlotInventory};
use crate::models::{Booking, BookingDraft, BookingId, BookingStatus, TIME_FORMAT, UserId};
use crate::store::{BookingStore, BoxFuture, StoreError, UserStore};
use bookify_common::models::NewUser;
use chrono::{NaiveDate, NaiveTime};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Errors that can occur when operating on bookings.
#[derive(Debug, Error)]
pub enum BookingError {
    /// The requested slot is already held or not part of the horizon.
    #[error("slot on {date} at {time} is not available")]
    SlotUnavailable { date: NaiveDate, time: NaiveTime },
    /// The requested date has no free slot at all.
    #[error("no available time slots on {date}")]
    NoSlotsForDate { date: NaiveDate },
    /// No booking exists under this id.
    #[error("booking {0} not found")]
    BookingNotFound(BookingId),
    /// Only pending bookings can be confirmed.
    #[error("booking {0} cannot be confirmed")]
    NotConfirmable(BookingId),
    /// Only confirmed bookings can be cancelled.
    #[error("booking {0} cannot be cancelled")]
    NotCancellable(BookingId),
    /// The caller's date/time did not match the stored booking.
    #[error("booking {id} is held for {date} at {time}")]
    DetailsMismatch {
        id: BookingId,
        date: NaiveDate,
        time: NaiveTime,
    },
    /// No user matches the given details.
    #[error("user not found")]
    UserNotFound,
    /// The booking store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The booking store did not answer within the configured bound.
    #[error("booking store did not answer within {0:?}")]
    StoreTimeout(Duration),
}

impl From<SlotError> for BookingError {
    fn from(err: SlotError) -> Self {
        match err {
            SlotError::Unavailable { date, time } | SlotError::UnknownSlot { date, time } => {
                BookingError::SlotUnavailable { date, time }
            }
        }
    }
}

/// Orchestrates the slot inventory and the booking store.
///
/// The inventory lives behind an async mutex; holding it for the whole of a
/// compound operation is the mutual exclusion that makes two concurrent
/// creations of the same slot impossible. Store calls made while the lock
/// is held are bounded by `store_timeout` so a stuck backend cannot starve
/// every other session.
pub struct BookingEngine {
    inventory: Mutex<SlotInventory>,
    bookings: Arc<dyn BookingStore>,
    users: Arc<dyn UserStore>,
    store_timeout: Duration,
}

impl BookingEngine {
    /// Create an engine over the given inventory and stores.
    pub fn new(
        inventory: SlotInventory,
        bookings: Arc<dyn BookingStore>,
        users: Arc<dyn UserStore>,
        store_timeout: Duration,
    ) -> Self {
        Self {
            inventory: Mutex::new(inventory),
            bookings,
            users,
            store_timeout,
        }
    }

    /// Runs a store future under the configured timeout.
    async fn store_call<'a, T>(
        &self,
        fut: BoxFuture<'a, T, StoreError>,
    ) -> Result<T, BookingError> {
        match timeout(self.store_timeout, fut).await {
            Ok(result) => result.map_err(BookingError::from),
            Err(_) => Err(BookingError::StoreTimeout(self.store_timeout)),
        }
    }

    /// Creates a pending booking for a free slot.
    ///
    /// The slot is claimed first; if persisting the booking then fails, the
    /// claim is released again before the error is returned, so a failed
    /// creation leaves no orphaned hold.
    ///
    /// # Errors
    ///
    /// * [`BookingError::SlotUnavailable`] when the slot is held or unknown.
    /// * [`BookingError::Store`] / [`BookingError::StoreTimeout`] when the
    ///   booking store fails; the slot is free again in that case.
    pub async fn create_booking(
        &self,
        date: NaiveDate,
        time: NaiveTime,
        user_id: UserId,
    ) -> Result<BookingId, BookingError> {
        let mut inventory = self.inventory.lock().await;
        inventory.claim(date, time)?;

        let draft = BookingDraft::pending(user_id, date, time);
        match self.store_call(self.bookings.insert(draft)).await {
            Ok(booking_id) => {
                info!(
                    booking_id,
                    user_id,
                    %date,
                    time = %time.format(TIME_FORMAT),
                    "booking created"
                );
                Ok(booking_id)
            }
            Err(err) => {
                // The failed insert must not keep the slot held.
                if let Err(release_err) = inventory.release(date, time) {
                    warn!("could not roll back claim after failed insert: {release_err}");
                }
                Err(err)
            }
        }
    }

    /// Confirms a pending booking.
    ///
    /// The caller supplies the date and time it believes it is confirming;
    /// they must match the stored record. The slot itself stays held, it was
    /// claimed at creation.
    ///
    /// # Errors
    ///
    /// * [`BookingError::BookingNotFound`] when no booking has this id.
    /// * [`BookingError::NotConfirmable`] when the booking is not pending.
    /// * [`BookingError::DetailsMismatch`] when date or time differ from the
    ///   stored record; nothing is changed in that case.
    pub async fn confirm_booking(
        &self,
        id: BookingId,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Result<(), BookingError> {
        let _inventory = self.inventory.lock().await;
        let booking = self
            .store_call(self.bookings.get(id))
            .await?
            .ok_or(BookingError::BookingNotFound(id))?;

        if booking.status != BookingStatus::Pending {
            return Err(BookingError::NotConfirmable(id));
        }
        if booking.date != date || booking.time != time {
            return Err(BookingError::DetailsMismatch {
                id,
                date: booking.date,
                time: booking.time,
            });
        }

        self.store_call(self.bookings.update_status(id, BookingStatus::Confirmed))
            .await?;
        info!(booking_id = id, "booking confirmed");
        Ok(())
    }

    /// Cancels a confirmed booking, freeing its slot and removing the record.
    ///
    /// Pending bookings are deliberately not cancellable; they either get
    /// confirmed or stay as holds until handled out of band.
    ///
    /// The slot is freed only if no other active booking records the same
    /// (date, time): a booking amid a date change may point at this pair
    /// without holding it, and the hold then stays for that booking.
    ///
    /// # Errors
    ///
    /// * [`BookingError::BookingNotFound`] when no booking has this id.
    /// * [`BookingError::NotCancellable`] when the booking is not confirmed.
    /// * [`BookingError::Store`] / [`BookingError::StoreTimeout`] when the
    ///   delete fails; the slot is claimed again so inventory and store stay
    ///   in agreement.
    pub async fn cancel_booking(&self, id: BookingId) -> Result<(), BookingError> {
        let mut inventory = self.inventory.lock().await;
        let bookings = self.store_call(self.bookings.list()).await?;
        let booking = bookings
            .iter()
            .find(|b| b.booking_id == id)
            .cloned()
            .ok_or(BookingError::BookingNotFound(id))?;

        if booking.status != BookingStatus::Confirmed {
            return Err(BookingError::NotCancellable(id));
        }

        let released = if pair_recorded_by_other(&bookings, id, booking.date, booking.time) {
            debug!(
                booking_id = id,
                "slot stays held, another booking records the same pair"
            );
            false
        } else {
            match inventory.release(booking.date, booking.time) {
                Ok(()) => true,
                Err(SlotError::UnknownSlot { .. }) => {
                    // The booking points outside the configured horizon; there
                    // is no hold to free, but the record itself still goes.
                    warn!(
                        booking_id = id,
                        %booking.date,
                        "cancelling a booking outside the horizon"
                    );
                    false
                }
                Err(err) => return Err(err.into()),
            }
        };

        if let Err(err) = self.store_call(self.bookings.delete(id)).await {
            // Put the hold back; a timed-out delete may still have landed,
            // which hold restoration reconciles at the next startup.
            if released {
                if let Err(claim_err) = inventory.claim(booking.date, booking.time) {
                    warn!("could not roll back release after failed delete: {claim_err}");
                }
            }
            return Err(err);
        }

        info!(booking_id = id, "booking cancelled");
        Ok(())
    }

    /// Moves a booking to another date, returning the free times there.
    ///
    /// Only the date is changed; the old slot is released and the caller is
    /// expected to pick one of the returned times next. Until then the
    /// booking holds no slot, which the conversation flow closes immediately
    /// with a time selection. The returned times are computed before the old
    /// slot is released, and the release is skipped when another active
    /// booking records the same pair.
    ///
    /// # Errors
    ///
    /// * [`BookingError::BookingNotFound`] when no booking has this id.
    /// * [`BookingError::NoSlotsForDate`] when the new date has no free slot;
    ///   the booking is left untouched.
    pub async fn change_booking_date(
        &self,
        id: BookingId,
        new_date: NaiveDate,
    ) -> Result<Vec<NaiveTime>, BookingError> {
        let mut inventory = self.inventory.lock().await;
        let bookings = self.store_call(self.bookings.list()).await?;
        let booking = bookings
            .iter()
            .find(|b| b.booking_id == id)
            .cloned()
            .ok_or(BookingError::BookingNotFound(id))?;

        let available_times = inventory.available_times(new_date);
        if available_times.is_empty() {
            return Err(BookingError::NoSlotsForDate { date: new_date });
        }

        self.store_call(self.bookings.update_date(id, new_date))
            .await?;

        if pair_recorded_by_other(&bookings, id, booking.date, booking.time) {
            debug!(
                booking_id = id,
                "old slot stays held, another booking records the same pair"
            );
        } else {
            match inventory.release(booking.date, booking.time) {
                Ok(()) => {}
                Err(SlotError::UnknownSlot { .. }) => {
                    warn!(
                        booking_id = id,
                        %booking.date,
                        "old slot of rescheduled booking was outside the horizon"
                    );
                }
                Err(err) => return Err(err.into()),
            }
        }

        info!(booking_id = id, %new_date, "booking date changed");
        Ok(available_times)
    }

    /// Moves a booking to another time on its current date.
    ///
    /// The new slot is claimed before the store is touched; if the update
    /// fails the new claim is released again, so the operation either fully
    /// succeeds or changes nothing. The old slot is released only after the
    /// store update went through, and only if this booking actually held it:
    /// after a date change the recorded pair may be free or belong to
    /// another booking, and in both cases there is nothing to give back.
    ///
    /// # Errors
    ///
    /// * [`BookingError::BookingNotFound`] when no booking has this id.
    /// * [`BookingError::SlotUnavailable`] when the new time is not free on
    ///   the booking's date (asking for the currently held time included).
    pub async fn change_booking_time(
        &self,
        id: BookingId,
        new_time: NaiveTime,
    ) -> Result<(), BookingError> {
        let mut inventory = self.inventory.lock().await;
        let bookings = self.store_call(self.bookings.list()).await?;
        let booking = bookings
            .iter()
            .find(|b| b.booking_id == id)
            .cloned()
            .ok_or(BookingError::BookingNotFound(id))?;

        inventory.claim(booking.date, new_time)?;

        if let Err(err) = self.store_call(self.bookings.update_time(id, new_time)).await {
            if let Err(release_err) = inventory.release(booking.date, new_time) {
                warn!("could not roll back claim after failed update: {release_err}");
            }
            return Err(err);
        }

        // new_time == booking.time only happens for a booking amid a date
        // change; the claim above took a free slot, not the old hold.
        if new_time != booking.time
            && !pair_recorded_by_other(&bookings, id, booking.date, booking.time)
        {
            match inventory.release(booking.date, booking.time) {
                Ok(()) => {}
                Err(SlotError::UnknownSlot { .. }) => {
                    warn!(
                        booking_id = id,
                        "old time of rescheduled booking was outside the horizon"
                    );
                }
                Err(err) => return Err(err.into()),
            }
        }

        info!(
            booking_id = id,
            new_time = %new_time.format(TIME_FORMAT),
            "booking time changed"
        );
        Ok(())
    }

    /// Dates with at least one free slot.
    pub async fn available_dates(&self) -> Vec<NaiveDate> {
        self.inventory.lock().await.available_dates()
    }

    /// Free times for a date; empty for unknown or exhausted dates.
    pub async fn available_times(&self, date: NaiveDate) -> Vec<NaiveTime> {
        self.inventory.lock().await.available_times(date)
    }

    /// Whether a slot is currently free.
    pub async fn is_available(&self, date: NaiveDate, time: NaiveTime) -> bool {
        self.inventory.lock().await.is_available(date, time)
    }

    /// Resolves a user by the exact details given at registration.
    ///
    /// # Errors
    ///
    /// [`BookingError::UserNotFound`] when no user matches.
    pub async fn lookup_user(
        &self,
        name: &str,
        email: &str,
        phone_number: &str,
    ) -> Result<UserId, BookingError> {
        self.store_call(self.users.lookup(name, email, phone_number))
            .await?
            .ok_or(BookingError::UserNotFound)
    }

    /// Finds the user with these details or registers a new one.
    ///
    /// Returns the user id and whether it was newly created. Field
    /// validation happens at the call site; the engine trusts its input.
    pub async fn register_user(&self, user: NewUser) -> Result<(UserId, bool), BookingError> {
        if let Some(user_id) = self
            .store_call(self.users.lookup(&user.name, &user.email, &user.phone_number))
            .await?
        {
            debug!(user_id, "registration matched an existing user");
            return Ok((user_id, false));
        }
        let user_id = self.store_call(self.users.create(user)).await?;
        info!(user_id, "user registered");
        Ok((user_id, true))
    }

    /// All persisted bookings, ordered by id.
    pub async fn bookings(&self) -> Result<Vec<Booking>, BookingError> {
        self.store_call(self.bookings.list()).await
    }

    /// Re-claims the slot of every active persisted booking.
    ///
    /// Called once at startup so the inventory reflects bookings that
    /// survived a restart. Bookings pointing outside the configured horizon
    /// and colliding holds are logged and skipped rather than failing the
    /// whole restore; they indicate a horizon change or corrupted data that
    /// an operator has to look at either way.
    pub async fn restore_holds(&self) -> Result<usize, BookingError> {
        let mut inventory = self.inventory.lock().await;
        let bookings = self.store_call(self.bookings.list()).await?;

        let mut restored = 0;
        for booking in bookings {
            if !booking.status.is_active() {
                continue;
            }
            if !inventory.has_slot(booking.date, booking.time) {
                warn!(
                    booking_id = booking.booking_id,
                    %booking.date,
                    time = %booking.time.format(TIME_FORMAT),
                    "active booking holds a slot outside the configured horizon"
                );
                continue;
            }
            match inventory.claim(booking.date, booking.time) {
                Ok(()) => restored += 1,
                Err(_) => warn!(
                    booking_id = booking.booking_id,
                    %booking.date,
                    time = %booking.time.format(TIME_FORMAT),
                    "two active bookings hold the same slot"
                ),
            }
        }
        Ok(restored)
    }
}

/// Whether an active booking other than `id` records this (date, time).
///
/// A booking amid a date change records a pair it does not hold; when that
/// pair belongs to another booking, releasing it would free the other
/// booking's slot. Release sites check here first.
fn pair_recorded_by_other(
    bookings: &[Booking],
    id: BookingId,
    date: NaiveDate,
    time: NaiveTime,
) -> bool {
    bookings.iter().any(|b| {
        b.booking_id != id && b.status.is_active() && b.date == date && b.time == time
    })
}
