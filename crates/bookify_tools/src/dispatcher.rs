// --- File: crates/bookify_tools/src/dispatcher.rs ---
//! Executes tool calls against the booking engine.
//!
//! The dispatcher is infallible from the caller's point of view: every
//! outcome, including store faults, is folded into a [`ToolReply`] so the
//! reasoning loop can read errors as data and steer the conversation.

use crate::models::{ToolCall, ToolReply};
use bookify_core::models::{UserId, DATE_FORMAT, TIME_FORMAT};
use bookify_core::{BookingEngine, BookingError};
use std::sync::Arc;
use tracing::error;

/// Dispatches typed tool calls to the booking engine.
#[derive(Clone)]
pub struct ToolDispatcher {
    engine: Arc<BookingEngine>,
}

impl ToolDispatcher {
    pub fn new(engine: Arc<BookingEngine>) -> Self {
        Self { engine }
    }

    /// Run one tool call for the session's resolved user.
    ///
    /// `user_id` comes from the session, not the tool arguments; only
    /// `create_booking` consumes it.
    pub async fn dispatch(&self, call: ToolCall, user_id: UserId) -> ToolReply {
        let tool = call.name();
        match call {
            ToolCall::SelectAppointmentDate {} => {
                let dates = self.engine.available_dates().await;
                ToolReply::success("Available dates retrieved").with_available_dates(&dates)
            }

            ToolCall::SelectTimeSlot { date } => {
                let times = self.engine.available_times(date).await;
                if times.is_empty() {
                    ToolReply::error("No available slots for the selected date.")
                } else {
                    ToolReply::success("Available time slots retrieved")
                        .with_available_time_slots(&times)
                }
            }

            ToolCall::CreateBooking { date, time } => {
                match self.engine.create_booking(date, time, user_id).await {
                    Ok(booking_id) => ToolReply::success(format!(
                        "Booking created for {} at {}",
                        date.format(DATE_FORMAT),
                        time.format(TIME_FORMAT)
                    ))
                    .with_booking_id(booking_id),
                    Err(BookingError::SlotUnavailable { .. }) => {
                        ToolReply::error("Slot not available")
                    }
                    Err(err) => Self::service_failure(tool, &err),
                }
            }

            ToolCall::ConfirmBooking {
                booking_id,
                date,
                time,
            } => match self.engine.confirm_booking(booking_id, date, time).await {
                Ok(()) => ToolReply::success(format!(
                    "Booking confirmed for {} at {}",
                    date.format(DATE_FORMAT),
                    time.format(TIME_FORMAT)
                )),
                Err(BookingError::BookingNotFound(_) | BookingError::NotConfirmable(_)) => {
                    ToolReply::error("Booking cannot be confirmed or does not exist")
                }
                Err(BookingError::DetailsMismatch { date, time, .. }) => ToolReply::error(format!(
                    "Booking details do not match: the booking is for {} at {}",
                    date.format(DATE_FORMAT),
                    time.format(TIME_FORMAT)
                )),
                Err(err) => Self::service_failure(tool, &err),
            },

            ToolCall::CancelBooking { booking_id } => {
                match self.engine.cancel_booking(booking_id).await {
                    Ok(()) => ToolReply::success("Booking cancelled"),
                    Err(
                        BookingError::BookingNotFound(_) | BookingError::NotCancellable(_),
                    ) => ToolReply::error("Cannot cancel unconfirmed or non-existent booking"),
                    Err(err) => Self::service_failure(tool, &err),
                }
            }

            ToolCall::LookupUser {
                name,
                email,
                phone_number,
            } => match self.engine.lookup_user(&name, &email, &phone_number).await {
                Ok(found) => ToolReply::success("User found").with_user_id(found),
                Err(BookingError::UserNotFound) => ToolReply::error("User not found"),
                Err(err) => Self::service_failure(tool, &err),
            },

            ToolCall::ChangeBookingDate {
                booking_id,
                new_date,
            } => match self.engine.change_booking_date(booking_id, new_date).await {
                Ok(times) => ToolReply::success(format!(
                    "Booking date changed to {}",
                    new_date.format(DATE_FORMAT)
                ))
                .with_available_time_slots(&times),
                Err(BookingError::BookingNotFound(_)) => ToolReply::error("Booking not found"),
                Err(BookingError::NoSlotsForDate { .. }) => {
                    ToolReply::error("No available time slots for the selected date")
                }
                Err(err) => Self::service_failure(tool, &err),
            },

            ToolCall::ChangeBookingTime {
                booking_id,
                new_time,
            } => match self.engine.change_booking_time(booking_id, new_time).await {
                Ok(()) => ToolReply::success(format!(
                    "Booking time changed to {}",
                    new_time.format(TIME_FORMAT)
                )),
                Err(BookingError::BookingNotFound(_)) => ToolReply::error("Booking not found"),
                Err(BookingError::SlotUnavailable { .. }) => {
                    ToolReply::error("Selected time slot is not available")
                }
                Err(err) => Self::service_failure(tool, &err),
            },
        }
    }

    /// Folds an unexpected engine error into an error envelope.
    fn service_failure(tool: &str, err: &BookingError) -> ToolReply {
        error!(tool, error = %err, "tool call failed");
        ToolReply::error("The booking service is temporarily unavailable")
    }
}
