// --- File: crates/bookify_tools/src/models.rs ---
//! Wire types for the tool-call surface.
//!
//! A reasoning service drives the booking engine through named tool calls.
//! `ToolCall` is the closed set of tools: unknown names or malformed
//! argument shapes fail deserialization before any booking logic runs.
//! `ToolReply` is the uniform envelope every call answers with.

use bookify_core::models::{hhmm, BookingId, UserId, DATE_FORMAT, TIME_FORMAT};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// A single tool invocation, tagged by tool name.
///
/// The wire shape is `{"name": "...", "input": {...}}`, matching the tool
/// descriptors in [`crate::schema::tool_definitions`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", content = "input", rename_all = "snake_case")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum ToolCall {
    /// List the dates that still have free slots.
    SelectAppointmentDate {},
    /// List the free time slots of one date.
    SelectTimeSlot { date: NaiveDate },
    /// Create a pending booking for the session's user.
    CreateBooking {
        date: NaiveDate,
        #[serde(with = "hhmm")]
        #[cfg_attr(feature = "openapi", schema(value_type = String, example = "09:00"))]
        time: NaiveTime,
    },
    /// Confirm a pending booking, restating its date and time.
    ConfirmBooking {
        booking_id: BookingId,
        date: NaiveDate,
        #[serde(with = "hhmm")]
        #[cfg_attr(feature = "openapi", schema(value_type = String, example = "09:00"))]
        time: NaiveTime,
    },
    /// Cancel a confirmed booking.
    CancelBooking { booking_id: BookingId },
    /// Resolve a user id from registration details.
    LookupUser {
        name: String,
        email: String,
        phone_number: String,
    },
    /// Move a booking to another date.
    ChangeBookingDate {
        booking_id: BookingId,
        new_date: NaiveDate,
    },
    /// Move a booking to another time on its date.
    ChangeBookingTime {
        booking_id: BookingId,
        #[serde(with = "hhmm")]
        #[cfg_attr(feature = "openapi", schema(value_type = String, example = "10:00"))]
        new_time: NaiveTime,
    },
}

impl ToolCall {
    /// The wire name of this tool.
    pub fn name(&self) -> &'static str {
        match self {
            ToolCall::SelectAppointmentDate {} => "select_appointment_date",
            ToolCall::SelectTimeSlot { .. } => "select_time_slot",
            ToolCall::CreateBooking { .. } => "create_booking",
            ToolCall::ConfirmBooking { .. } => "confirm_booking",
            ToolCall::CancelBooking { .. } => "cancel_booking",
            ToolCall::LookupUser { .. } => "lookup_user",
            ToolCall::ChangeBookingDate { .. } => "change_booking_date",
            ToolCall::ChangeBookingTime { .. } => "change_booking_time",
        }
    }
}

/// Outcome marker of a tool reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum ToolStatus {
    Success,
    Error,
}

/// The uniform reply envelope for every tool call.
///
/// `status` and `message` are always present; the remaining fields appear
/// only when the tool has something to put there. Dates render as
/// `YYYY-MM-DD` and times as `HH:MM`, the same shapes the calls accept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ToolReply {
    pub status: ToolStatus,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_id: Option<BookingId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_dates: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_time_slots: Option<Vec<String>>,
}

impl ToolReply {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: ToolStatus::Success,
            message: message.into(),
            booking_id: None,
            user_id: None,
            available_dates: None,
            available_time_slots: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ToolStatus::Error,
            message: message.into(),
            booking_id: None,
            user_id: None,
            available_dates: None,
            available_time_slots: None,
        }
    }

    pub fn with_booking_id(mut self, booking_id: BookingId) -> Self {
        self.booking_id = Some(booking_id);
        self
    }

    pub fn with_user_id(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn with_available_dates(mut self, dates: &[NaiveDate]) -> Self {
        self.available_dates = Some(
            dates
                .iter()
                .map(|date| date.format(DATE_FORMAT).to_string())
                .collect(),
        );
        self
    }

    pub fn with_available_time_slots(mut self, times: &[NaiveTime]) -> Self {
        self.available_time_slots = Some(
            times
                .iter()
                .map(|time| time.format(TIME_FORMAT).to_string())
                .collect(),
        );
        self
    }

    pub fn is_success(&self) -> bool {
        self.status == ToolStatus::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> Result<ToolCall, serde_json::Error> {
        serde_json::from_value(value)
    }

    #[test]
    fn tool_calls_parse_under_their_wire_names() {
        let call = parse(json!({"name": "select_appointment_date", "input": {}})).unwrap();
        assert_eq!(call, ToolCall::SelectAppointmentDate {});

        let call = parse(json!({
            "name": "create_booking",
            "input": {"date": "2024-08-30", "time": "09:00"}
        }))
        .unwrap();
        match call {
            ToolCall::CreateBooking { date, time } => {
                assert_eq!(date.to_string(), "2024-08-30");
                assert_eq!(time.format(TIME_FORMAT).to_string(), "09:00");
            }
            other => panic!("wrong variant: {other:?}"),
        }

        let call = parse(json!({
            "name": "confirm_booking",
            "input": {"booking_id": 1, "date": "2024-08-30", "time": "09:00"}
        }))
        .unwrap();
        assert_eq!(call.name(), "confirm_booking");

        let call = parse(json!({
            "name": "change_booking_date",
            "input": {"booking_id": 2, "new_date": "2024-08-31"}
        }))
        .unwrap();
        assert_eq!(call.name(), "change_booking_date");
    }

    #[test]
    fn unknown_tool_names_are_rejected() {
        assert!(parse(json!({"name": "delete_everything", "input": {}})).is_err());
    }

    #[test]
    fn malformed_arguments_are_rejected() {
        // Wrong time shape
        assert!(parse(json!({
            "name": "create_booking",
            "input": {"date": "2024-08-30", "time": "9 o'clock"}
        }))
        .is_err());

        // Missing required field
        assert!(parse(json!({
            "name": "cancel_booking",
            "input": {}
        }))
        .is_err());

        // booking_id must be a number
        assert!(parse(json!({
            "name": "cancel_booking",
            "input": {"booking_id": "one"}
        }))
        .is_err());
    }

    #[test]
    fn reply_serialization_omits_empty_fields() {
        let reply = ToolReply::success("Booking cancelled");
        let value = serde_json::to_value(&reply).unwrap();
        assert_eq!(
            value,
            json!({"status": "success", "message": "Booking cancelled"})
        );

        let reply = ToolReply::error("Slot not available");
        let value = serde_json::to_value(&reply).unwrap();
        assert_eq!(value["status"], "error");
        assert!(value.get("booking_id").is_none());
    }

    #[test]
    fn reply_builders_fill_the_extra_fields() {
        let date = NaiveDate::parse_from_str("2024-08-30", DATE_FORMAT).unwrap();
        let time = NaiveTime::parse_from_str("09:00", TIME_FORMAT).unwrap();

        let reply = ToolReply::success("ok")
            .with_booking_id(5)
            .with_available_dates(&[date])
            .with_available_time_slots(&[time]);

        let value = serde_json::to_value(&reply).unwrap();
        assert_eq!(value["booking_id"], 5);
        assert_eq!(value["available_dates"], json!(["2024-08-30"]));
        assert_eq!(value["available_time_slots"], json!(["09:00"]));
    }
}
