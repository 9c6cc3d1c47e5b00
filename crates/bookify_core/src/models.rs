// --- File: crates/bookify_core/src/models.rs ---
//! Core data model: bookings, their status machine and the wire formats
//! for dates and times.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Identifier of a booking, assigned by the booking store on insert.
pub type BookingId = i64;

/// Identifier of a registered user.
pub type UserId = i64;

/// Wire/storage format for dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Wire/storage format for time-of-day slots.
pub const TIME_FORMAT: &str = "%H:%M";

/// Lifecycle status of a booking.
///
/// A booking is created `Pending`, becomes `Confirmed` via confirmation and
/// is removed from the store on cancellation; `Cancelled` exists for rows
/// written by earlier deployments and for wire compatibility.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    /// The storage string for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    /// Whether a booking in this status holds its slot.
    pub fn is_active(&self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Confirmed)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a stored status string is not one of the known values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown booking status: {0}")]
pub struct ParseStatusError(pub String);

impl FromStr for BookingStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

/// A persisted booking record.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub booking_id: BookingId,
    pub user_id: UserId,
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "2024-08-30"))]
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "09:00"))]
    pub time: NaiveTime,
    pub status: BookingStatus,
}

/// Insert payload for a booking; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingDraft {
    pub user_id: UserId,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub status: BookingStatus,
}

impl BookingDraft {
    /// A fresh pending booking for the given slot.
    pub fn pending(user_id: UserId, date: NaiveDate, time: NaiveTime) -> Self {
        Self {
            user_id,
            date,
            time,
            status: BookingStatus::Pending,
        }
    }
}

/// Serde helper serializing a `NaiveTime` as "HH:MM".
///
/// The default chrono serde form carries seconds, which the tool surface
/// and the storage layer never do.
pub mod hhmm {
    use super::TIME_FORMAT;
    use chrono::NaiveTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format(TIME_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, TIME_FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn status_round_trips_through_storage_strings() {
        for status in [
            BookingStatus::Pending,
            BookingStatus::Confirmed,
            BookingStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<BookingStatus>().unwrap(), status);
        }
        assert!("held".parse::<BookingStatus>().is_err());
    }

    #[test]
    fn cancelled_is_not_active() {
        assert!(BookingStatus::Pending.is_active());
        assert!(BookingStatus::Confirmed.is_active());
        assert!(!BookingStatus::Cancelled.is_active());
    }

    #[test]
    fn booking_serializes_with_short_time_form() {
        let booking = Booking {
            booking_id: 1,
            user_id: 7,
            date: NaiveDate::from_ymd_opt(2024, 8, 30).unwrap(),
            time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            status: BookingStatus::Pending,
        };
        let json = serde_json::to_value(&booking).unwrap();
        assert_eq!(json["date"], "2024-08-30");
        assert_eq!(json["time"], "09:00");
        assert_eq!(json["status"], "pending");

        let back: Booking = serde_json::from_value(json).unwrap();
        assert_eq!(back, booking);
    }
}
