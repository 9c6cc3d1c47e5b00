// --- File: crates/bookify_core/src/inventory.rs ---
//! The slot inventory: the authoritative availability map for a fixed,
//! pre-seeded horizon of bookable dates and times.
//!
//! The horizon is loaded once from configuration; the engine claims and
//! releases slots against it. Slots outside the horizon can never be
//! claimed, and releasing an already free slot is a no-op so that
//! compensating rollbacks stay simple.

use crate::models::{DATE_FORMAT, TIME_FORMAT};
use bookify_config::HorizonConfig;
use chrono::{NaiveDate, NaiveTime};
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors from claiming or releasing a single slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SlotError {
    /// The slot is already held, or it is not part of the horizon at all.
    /// Callers cannot book either way, so the two cases share a variant.
    #[error("slot on {date} at {time} is not available")]
    Unavailable { date: NaiveDate, time: NaiveTime },
    /// Release was asked for a slot the horizon does not contain.
    #[error("no slot on {date} at {time} in the booking horizon")]
    UnknownSlot { date: NaiveDate, time: NaiveTime },
}

/// Errors building the inventory from the configured horizon table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HorizonError {
    #[error("invalid horizon date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("invalid horizon time '{time}' on {date}: expected HH:MM")]
    InvalidTime { date: NaiveDate, time: String },
}

/// Per-date, per-time availability over the configured horizon.
///
/// `true` means the slot is free. Ordered maps keep every listing
/// (available dates, available times) naturally sorted.
#[derive(Debug, Clone, Default)]
pub struct SlotInventory {
    slots: BTreeMap<NaiveDate, BTreeMap<NaiveTime, bool>>,
}

impl SlotInventory {
    /// Builds an inventory with every configured slot free.
    ///
    /// Dates repeated across entries are merged; repeated times collapse.
    ///
    /// # Errors
    ///
    /// Returns a [`HorizonError`] when a date or time string in the
    /// configuration does not parse. A misconfigured horizon is a startup
    /// failure, not something to paper over at runtime.
    pub fn from_config(horizon: &HorizonConfig) -> Result<Self, HorizonError> {
        let mut slots: BTreeMap<NaiveDate, BTreeMap<NaiveTime, bool>> = BTreeMap::new();
        for day in &horizon.days {
            let date = NaiveDate::parse_from_str(&day.date, DATE_FORMAT)
                .map_err(|_| HorizonError::InvalidDate(day.date.clone()))?;
            let times = slots.entry(date).or_default();
            for raw in &day.times {
                let time = NaiveTime::parse_from_str(raw, TIME_FORMAT).map_err(|_| {
                    HorizonError::InvalidTime {
                        date,
                        time: raw.clone(),
                    }
                })?;
                times.entry(time).or_insert(true);
            }
        }
        Ok(Self { slots })
    }

    /// Whether the slot exists in the horizon and is currently free.
    pub fn is_available(&self, date: NaiveDate, time: NaiveTime) -> bool {
        self.slots
            .get(&date)
            .and_then(|times| times.get(&time))
            .copied()
            .unwrap_or(false)
    }

    /// Whether the horizon contains this (date, time) at all, free or held.
    pub fn has_slot(&self, date: NaiveDate, time: NaiveTime) -> bool {
        self.slots
            .get(&date)
            .is_some_and(|times| times.contains_key(&time))
    }

    /// Marks a free slot as held.
    ///
    /// # Errors
    ///
    /// [`SlotError::Unavailable`] when the slot is already held or does not
    /// exist in the horizon.
    pub fn claim(&mut self, date: NaiveDate, time: NaiveTime) -> Result<(), SlotError> {
        match self.slots.get_mut(&date).and_then(|times| times.get_mut(&time)) {
            Some(available) if *available => {
                *available = false;
                Ok(())
            }
            _ => Err(SlotError::Unavailable { date, time }),
        }
    }

    /// Marks a held slot as free again. Releasing a slot that is already
    /// free succeeds, so rollbacks can release unconditionally.
    ///
    /// # Errors
    ///
    /// [`SlotError::UnknownSlot`] when the horizon has no such slot.
    pub fn release(&mut self, date: NaiveDate, time: NaiveTime) -> Result<(), SlotError> {
        match self.slots.get_mut(&date).and_then(|times| times.get_mut(&time)) {
            Some(available) => {
                *available = true;
                Ok(())
            }
            None => Err(SlotError::UnknownSlot { date, time }),
        }
    }

    /// Dates with at least one free slot, in ascending order.
    pub fn available_dates(&self) -> Vec<NaiveDate> {
        self.slots
            .iter()
            .filter(|(_, times)| times.values().any(|available| *available))
            .map(|(date, _)| *date)
            .collect()
    }

    /// Free times for a date, in ascending order. Unknown or fully booked
    /// dates yield an empty list, never an error.
    pub fn available_times(&self, date: NaiveDate) -> Vec<NaiveTime> {
        self.slots
            .get(&date)
            .map(|times| {
                times
                    .iter()
                    .filter(|(_, available)| **available)
                    .map(|(time, _)| *time)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Total number of slots in the horizon, held or free.
    pub fn slot_count(&self) -> usize {
        self.slots.values().map(BTreeMap::len).sum()
    }
}
