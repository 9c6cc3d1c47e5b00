// --- File: crates/bookify_core/src/lib.rs ---
// Declare modules within this crate
pub mod engine;
#[cfg(test)]
mod engine_proptest;
pub mod inventory;
pub mod models;
pub mod store;

pub use engine::{BookingEngine, BookingError};
pub use inventory::{SlotError, SlotInventory};
pub use models::{Booking, BookingDraft, BookingId, BookingStatus, UserId};
pub use store::{BookingStore, BoxFuture, StoreError, UserStore};
