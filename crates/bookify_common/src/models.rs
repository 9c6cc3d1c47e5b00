// --- File: crates/bookify_common/src/models.rs ---
//! Shared data models used across the Bookify crates.

use serde::{Deserialize, Serialize};

/// A registered user, as stored in the user store.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: i64,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub age: i64,
}

/// Payload for registering a user; the store assigns the id.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub age: i64,
}
