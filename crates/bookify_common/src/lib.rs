// --- File: crates/bookify_common/src/lib.rs ---

// Declare modules within this crate
pub mod logging; // Logging utilities
pub mod models; // Shared data models
pub mod validation; // User field validation

// Re-export the most used items for easier access
pub use logging::{init, init_with_level};
pub use models::{NewUser, User};
pub use validation::{validate_new_user, ValidationError};
