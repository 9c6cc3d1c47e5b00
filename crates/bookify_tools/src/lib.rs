// --- File: crates/bookify_tools/src/lib.rs ---
//! Tool-call surface for the Bookify reasoning loop.
//!
//! An external reasoning service books appointments by invoking named
//! tools. This crate owns that boundary: the typed [`ToolCall`] set, the
//! [`ToolReply`] envelope, the descriptors the service discovers the tools
//! from, and the [`ToolDispatcher`] that runs calls against the engine.

pub mod dispatcher;
pub mod models;
pub mod schema;

pub use dispatcher::ToolDispatcher;
pub use models::{ToolCall, ToolReply, ToolStatus};
