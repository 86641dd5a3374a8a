//! Persisted chat history for the direct API chat.
//!
//! Sessions are kept newest first and written to a single JSON file after
//! every change. One session at a time is "current".

mod store;
mod types;

pub use store::ChatHistory;
pub use types::{ChatSession, DEFAULT_TITLE, TITLE_MAX_CHARS};
