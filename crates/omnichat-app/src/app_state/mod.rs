//! Top-level application state.
//!
//! Implements `winit::application::ApplicationHandler` to drive the main
//! event loop. Owns the window, the `wry` host driver, and one embedding
//! controller per visible model slot.

mod core;
mod event_handler;
mod init;
mod polling;
mod shutdown;
mod slots;
mod title;
mod types;

pub use core::OmniChatApp;
pub use types::AppEvent;
