//! Embedding lifecycle manager for externally hosted chat surfaces.
//!
//! Provides:
//! - A registry of live surfaces that keeps at most one surface per model
//! - A per-slot controller that creates, retries, and tears down surfaces,
//!   discarding stale asynchronous completions by attempt token
//! - A position synchronizer that keeps a surface aligned with its placeholder
//! - Reconciliation of the registry against the active model set
//!
//! The native windowing runtime sits behind the [`SurfaceHost`] and
//! [`SurfaceHandle`] traits. With the `wry` feature, [`wry_host`] provides
//! a backend that drives `wry` child webviews from the UI thread.

pub mod controller;
pub mod creation_board;
pub mod errors;
pub mod events;
pub mod host;
pub mod label;
pub mod manager;
pub mod placeholder;
pub mod reconcile;
pub mod sync;

#[cfg(feature = "wry")]
pub mod wry_host;

#[cfg(test)]
mod testing;

pub use controller::{ControllerStatus, EmbeddingController};
pub use creation_board::CreationBoard;
pub use errors::{EmbedError, HostError};
pub use events::{CreationEvent, WindowSignal};
pub use host::{GeometrySource, SurfaceHandle, SurfaceHost, SurfaceSpec};
pub use manager::{EmbedOptions, EmbeddingManager, EmbeddingRegistry, ModelUrls, SurfaceRecord};
pub use placeholder::Placeholder;
pub use reconcile::ReconciliationTrigger;
pub use sync::{PositionSynchronizer, SyncOutcome};
