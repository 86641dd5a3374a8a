//! Internal types and constants for the app state module.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use omnichat_common::ModelIdentity;
use omnichat_webview::{EmbeddingController, Placeholder};

/// Events delivered to the event loop from other threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// The `wry` host queued commands for the UI thread.
    HostCommands,
    /// Every surface has been closed; the loop may exit.
    ShutdownComplete,
}

/// A visible slot hosting an embedded model.
pub(super) struct SlotEntry {
    pub controller: Arc<EmbeddingController>,
    pub placeholder: Arc<Placeholder>,
}

/// A slot that was just added and still needs its first activation.
pub(super) struct PendingActivation {
    pub model: ModelIdentity,
    pub controller: Arc<EmbeddingController>,
    pub placeholder: Arc<Placeholder>,
}

/// Work handed to the slot worker. Commands run strictly in order.
pub(super) enum SlotCommand {
    /// Apply a new set of visible slots.
    Apply {
        removed: Vec<Arc<EmbeddingController>>,
        added: Vec<PendingActivation>,
        active: HashSet<ModelIdentity>,
    },
    /// Retry every listed controller that is still in `Error`.
    Retry(Vec<Arc<EmbeddingController>>),
    /// Close every surface, then report `ShutdownComplete`.
    Shutdown,
}

/// How often to poll statuses while idle.
pub(super) const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// How long shutdown waits for surfaces to close before forcing it.
pub(super) const SHUTDOWN_GRACE: Duration = Duration::from_secs(3);
