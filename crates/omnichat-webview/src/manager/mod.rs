//! Embedding lifecycle ownership.
//!
//! `EmbeddingManager` is constructed once by whatever owns the window and
//! handed to the slot-managing layer. It owns the shared registry and hands
//! out per-slot controllers and the reconciliation trigger.

use std::sync::Arc;

use crate::controller::EmbeddingController;
use crate::host::SurfaceHost;
use crate::reconcile::ReconciliationTrigger;

mod registry;
mod types;

pub use registry::{EmbeddingRegistry, SurfaceRecord};
pub use types::{EmbedOptions, ModelUrls};

/// Owns the surface registry for the lifetime of the application window.
#[derive(Clone)]
pub struct EmbeddingManager {
    registry: Arc<EmbeddingRegistry>,
    options: Arc<EmbedOptions>,
}

impl EmbeddingManager {
    pub fn new(host: Arc<dyn SurfaceHost>, options: EmbedOptions) -> Self {
        let registry = Arc::new(EmbeddingRegistry::new(host, options.label_prefix.clone()));
        Self {
            registry,
            options: Arc::new(options),
        }
    }

    pub fn registry(&self) -> &Arc<EmbeddingRegistry> {
        &self.registry
    }

    pub fn options(&self) -> &EmbedOptions {
        &self.options
    }

    /// A new controller for the on-screen slot named `slot`.
    pub fn controller(&self, slot: impl Into<String>) -> EmbeddingController {
        EmbeddingController::new(
            slot.into(),
            Arc::clone(&self.registry),
            Arc::clone(&self.options),
        )
    }

    pub fn reconciler(&self) -> ReconciliationTrigger {
        ReconciliationTrigger::new(Arc::clone(&self.registry))
    }

    /// Close every surface, including orphans. Used during graceful shutdown.
    pub async fn shutdown(&self) {
        self.registry.close_all().await;
    }
}
