//! Closing surfaces that fell out of the active model set.

use std::collections::HashSet;
use std::sync::Arc;

use omnichat_common::ModelIdentity;
use tracing::debug;

use crate::manager::EmbeddingRegistry;

/// Invoked by the presentation layer whenever the set of on-screen
/// embedded models changes. Never creates surfaces; slot controllers do
/// that when they become active.
#[derive(Clone)]
pub struct ReconciliationTrigger {
    registry: Arc<EmbeddingRegistry>,
}

impl ReconciliationTrigger {
    pub fn new(registry: Arc<EmbeddingRegistry>) -> Self {
        Self { registry }
    }

    /// Bring the registry in line with `active`.
    ///
    /// An empty set means no embedded model is on screen at all, so the
    /// registry does a full `close_all`, orphan sweep included.
    pub async fn on_active_set_changed<I>(&self, active: I)
    where
        I: IntoIterator<Item = ModelIdentity>,
    {
        let active: HashSet<ModelIdentity> = active.into_iter().collect();
        if active.is_empty() {
            debug!("no embedded model active, closing all surfaces");
            self.registry.close_all().await;
        } else {
            debug!(active = ?active, "active model set changed");
            self.registry.reconcile(&active).await;
        }
    }
}
