use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures_util::future::join_all;
use omnichat_common::ModelIdentity;
use tracing::{debug, info, warn};

use crate::host::{SurfaceHandle, SurfaceHost};
use crate::label;

/// One live embedded surface, as tracked by the registry.
#[derive(Clone)]
pub struct SurfaceRecord {
    pub label: String,
    pub handle: Arc<dyn SurfaceHandle>,
    pub model: ModelIdentity,
}

impl std::fmt::Debug for SurfaceRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SurfaceRecord")
            .field("label", &self.label)
            .field("model", &self.model)
            .finish()
    }
}

/// Maps surface labels to live surfaces and keeps at most one surface per
/// model.
///
/// The map is only ever locked for synchronous bookkeeping; host calls
/// happen after the lock is released, so records are removed before their
/// surfaces finish closing.
pub struct EmbeddingRegistry {
    host: Arc<dyn SurfaceHost>,
    label_prefix: String,
    records: Mutex<HashMap<String, SurfaceRecord>>,
}

impl EmbeddingRegistry {
    pub fn new(host: Arc<dyn SurfaceHost>, label_prefix: impl Into<String>) -> Self {
        Self {
            host,
            label_prefix: label_prefix.into(),
            records: Mutex::new(HashMap::new()),
        }
    }

    pub fn host(&self) -> &Arc<dyn SurfaceHost> {
        &self.host
    }

    pub fn label_prefix(&self) -> &str {
        &self.label_prefix
    }

    /// A fresh label for a surface showing `model`.
    pub fn next_label(&self, model: ModelIdentity) -> String {
        label::generate(&self.label_prefix, model)
    }

    fn records(&self) -> MutexGuard<'_, HashMap<String, SurfaceRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Track a surface under `label`.
    ///
    /// Any other record for the same model is closed (and awaited) before
    /// this one is stored. Conflicts are removed and the new record inserted
    /// under a single lock acquisition once no conflict remains, so two
    /// concurrent registrations for one model cannot both survive.
    pub async fn register(
        &self,
        label: impl Into<String>,
        handle: Arc<dyn SurfaceHandle>,
        model: ModelIdentity,
    ) {
        let label = label.into();
        loop {
            let displaced: Vec<SurfaceRecord> = {
                let mut records = self.records();
                let conflicting: Vec<String> = records
                    .values()
                    .filter(|r| r.model == model && r.label != label)
                    .map(|r| r.label.clone())
                    .collect();

                if conflicting.is_empty() {
                    records.insert(
                        label.clone(),
                        SurfaceRecord {
                            label: label.clone(),
                            handle,
                            model,
                        },
                    );
                    debug!(label = %label, model = %model, tracked = records.len(), "surface registered");
                    return;
                }

                conflicting
                    .iter()
                    .filter_map(|l| records.remove(l))
                    .collect()
            };

            for record in displaced {
                info!(
                    label = %record.label,
                    replacement = %label,
                    model = %model,
                    "closing existing surface for model"
                );
                close_handle(&record.label, record.handle.as_ref()).await;
            }
        }
    }

    /// Close and forget the surface tracked under `label`. No-op for unknown
    /// labels. Close failures are logged; the record is gone either way.
    pub async fn close(&self, label: &str) {
        let record = self.records().remove(label);
        match record {
            Some(record) => close_handle(&record.label, record.handle.as_ref()).await,
            None => debug!(label = %label, "close: no surface tracked"),
        }
    }

    /// Close every tracked surface whose model is not in `active`.
    /// Closes run concurrently; returns once all have finished.
    pub async fn reconcile(&self, active: &HashSet<ModelIdentity>) {
        let stale: Vec<SurfaceRecord> = {
            let mut records = self.records();
            let labels: Vec<String> = records
                .values()
                .filter(|r| !active.contains(&r.model))
                .map(|r| r.label.clone())
                .collect();
            labels.iter().filter_map(|l| records.remove(l)).collect()
        };

        if stale.is_empty() {
            return;
        }

        debug!(closing = stale.len(), active = active.len(), "reconciling surfaces");
        join_all(
            stale
                .iter()
                .map(|r| close_handle(&r.label, r.handle.as_ref())),
        )
        .await;
    }

    /// Close every tracked surface, then sweep the host inventory for
    /// surfaces carrying this system's label prefix that were never
    /// registered (an attempt that created a surface but died before
    /// registering it).
    pub async fn close_all(&self) {
        let tracked: Vec<SurfaceRecord> = self.records().drain().map(|(_, r)| r).collect();
        info!(count = tracked.len(), "closing all surfaces");

        join_all(
            tracked
                .iter()
                .map(|r| close_handle(&r.label, r.handle.as_ref())),
        )
        .await;

        let inventory = match self.host.list_surfaces().await {
            Ok(surfaces) => surfaces,
            Err(e) => {
                warn!(error = %e, "could not list host surfaces for orphan sweep");
                return;
            }
        };

        // Surfaces registered while the inventory was in flight are live, not orphans.
        let orphans: Vec<Arc<dyn SurfaceHandle>> = {
            let live = self.records();
            inventory
                .into_iter()
                .filter(|h| label::is_managed(&self.label_prefix, h.label()))
                .filter(|h| !tracked.iter().any(|r| r.label == h.label()))
                .filter(|h| !live.contains_key(h.label()))
                .collect()
        };

        for orphan in &orphans {
            info!(label = %orphan.label(), "closing orphaned surface");
        }
        join_all(orphans.iter().map(|h| close_handle(h.label(), h.as_ref()))).await;
    }

    /// Close a surface that was never registered (a creation attempt that
    /// went stale before registration).
    pub(crate) async fn dispose(&self, handle: Arc<dyn SurfaceHandle>) {
        debug!(label = %handle.label(), "disposing unregistered surface");
        close_handle(handle.label(), handle.as_ref()).await;
    }

    pub fn contains(&self, label: &str) -> bool {
        self.records().contains_key(label)
    }

    /// Label of the live surface for `model`, if any.
    pub fn label_for(&self, model: ModelIdentity) -> Option<String> {
        self.records()
            .values()
            .find(|r| r.model == model)
            .map(|r| r.label.clone())
    }

    pub fn labels(&self) -> Vec<String> {
        self.records().keys().cloned().collect()
    }

    /// Models with a live surface.
    pub fn models(&self) -> HashSet<ModelIdentity> {
        self.records().values().map(|r| r.model).collect()
    }

    pub fn len(&self) -> usize {
        self.records().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records().is_empty()
    }
}

async fn close_handle(label: &str, handle: &dyn SurfaceHandle) {
    match handle.close().await {
        Ok(()) => debug!(label = %label, "surface closed"),
        Err(e) => warn!(label = %label, error = %e, "failed to close surface"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockHost;

    fn registry(host: &Arc<MockHost>) -> EmbeddingRegistry {
        EmbeddingRegistry::new(host.clone(), "emb-")
    }

    async fn surface(host: &MockHost, label: &str) -> Arc<dyn SurfaceHandle> {
        host.spawn_surface(label)
    }

    #[tokio::test]
    async fn register_tracks_record() {
        let host = MockHost::new();
        let reg = registry(&host);
        let h = surface(&host, "emb-claude-1").await;

        reg.register("emb-claude-1", h, ModelIdentity::Claude).await;

        assert!(reg.contains("emb-claude-1"));
        assert_eq!(reg.label_for(ModelIdentity::Claude).as_deref(), Some("emb-claude-1"));
        assert_eq!(reg.len(), 1);
    }

    #[tokio::test]
    async fn register_same_model_closes_previous_first() {
        let host = MockHost::new();
        let reg = Arc::new(registry(&host));
        let seen_at_close = Arc::new(Mutex::new(None));
        host.on_close({
            let reg = Arc::downgrade(&reg);
            let seen = Arc::clone(&seen_at_close);
            move |_| {
                if let Some(reg) = reg.upgrade() {
                    *seen.lock().unwrap() = Some(reg.labels());
                }
            }
        });
        reg.register("emb-claude-1", surface(&host, "emb-claude-1").await, ModelIdentity::Claude)
            .await;
        reg.register("emb-claude-2", surface(&host, "emb-claude-2").await, ModelIdentity::Claude)
            .await;

        assert_eq!(reg.labels(), vec!["emb-claude-2".to_string()]);
        assert!(host.was_closed("emb-claude-1"));
        assert!(!host.was_closed("emb-claude-2"));
        // Neither surface was tracked while the old one closed.
        assert_eq!(*seen_at_close.lock().unwrap(), Some(Vec::<String>::new()));
    }

    #[tokio::test]
    async fn register_same_label_replaces_without_closing() {
        let host = MockHost::new();
        let reg = registry(&host);
        let h = surface(&host, "emb-chatgpt-1").await;
        reg.register("emb-chatgpt-1", h.clone(), ModelIdentity::ChatGpt).await;
        reg.register("emb-chatgpt-1", h, ModelIdentity::ChatGpt).await;

        assert_eq!(reg.len(), 1);
        assert!(!host.was_closed("emb-chatgpt-1"));
    }

    #[tokio::test]
    async fn singleton_holds_across_register_sequences() {
        let host = MockHost::new();
        let reg = registry(&host);
        let sequence = [
            ModelIdentity::ChatGpt,
            ModelIdentity::Claude,
            ModelIdentity::ChatGpt,
            ModelIdentity::GeminiWeb,
            ModelIdentity::Claude,
            ModelIdentity::Claude,
        ];
        for (i, model) in sequence.into_iter().enumerate() {
            let label = format!("emb-{model}-{i}");
            reg.register(label.clone(), surface(&host, &label).await, model)
                .await;

            let mut seen = HashSet::new();
            for record in reg.records().values() {
                assert!(seen.insert(record.model), "two records for {}", record.model);
            }
        }
        assert_eq!(reg.len(), 3);
    }

    #[tokio::test]
    async fn close_is_idempotent() {
        let host = MockHost::new();
        let reg = registry(&host);
        reg.register("emb-gemini-1", surface(&host, "emb-gemini-1").await, ModelIdentity::GeminiWeb)
            .await;

        reg.close("emb-gemini-1").await;
        reg.close("emb-gemini-1").await;
        reg.close("never-registered").await;

        assert!(reg.is_empty());
        assert_eq!(host.close_count("emb-gemini-1"), 1);
    }

    #[tokio::test]
    async fn failed_close_still_removes_record() {
        let host = MockHost::new();
        host.fail_closes(true);
        let reg = registry(&host);
        reg.register("emb-claude-1", surface(&host, "emb-claude-1").await, ModelIdentity::Claude)
            .await;

        reg.close("emb-claude-1").await;

        assert!(!reg.contains("emb-claude-1"));
    }

    #[tokio::test]
    async fn reconcile_keeps_exactly_the_intersection() {
        let host = MockHost::new();
        let reg = registry(&host);
        for model in ModelIdentity::ALL {
            let label = format!("emb-{model}-1");
            reg.register(label.clone(), surface(&host, &label).await, model)
                .await;
        }

        let active: HashSet<_> = [ModelIdentity::Claude].into_iter().collect();
        reg.reconcile(&active).await;

        assert_eq!(reg.models(), active);
        assert!(host.was_closed("emb-chatgpt-1"));
        assert!(host.was_closed("emb-gemini-1"));
        assert!(!host.was_closed("emb-claude-1"));
    }

    #[tokio::test]
    async fn reconcile_with_untracked_active_model_adds_nothing() {
        let host = MockHost::new();
        let reg = registry(&host);
        reg.register("emb-chatgpt-1", surface(&host, "emb-chatgpt-1").await, ModelIdentity::ChatGpt)
            .await;

        let active: HashSet<_> = [ModelIdentity::GeminiWeb].into_iter().collect();
        reg.reconcile(&active).await;

        assert!(reg.is_empty());
    }

    #[tokio::test]
    async fn close_all_sweeps_orphans_with_prefix_only() {
        let host = MockHost::new();
        let reg = registry(&host);
        reg.register("emb-chatgpt-1", surface(&host, "emb-chatgpt-1").await, ModelIdentity::ChatGpt)
            .await;
        host.spawn_surface("emb-claude-orphan");
        host.spawn_surface("main");

        reg.close_all().await;

        assert!(reg.is_empty());
        assert!(host.was_closed("emb-chatgpt-1"));
        assert!(host.was_closed("emb-claude-orphan"));
        assert!(!host.was_closed("main"));
    }

    #[tokio::test]
    async fn close_all_spares_surface_registered_during_sweep() {
        let host = MockHost::new();
        let reg = Arc::new(registry(&host));
        reg.register("emb-chatgpt-1", surface(&host, "emb-chatgpt-1").await, ModelIdentity::ChatGpt)
            .await;

        let release = host.hold_listing();
        let closing = tokio::spawn({
            let reg = Arc::clone(&reg);
            async move { reg.close_all().await }
        });
        host.listing_entered().await;

        reg.register("emb-claude-2", surface(&host, "emb-claude-2").await, ModelIdentity::Claude)
            .await;
        let _ = release.send(());
        closing.await.unwrap();

        assert!(host.was_closed("emb-chatgpt-1"));
        assert!(reg.contains("emb-claude-2"));
        assert!(!host.was_closed("emb-claude-2"));
        assert_eq!(host.live_labels(), vec!["emb-claude-2".to_string()]);
    }

    #[tokio::test]
    async fn close_all_survives_inventory_failure() {
        let host = MockHost::new();
        host.fail_listing(true);
        let reg = registry(&host);
        reg.register("emb-claude-1", surface(&host, "emb-claude-1").await, ModelIdentity::Claude)
            .await;

        reg.close_all().await;

        assert!(reg.is_empty());
        assert!(host.was_closed("emb-claude-1"));
    }
}
