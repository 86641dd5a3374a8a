//! Visible slots: which controllers exist, where their placeholders sit,
//! and the worker that drives activation, retry and shutdown.

use std::sync::Arc;

use futures_util::future::join_all;
use tokio::sync::mpsc;
use winit::dpi::PhysicalSize;
use winit::event_loop::EventLoopProxy;

use omnichat_common::Geometry;
use omnichat_layout::diff_slots;
use omnichat_webview::{EmbeddingManager, Placeholder, WindowSignal};

use super::core::OmniChatApp;
use super::types::{AppEvent, PendingActivation, SlotCommand, SlotEntry};

impl OmniChatApp {
    /// Window content area in logical pixels.
    pub(super) fn viewport(&self) -> Option<Geometry> {
        let window = self.window.as_ref()?;
        Some(viewport_from(window.inner_size(), window.scale_factor()))
    }

    /// Bring slots in line with the current selection: tear down slots
    /// that left the screen, reposition kept ones, and activate new ones.
    pub(super) fn apply_selection(&mut self) {
        if self.is_shutting_down() {
            return;
        }
        let (Some(manager), Some(viewport)) = (self.manager.as_ref(), self.viewport()) else {
            return;
        };

        let keys = self.selection.slot_keys();
        let diff = diff_slots(&self.slot_keys, &keys);
        let layouts = self.layout.compute(&keys, viewport);

        let mut removed = Vec::new();
        for key in &diff.removed {
            if let Some(entry) = self.slots.remove(key) {
                entry.placeholder.unmount();
                removed.push(entry.controller);
            }
        }

        let mut added = Vec::new();
        for slot in &layouts {
            if let Some(entry) = self.slots.get(&slot.key) {
                entry.placeholder.set(Some(slot.surface));
                continue;
            }
            let Some(model) = slot.key.tab.embedded() else {
                continue;
            };
            let entry = SlotEntry {
                controller: Arc::new(manager.controller(slot.key.to_string())),
                placeholder: Arc::new(Placeholder::mounted(slot.surface)),
            };
            added.push(PendingActivation {
                model,
                controller: Arc::clone(&entry.controller),
                placeholder: Arc::clone(&entry.placeholder),
            });
            self.slots.insert(slot.key, entry);
        }

        tracing::info!(
            mode = self.selection.mode().as_str(),
            removed = diff.removed.len(),
            added = added.len(),
            kept = diff.kept.len(),
            "Applying slot selection"
        );
        self.slot_keys = keys;
        self.send_slot_command(SlotCommand::Apply {
            removed,
            added,
            active: self.selection.active_models(),
        });
    }

    /// Move every placeholder to its slot in the current viewport.
    pub(super) fn relayout(&mut self, signal: WindowSignal) {
        let Some(viewport) = self.viewport() else {
            return;
        };
        for slot in self.layout.compute(&self.slot_keys, viewport) {
            if let Some(entry) = self.slots.get(&slot.key) {
                entry.placeholder.set(Some(slot.surface));
            }
        }
        if let Some(host) = &self.host {
            host.notify_window(signal);
        }
    }

    /// Retry every slot whose surface failed.
    pub(super) fn retry_failed(&mut self) {
        let failed: Vec<_> = self
            .slots
            .values()
            .filter(|entry| entry.controller.status().is_error())
            .map(|entry| Arc::clone(&entry.controller))
            .collect();
        if failed.is_empty() {
            tracing::debug!("No failed slots to retry");
            return;
        }
        tracing::info!(count = failed.len(), "Retrying failed slots");
        self.send_slot_command(SlotCommand::Retry(failed));
    }

    /// Open the first visible embedded model in the system browser.
    pub(super) fn open_in_browser(&self) {
        let Some(manager) = &self.manager else {
            return;
        };
        let Some(model) = self
            .selection
            .visible_tabs()
            .into_iter()
            .find_map(|tab| tab.embedded())
        else {
            tracing::debug!("No embedded model on screen to open");
            return;
        };
        let url = manager.options().urls.url_for(model).to_string();
        if let Err(e) = open::that(&url) {
            tracing::warn!(model = %model, url = %url, error = %e, "Failed to open browser");
        }
    }

    pub(super) fn send_slot_command(&self, command: SlotCommand) {
        let Some(tx) = &self.slot_tx else {
            return;
        };
        if tx.send(command).is_err() {
            tracing::warn!("Slot worker is gone; command dropped");
        }
    }
}

/// Processes slot commands one at a time so that teardown, reconciliation
/// and activation from successive selections never interleave.
pub(super) async fn run_slot_worker(
    mut commands: mpsc::UnboundedReceiver<SlotCommand>,
    manager: EmbeddingManager,
    proxy: EventLoopProxy<AppEvent>,
) {
    let reconciler = manager.reconciler();
    while let Some(command) = commands.recv().await {
        match command {
            SlotCommand::Apply {
                removed,
                added,
                active,
            } => {
                for controller in removed {
                    controller.deactivate().await;
                }
                reconciler.on_active_set_changed(active).await;
                join_all(added.into_iter().map(|pending| async move {
                    let PendingActivation {
                        model,
                        controller,
                        placeholder,
                    } = pending;
                    if let Err(e) = controller.activate(model, placeholder).await {
                        tracing::warn!(slot = %controller.slot(), error = %e, "Activation rejected");
                    }
                }))
                .await;
            }
            SlotCommand::Retry(controllers) => {
                join_all(controllers.iter().map(|controller| controller.retry())).await;
            }
            SlotCommand::Shutdown => {
                manager.shutdown().await;
                // Fails only if the loop already exited.
                let _ = proxy.send_event(AppEvent::ShutdownComplete);
                break;
            }
        }
    }
    tracing::debug!("Slot worker stopped");
}

fn viewport_from(size: PhysicalSize<u32>, scale_factor: f64) -> Geometry {
    let logical = size.to_logical::<f64>(scale_factor);
    Geometry::new(0.0, 0.0, logical.width, logical.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_is_logical_size_at_origin() {
        let viewport = viewport_from(PhysicalSize::new(2560, 1600), 2.0);
        assert_eq!(viewport, Geometry::new(0.0, 0.0, 1280.0, 800.0));
    }

    #[test]
    fn viewport_at_unit_scale() {
        let viewport = viewport_from(PhysicalSize::new(800, 600), 1.0);
        assert_eq!(viewport.width, 800.0);
        assert_eq!(viewport.height, 600.0);
    }
}
