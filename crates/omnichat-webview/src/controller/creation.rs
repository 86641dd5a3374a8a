use std::sync::Arc;

use tokio::sync::oneshot;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::{ActiveSurface, ControllerInner, ControllerStatus, SlotState};
use crate::events::CreationEvent;
use crate::host::SurfaceSpec;
use crate::sync::PositionSynchronizer;

impl ControllerInner {
    /// Destroy-then-create for attempt `token`.
    ///
    /// Returns once the surface is requested and registered; the creation
    /// outcome is awaited on a spawned task.
    pub(super) async fn run_attempt(self: &Arc<Self>, token: u64) {
        let (previous, model, source) = {
            let mut state = self.state();
            if !state.attempt.is_current(token) {
                debug!(slot = %self.slot, attempt = token, "attempt superseded before start");
                return;
            }
            state.stop_sync();
            (state.surface.take(), state.model, state.source.clone())
        };

        if let Some(previous) = previous {
            self.registry.close(&previous.label).await;
        }

        let (Some(model), Some(source)) = (model, source) else {
            return;
        };
        if !self.is_current(token) {
            return;
        }

        let Some(bounds) = source.bounds() else {
            self.fail(token, format!("geometry source for slot {} is not mounted", self.slot));
            return;
        };

        let label = self.registry.next_label(model);
        let spec = SurfaceSpec {
            url: self.options.urls.url_for(model).to_string(),
            geometry: bounds.rounded(),
        };
        debug!(slot = %self.slot, label = %label, url = %spec.url, attempt = token, "requesting surface");

        let handle = match self.registry.host().create_surface(&label, spec).await {
            Ok(handle) => handle,
            Err(e) => {
                warn!(slot = %self.slot, label = %label, error = %e, "surface request rejected");
                self.fail(token, e.to_string());
                return;
            }
        };
        let outcome = handle.subscribe_creation();

        if !self.is_current(token) {
            debug!(slot = %self.slot, label = %label, "attempt went stale during creation");
            self.registry.dispose(handle).await;
            return;
        }

        self.registry
            .register(label.clone(), Arc::clone(&handle), model)
            .await;

        let adopted = {
            let mut state = self.state();
            if state.attempt.is_current(token) {
                state.surface = Some(ActiveSurface {
                    label: label.clone(),
                    handle,
                });
                true
            } else {
                false
            }
        };
        if !adopted {
            debug!(slot = %self.slot, label = %label, "attempt went stale during registration");
            self.registry.close(&label).await;
            return;
        }

        let inner = Arc::clone(self);
        tokio::spawn(async move { inner.await_creation(token, label, outcome).await });
    }

    /// Wait for the creation outcome, falling back to `Ready` once the
    /// fallback timeout elapses without one.
    async fn await_creation(
        self: Arc<Self>,
        token: u64,
        label: String,
        mut outcome: oneshot::Receiver<CreationEvent>,
    ) {
        let deadline = Instant::now() + self.options.fallback_timeout;
        match tokio::time::timeout_at(deadline, &mut outcome).await {
            Ok(Ok(CreationEvent::Created)) => self.on_created(token, &label).await,
            Ok(Ok(CreationEvent::Failed(message))) => self.on_failed(token, &label, message).await,
            Ok(Err(_)) => {
                // subscription dropped without an outcome
                tokio::time::sleep_until(deadline).await;
                self.on_fallback(token, &label);
            }
            Err(_) => {
                self.on_fallback(token, &label);
                if let Ok(CreationEvent::Failed(message)) = outcome.await {
                    if self.is_current(token) {
                        warn!(
                            slot = %self.slot,
                            label = %label,
                            error = %message,
                            "surface reported failure after fallback readiness"
                        );
                    }
                }
            }
        }
    }

    async fn on_created(self: &Arc<Self>, token: u64, label: &str) {
        let adopted = {
            let mut state = self.state();
            if state.attempt.is_current(token) {
                self.publish(ControllerStatus::Ready);
                self.start_sync(&mut state);
                true
            } else {
                false
            }
        };

        if adopted {
            info!(slot = %self.slot, label = %label, "surface ready");
        } else {
            debug!(slot = %self.slot, label = %label, "discarding stale creation confirmation");
            self.registry.close(label).await;
        }
    }

    async fn on_failed(&self, token: u64, label: &str, message: String) {
        let adopted = {
            let mut state = self.state();
            if state.attempt.is_current(token) {
                state.stop_sync();
                state.surface = None;
                self.publish(ControllerStatus::Error(message.clone()));
                true
            } else {
                false
            }
        };

        if adopted {
            warn!(slot = %self.slot, label = %label, error = %message, "surface creation failed");
        } else {
            debug!(slot = %self.slot, label = %label, "discarding stale creation failure");
        }
        self.registry.close(label).await;
    }

    fn on_fallback(self: &Arc<Self>, token: u64, label: &str) {
        let mut state = self.state();
        let loading = self.status.borrow().is_loading();
        if !state.attempt.is_current(token) || !loading {
            return;
        }
        info!(
            slot = %self.slot,
            label = %label,
            timeout_ms = self.options.fallback_timeout.as_millis() as u64,
            "no creation outcome in time, assuming ready"
        );
        self.publish(ControllerStatus::Ready);
        self.start_sync(&mut state);
    }

    /// Put the slot into `Error` if `token` is still current.
    fn fail(&self, token: u64, message: String) {
        let mut state = self.state();
        if !state.attempt.is_current(token) {
            return;
        }
        state.stop_sync();
        warn!(slot = %self.slot, error = %message, "slot failed");
        self.publish(ControllerStatus::Error(message));
    }

    /// Start position sync for the current surface. Caller holds the lock
    /// and has already checked the token.
    fn start_sync(&self, state: &mut SlotState) {
        state.stop_sync();
        let (Some(surface), Some(source)) = (state.surface.as_ref(), state.source.clone()) else {
            return;
        };

        let cancel = CancellationToken::new();
        let synchronizer = PositionSynchronizer::new(
            Arc::clone(&surface.handle),
            source,
            self.options.poll_interval,
            self.options.settle_delay,
        );
        let signals = self.registry.host().window_signals();
        tokio::spawn(synchronizer.run(signals, cancel.clone()));
        state.sync = Some(cancel);
    }
}
