//! Per-slot embedding controller.
//!
//! One controller exists per on-screen slot. It drives a single surface
//! through `Idle -> Loading -> Ready | Error`, and stamps every creation
//! attempt with an [`AttemptToken`] value. Every asynchronous continuation
//! (creation outcome, fallback timer, post-create bookkeeping) re-checks its
//! token under the slot lock before touching state; stale continuations
//! only clean up the surface they created.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use omnichat_common::ModelIdentity;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::errors::EmbedError;
use crate::host::{GeometrySource, SurfaceHandle};
use crate::manager::{EmbedOptions, EmbeddingRegistry};

mod attempt;
mod creation;
mod status;

pub(crate) use attempt::AttemptToken;
pub use status::ControllerStatus;

pub(crate) struct ActiveSurface {
    pub label: String,
    pub handle: Arc<dyn SurfaceHandle>,
}

#[derive(Default)]
pub(crate) struct SlotState {
    pub attempt: AttemptToken,
    pub model: Option<ModelIdentity>,
    pub source: Option<Arc<dyn GeometrySource>>,
    pub surface: Option<ActiveSurface>,
    pub sync: Option<CancellationToken>,
}

impl SlotState {
    fn stop_sync(&mut self) {
        if let Some(cancel) = self.sync.take() {
            cancel.cancel();
        }
    }

    /// Invalidate outstanding continuations and detach the current surface.
    fn invalidate(&mut self) -> Option<ActiveSurface> {
        self.attempt.advance();
        self.stop_sync();
        self.surface.take()
    }
}

pub(crate) struct ControllerInner {
    slot: String,
    registry: Arc<EmbeddingRegistry>,
    options: Arc<EmbedOptions>,
    state: Mutex<SlotState>,
    status: watch::Sender<ControllerStatus>,
}

impl ControllerInner {
    fn state(&self) -> MutexGuard<'_, SlotState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_current(&self, token: u64) -> bool {
        self.state().attempt.is_current(token)
    }

    fn publish(&self, status: ControllerStatus) {
        self.status.send_replace(status);
    }
}

/// Drives one slot's surface. Dropping the controller unmounts it: pending
/// continuations are invalidated and the current surface is closed.
pub struct EmbeddingController {
    inner: Arc<ControllerInner>,
}

impl EmbeddingController {
    pub(crate) fn new(
        slot: String,
        registry: Arc<EmbeddingRegistry>,
        options: Arc<EmbedOptions>,
    ) -> Self {
        let (status, _) = watch::channel(ControllerStatus::Idle);
        Self {
            inner: Arc::new(ControllerInner {
                slot,
                registry,
                options,
                state: Mutex::new(SlotState::default()),
                status,
            }),
        }
    }

    pub fn slot(&self) -> &str {
        &self.inner.slot
    }

    pub fn status(&self) -> ControllerStatus {
        self.inner.status.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ControllerStatus> {
        self.inner.status.subscribe()
    }

    pub fn model(&self) -> Option<ModelIdentity> {
        self.inner.state().model
    }

    /// Label of the surface this slot currently owns, if any.
    pub fn surface_label(&self) -> Option<String> {
        self.inner.state().surface.as_ref().map(|s| s.label.clone())
    }

    pub fn attempt(&self) -> u64 {
        self.inner.state().attempt.current()
    }

    /// Activate the slot for `model`, tracking `source`.
    ///
    /// Fails without changing state when `source` is not mounted. Otherwise
    /// the status becomes `Loading`, a previous surface is torn down, and
    /// after the configured activation delay a new surface is requested.
    /// Returns once the request is in flight; the outcome is published via
    /// [`EmbeddingController::subscribe`].
    pub async fn activate(
        &self,
        model: ModelIdentity,
        source: Arc<dyn GeometrySource>,
    ) -> Result<(), EmbedError> {
        if source.bounds().is_none() {
            return Err(EmbedError::SourceUnmounted {
                slot: self.inner.slot.clone(),
            });
        }

        let (token, previous) = {
            let mut state = self.inner.state();
            let previous = state.invalidate();
            state.model = Some(model);
            state.source = Some(source);
            self.inner.publish(ControllerStatus::Loading);
            (state.attempt.current(), previous)
        };
        info!(slot = %self.inner.slot, model = %model, attempt = token, "slot activated");

        if let Some(previous) = previous {
            self.inner.registry.close(&previous.label).await;
        }

        let delay = self.inner.options.activation_delay;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.inner.run_attempt(token).await;
        Ok(())
    }

    /// Tear the slot down and return to `Idle`.
    pub async fn deactivate(&self) {
        let previous = {
            let mut state = self.inner.state();
            let previous = state.invalidate();
            state.model = None;
            state.source = None;
            self.inner.publish(ControllerStatus::Idle);
            previous
        };
        debug!(slot = %self.inner.slot, "slot deactivated");

        if let Some(previous) = previous {
            self.inner.registry.close(&previous.label).await;
        }
    }

    /// Re-attempt creation after a failure. Skips the activation delay.
    /// Returns `false` (and does nothing) unless the slot is in `Error`.
    pub async fn retry(&self) -> bool {
        let token = {
            let mut state = self.inner.state();
            let errored = self.inner.status.borrow().is_error();
            if !errored || state.model.is_none() {
                debug!(slot = %self.inner.slot, status = %self.status(), "retry ignored");
                return false;
            }
            let token = state.attempt.advance();
            self.inner.publish(ControllerStatus::Loading);
            token
        };
        info!(slot = %self.inner.slot, attempt = token, "retrying surface creation");
        self.inner.run_attempt(token).await;
        true
    }
}

impl Drop for EmbeddingController {
    fn drop(&mut self) {
        let previous = {
            let mut state = self.inner.state();
            let previous = state.invalidate();
            state.source = None;
            previous
        };
        let Some(previous) = previous else { return };

        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                let registry = Arc::clone(&self.inner.registry);
                runtime.spawn(async move { registry.close(&previous.label).await });
            }
            Err(_) => warn!(
                slot = %self.inner.slot,
                label = %previous.label,
                "controller dropped outside a runtime; surface left for close_all"
            ),
        }
    }
}
