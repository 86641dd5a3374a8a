//! Keeps a surface aligned with its placeholder.
//!
//! Pushes happen after a short settle delay, on every window move/resize
//! signal, on every placeholder change, and on a backstop polling interval.
//! Zero-area geometry is never pushed, and per-push host errors are
//! swallowed: the next trigger simply tries again.

use std::sync::Arc;
use std::time::Duration;

use omnichat_common::Geometry;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{broadcast, watch};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::events::WindowSignal;
use crate::host::{GeometrySource, SurfaceHandle};

/// Result of a single geometry push.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SyncOutcome {
    /// The placeholder is not mounted; nothing was pushed.
    Unmounted,
    /// The rounded geometry had no area; nothing was pushed.
    ZeroArea,
    Pushed(Geometry),
}

#[derive(Debug)]
enum Trigger {
    Window,
    Placeholder,
    Poll,
}

pub struct PositionSynchronizer {
    handle: Arc<dyn SurfaceHandle>,
    source: Arc<dyn GeometrySource>,
    poll_interval: Duration,
    settle_delay: Duration,
}

impl PositionSynchronizer {
    pub fn new(
        handle: Arc<dyn SurfaceHandle>,
        source: Arc<dyn GeometrySource>,
        poll_interval: Duration,
        settle_delay: Duration,
    ) -> Self {
        Self {
            handle,
            source,
            poll_interval,
            settle_delay,
        }
    }

    /// Read the placeholder once and push its rounded geometry.
    pub async fn sync_once(&self) -> SyncOutcome {
        let Some(bounds) = self.source.bounds() else {
            return SyncOutcome::Unmounted;
        };
        let geometry = bounds.rounded();
        if geometry.is_zero_area() {
            trace!(label = %self.handle.label(), "skipping zero-area geometry");
            return SyncOutcome::ZeroArea;
        }

        if let Err(e) = self.handle.set_position(geometry.x, geometry.y).await {
            trace!(label = %self.handle.label(), error = %e, "set_position failed");
        }
        if let Err(e) = self.handle.set_size(geometry.width, geometry.height).await {
            trace!(label = %self.handle.label(), error = %e, "set_size failed");
        }
        SyncOutcome::Pushed(geometry)
    }

    /// Run until `cancel` fires.
    pub async fn run(self, signals: broadcast::Receiver<WindowSignal>, cancel: CancellationToken) {
        let label = self.handle.label().to_string();

        tokio::select! {
            _ = cancel.cancelled() => return,
            _ = tokio::time::sleep(self.settle_delay) => {}
        }
        debug!(label = %label, "position sync started");
        self.sync_once().await;

        let mut signals = Some(signals);
        let mut changes = self.source.changes();
        let mut poll = tokio::time::interval(self.poll_interval);
        poll.set_missed_tick_behavior(MissedTickBehavior::Skip);
        poll.tick().await;

        loop {
            let trigger = tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                trigger = next_window_signal(&mut signals) => trigger,
                trigger = next_placeholder_change(&mut changes) => trigger,
                _ = poll.tick() => Trigger::Poll,
            };
            trace!(label = %label, trigger = ?trigger, "syncing geometry");
            self.sync_once().await;
        }
        debug!(label = %label, "position sync stopped");
    }
}

async fn next_window_signal(signals: &mut Option<broadcast::Receiver<WindowSignal>>) -> Trigger {
    loop {
        let Some(rx) = signals.as_mut() else {
            return std::future::pending().await;
        };
        match rx.recv().await {
            Ok(signal) => {
                trace!(signal = ?signal, "window signal");
                return Trigger::Window;
            }
            // missed some signals; one push covers them all
            Err(RecvError::Lagged(skipped)) => {
                trace!(skipped, "window signals lagged");
                return Trigger::Window;
            }
            Err(RecvError::Closed) => *signals = None,
        }
    }
}

async fn next_placeholder_change(changes: &mut Option<watch::Receiver<()>>) -> Trigger {
    loop {
        let Some(rx) = changes.as_mut() else {
            return std::future::pending().await;
        };
        match rx.changed().await {
            Ok(()) => return Trigger::Placeholder,
            Err(_) => *changes = None,
        }
    }
}
