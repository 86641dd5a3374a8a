//! Graceful shutdown: close every surface, then stop the runtime.

use std::time::{Duration, Instant};

use winit::event_loop::ActiveEventLoop;

use super::core::OmniChatApp;
use super::types::{SlotCommand, SHUTDOWN_GRACE};

impl OmniChatApp {
    /// Start closing surfaces. The loop keeps pumping host commands until
    /// the slot worker reports `ShutdownComplete` or the grace period ends.
    pub(super) fn begin_shutdown(&mut self) {
        if self.is_shutting_down() {
            return;
        }
        tracing::info!("Initiating graceful shutdown");

        for entry in self.slots.values() {
            entry.placeholder.unmount();
        }

        if self.slot_tx.is_none() {
            self.should_exit = true;
            return;
        }
        self.shutdown_deadline = Some(Instant::now() + SHUTDOWN_GRACE);
        self.send_slot_command(SlotCommand::Shutdown);
    }

    /// Tear down whatever is left and exit the event loop.
    ///
    /// Order matters:
    /// 1. Apply any close commands still queued
    /// 2. Destroy remaining webviews
    /// 3. Drop controllers and the manager
    /// 4. Shut down the tokio runtime
    pub(super) fn finish_shutdown(&mut self, event_loop: &ActiveEventLoop) {
        self.process_host_commands();

        if let Some(driver) = self.driver.as_mut() {
            if !driver.is_empty() {
                tracing::warn!(remaining = driver.len(), "Destroying surfaces left open");
            }
            driver.destroy_all();
        }

        self.slots.clear();
        self.slot_keys.clear();
        self.slot_tx = None;
        self.manager = None;

        if let Some(rt) = self.tokio_runtime.take() {
            rt.shutdown_timeout(Duration::from_secs(1));
        }

        tracing::info!("Graceful shutdown complete");
        self.should_exit = true;
        event_loop.exit();
    }
}
