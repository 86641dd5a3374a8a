//! Host command pumping and idle polling.

use std::time::Instant;

use winit::event_loop::{ActiveEventLoop, ControlFlow};

use super::core::OmniChatApp;
use super::types::POLL_INTERVAL;

impl OmniChatApp {
    /// Apply queued `wry` host commands on the UI thread.
    pub(super) fn process_host_commands(&mut self) {
        if let (Some(driver), Some(window)) = (self.driver.as_mut(), self.window.as_ref()) {
            let applied = driver.process_pending(&**window);
            if applied > 0 {
                tracing::trace!(applied, live = driver.len(), "Host commands applied");
            }
        }
    }

    /// Run polling and schedule the next wake-up.
    pub(super) fn poll_and_schedule(&mut self, event_loop: &ActiveEventLoop) {
        self.process_host_commands();
        self.update_window_title();

        if let Some(deadline) = self.shutdown_deadline {
            if Instant::now() >= deadline {
                tracing::warn!("Surfaces did not close in time, forcing shutdown");
                self.finish_shutdown(event_loop);
                return;
            }
        }

        event_loop.set_control_flow(ControlFlow::WaitUntil(Instant::now() + POLL_INTERVAL));
    }
}
