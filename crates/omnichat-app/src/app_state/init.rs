//! Window creation, async runtime, and embedding host setup.

use std::sync::{Arc, Mutex, PoisonError};

use winit::event_loop::ActiveEventLoop;
use winit::window::WindowAttributes;

use omnichat_webview::wry_host::{self, SurfaceOptions};
use omnichat_webview::{EmbeddingManager, SurfaceHost};

use super::core::OmniChatApp;
use super::slots::run_slot_worker;
use super::types::AppEvent;
use crate::convert::embed_options;

impl OmniChatApp {
    /// Create the window, the tokio runtime and the embedding host.
    /// Returns `false` if initialization failed and the event loop should exit.
    pub(super) fn initialize_window(&mut self, event_loop: &ActiveEventLoop) -> bool {
        let attrs = WindowAttributes::default()
            .with_title(self.config.window.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                f64::from(self.config.window.width),
                f64::from(self.config.window.height),
            ));

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                tracing::error!("Failed to create window: {e}");
                return false;
            }
        };

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("omnichat-embed")
            .enable_all()
            .build();
        let runtime = match runtime {
            Ok(rt) => rt,
            Err(e) => {
                tracing::error!("Failed to start async runtime: {e}");
                return false;
            }
        };

        self.initialize_embedding();
        if let Some(manager) = self.manager.clone() {
            let (slot_tx, slot_rx) = tokio::sync::mpsc::unbounded_channel();
            runtime.spawn(run_slot_worker(slot_rx, manager, self.proxy.clone()));
            self.slot_tx = Some(slot_tx);
        }
        self.tokio_runtime = Some(runtime);
        self.window = Some(window);
        tracing::info!("Window created and embedding host initialized");
        true
    }

    /// Wire the `wry` host to this event loop and build the manager.
    fn initialize_embedding(&mut self) {
        let proxy = Mutex::new(self.proxy.clone());
        let wake = move || {
            let proxy = proxy.lock().unwrap_or_else(PoisonError::into_inner);
            // Fails only once the loop has exited.
            let _ = proxy.send_event(AppEvent::HostCommands);
        };
        let (host, driver) = wry_host::channel(SurfaceOptions::default(), wake);
        let host = Arc::new(host);

        let options = embed_options(&self.config.embedding, &self.config.models);
        tracing::info!(
            fallback_timeout_ms = options.fallback_timeout.as_millis() as u64,
            label_prefix = %options.label_prefix,
            "Embedding manager initialized"
        );
        let manager = EmbeddingManager::new(Arc::clone(&host) as Arc<dyn SurfaceHost>, options);

        self.host = Some(host);
        self.driver = Some(driver);
        self.manager = Some(manager);
    }
}
