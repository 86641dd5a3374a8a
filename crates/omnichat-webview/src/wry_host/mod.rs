//! `wry` child-webview backend.
//!
//! `wry` webviews are not `Send` and must be touched from the thread that
//! owns the parent window. [`WryHost`] is the async, thread-safe half: it
//! queues [`HostCommand`]s and wakes the UI thread. [`WryHostDriver`] is
//! the UI-thread half: it owns every `wry::WebView` and applies queued
//! commands when the event loop calls [`WryHostDriver::process_pending`].

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::trace;

use crate::creation_board::CreationBoard;
use crate::errors::HostError;
use crate::events::{CreationEvent, WindowSignal};
use crate::host::{SurfaceHandle, SurfaceHost, SurfaceSpec};

mod command;
mod driver;
mod types;

use command::{HostCommand, Reply};
pub use driver::WryHostDriver;
pub use types::SurfaceOptions;

type Wake = Arc<dyn Fn() + Send + Sync>;

/// Build a connected host/driver pair. `wake` is called after every queued
/// command and must make the UI thread call `process_pending` soon.
pub fn channel<F>(options: SurfaceOptions, wake: F) -> (WryHost, WryHostDriver)
where
    F: Fn() + Send + Sync + 'static,
{
    let (commands, queue) = mpsc::unbounded_channel();
    let (signals, _) = broadcast::channel(64);
    let board = Arc::new(CreationBoard::new());
    let link = Link {
        commands,
        wake: Arc::new(wake),
    };
    let host = WryHost {
        link,
        board: Arc::clone(&board),
        signals,
    };
    (host, WryHostDriver::new(queue, board, options))
}

#[derive(Clone)]
struct Link {
    commands: mpsc::UnboundedSender<HostCommand>,
    wake: Wake,
}

impl Link {
    fn send(&self, command: HostCommand) -> Result<(), HostError> {
        trace!(command = command.name(), "queueing host command");
        self.commands
            .send(command)
            .map_err(|_| HostError::Disconnected)?;
        (self.wake)();
        Ok(())
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(Reply<T>) -> HostCommand,
    ) -> Result<T, HostError> {
        let (reply, response) = oneshot::channel();
        self.send(build(reply))?;
        response.await.map_err(|_| HostError::Disconnected)?
    }
}

/// Thread-safe front of the `wry` backend.
pub struct WryHost {
    link: Link,
    board: Arc<CreationBoard>,
    signals: broadcast::Sender<WindowSignal>,
}

impl WryHost {
    /// Forward a window move/resize from the event loop.
    pub fn notify_window(&self, signal: WindowSignal) {
        let _ = self.signals.send(signal);
    }

    fn surface(&self, label: &str) -> Arc<dyn SurfaceHandle> {
        Arc::new(WrySurface {
            label: label.to_string(),
            link: self.link.clone(),
            board: Arc::clone(&self.board),
        })
    }
}

#[async_trait]
impl SurfaceHost for WryHost {
    async fn create_surface(
        &self,
        label: &str,
        spec: SurfaceSpec,
    ) -> Result<Arc<dyn SurfaceHandle>, HostError> {
        self.link.send(HostCommand::Create {
            label: label.to_string(),
            spec,
        })?;
        Ok(self.surface(label))
    }

    async fn list_surfaces(&self) -> Result<Vec<Arc<dyn SurfaceHandle>>, HostError> {
        let labels = self.link.request(|reply| HostCommand::List { reply }).await?;
        Ok(labels.iter().map(|label| self.surface(label)).collect())
    }

    fn window_signals(&self) -> broadcast::Receiver<WindowSignal> {
        self.signals.subscribe()
    }
}

struct WrySurface {
    label: String,
    link: Link,
    board: Arc<CreationBoard>,
}

#[async_trait]
impl SurfaceHandle for WrySurface {
    fn label(&self) -> &str {
        &self.label
    }

    async fn set_position(&self, x: f64, y: f64) -> Result<(), HostError> {
        let label = self.label.clone();
        self.link
            .request(|reply| HostCommand::SetPosition { label, x, y, reply })
            .await
    }

    async fn set_size(&self, width: f64, height: f64) -> Result<(), HostError> {
        let label = self.label.clone();
        self.link
            .request(|reply| HostCommand::SetSize {
                label,
                width,
                height,
                reply,
            })
            .await
    }

    async fn close(&self) -> Result<(), HostError> {
        let label = self.label.clone();
        self.link
            .request(|reply| HostCommand::Close { label, reply })
            .await
    }

    fn subscribe_creation(&self) -> oneshot::Receiver<CreationEvent> {
        self.board.subscribe(&self.label)
    }
}
