use std::collections::HashMap;
use std::sync::Arc;

use omnichat_common::Geometry;
use tokio::sync::mpsc;
use tracing::{debug, warn};
use wry::dpi::{LogicalPosition, LogicalSize, Position, Size};
use wry::raw_window_handle;
use wry::{Rect, WebView, WebViewBuilder};

use super::command::HostCommand;
use super::types::SurfaceOptions;
use crate::creation_board::CreationBoard;
use crate::errors::HostError;
use crate::events::CreationEvent;
use crate::host::SurfaceSpec;

/// UI-thread half of the `wry` backend. Owns every live webview.
pub struct WryHostDriver {
    queue: mpsc::UnboundedReceiver<HostCommand>,
    board: Arc<CreationBoard>,
    options: SurfaceOptions,
    surfaces: HashMap<String, WebView>,
}

impl WryHostDriver {
    pub(super) fn new(
        queue: mpsc::UnboundedReceiver<HostCommand>,
        board: Arc<CreationBoard>,
        options: SurfaceOptions,
    ) -> Self {
        Self {
            queue,
            board,
            options,
            surfaces: HashMap::new(),
        }
    }

    /// Apply every queued command against `window`. Returns how many were
    /// applied. Must be called on the thread that owns `window`.
    pub fn process_pending<W: raw_window_handle::HasWindowHandle>(&mut self, window: &W) -> usize {
        let mut applied = 0;
        while let Ok(command) = self.queue.try_recv() {
            self.apply(window, command);
            applied += 1;
        }
        applied
    }

    fn apply<W: raw_window_handle::HasWindowHandle>(&mut self, window: &W, command: HostCommand) {
        match command {
            HostCommand::Create { label, spec } => self.create(window, label, spec),
            HostCommand::SetPosition { label, x, y, reply } => {
                let _ = reply.send(self.update_bounds(&label, |rect| {
                    rect.position = Position::Logical(LogicalPosition::new(x, y));
                }));
            }
            HostCommand::SetSize {
                label,
                width,
                height,
                reply,
            } => {
                let _ = reply.send(self.update_bounds(&label, |rect| {
                    rect.size = Size::Logical(LogicalSize::new(width, height));
                }));
            }
            HostCommand::Close { label, reply } => {
                if self.surfaces.remove(&label).is_some() {
                    debug!(label = %label, "webview destroyed");
                }
                self.board.forget(&label);
                let _ = reply.send(Ok(()));
            }
            HostCommand::List { reply } => {
                let _ = reply.send(Ok(self.labels()));
            }
        }
    }

    fn create<W: raw_window_handle::HasWindowHandle>(
        &mut self,
        window: &W,
        label: String,
        spec: SurfaceSpec,
    ) {
        if self.surfaces.contains_key(&label) {
            self.board.resolve(
                &label,
                CreationEvent::Failed(format!("label {label} already in use")),
            );
            return;
        }

        let mut builder = WebViewBuilder::new()
            .with_bounds(to_rect(&spec.geometry))
            .with_transparent(self.options.transparent)
            .with_devtools(self.options.devtools)
            .with_clipboard(self.options.clipboard)
            .with_autoplay(self.options.autoplay)
            .with_focused(false)
            .with_url(&spec.url);

        if let Some(ua) = &self.options.user_agent {
            builder = builder.with_user_agent(ua);
        }

        match builder.build_as_child(window) {
            Ok(webview) => {
                debug!(label = %label, url = %spec.url, "webview created");
                self.surfaces.insert(label.clone(), webview);
                self.board.resolve(&label, CreationEvent::Created);
            }
            Err(e) => {
                warn!(label = %label, error = %e, "webview creation failed");
                self.board
                    .resolve(&label, CreationEvent::Failed(e.to_string()));
            }
        }
    }

    fn update_bounds(&self, label: &str, change: impl FnOnce(&mut Rect)) -> Result<(), HostError> {
        let webview = self
            .surfaces
            .get(label)
            .ok_or_else(|| HostError::SurfaceGone(label.to_string()))?;
        let mut rect = webview
            .bounds()
            .map_err(|e| HostError::Operation(e.to_string()))?;
        change(&mut rect);
        webview
            .set_bounds(rect)
            .map_err(|e| HostError::Operation(e.to_string()))
    }

    pub fn labels(&self) -> Vec<String> {
        self.surfaces.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    /// Destroy every webview immediately. Last-resort cleanup when the
    /// window is going away before queued closes could be applied.
    pub fn destroy_all(&mut self) {
        for label in self.surfaces.keys() {
            self.board.forget(label);
        }
        self.surfaces.clear();
    }
}

fn to_rect(geometry: &Geometry) -> Rect {
    Rect {
        position: Position::Logical(LogicalPosition::new(geometry.x, geometry.y)),
        size: Size::Logical(LogicalSize::new(geometry.width, geometry.height)),
    }
}
