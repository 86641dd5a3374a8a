//! Boundary to the native windowing runtime.
//!
//! Everything the lifecycle manager needs from the host is expressed here:
//! creating a surface, moving/resizing/closing it, learning whether creation
//! succeeded, enumerating live surfaces, and hearing about window moves.

use std::sync::Arc;

use async_trait::async_trait;
use omnichat_common::Geometry;
use tokio::sync::{broadcast, oneshot, watch};

use crate::errors::HostError;
use crate::events::{CreationEvent, WindowSignal};

/// What to load and where, for a new surface.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceSpec {
    pub url: String,
    pub geometry: Geometry,
}

/// One embedded native web surface.
///
/// All operations are asynchronous and independently fallible. `close`
/// must tolerate being called on a surface that is already gone.
#[async_trait]
pub trait SurfaceHandle: Send + Sync {
    /// The unique label the surface was created with.
    fn label(&self) -> &str;

    async fn set_position(&self, x: f64, y: f64) -> Result<(), HostError>;

    async fn set_size(&self, width: f64, height: f64) -> Result<(), HostError>;

    async fn close(&self) -> Result<(), HostError>;

    /// One-shot subscription to the creation outcome. The receiver resolves
    /// at most once; it errors if the host drops the surface without
    /// reporting an outcome.
    fn subscribe_creation(&self) -> oneshot::Receiver<CreationEvent>;
}

/// The host windowing runtime.
#[async_trait]
pub trait SurfaceHost: Send + Sync {
    /// Request a new child surface in the main window. Returns as soon as the
    /// request is accepted; the outcome arrives via
    /// [`SurfaceHandle::subscribe_creation`].
    async fn create_surface(
        &self,
        label: &str,
        spec: SurfaceSpec,
    ) -> Result<Arc<dyn SurfaceHandle>, HostError>;

    /// Every live surface host-wide, including ones this process never
    /// registered.
    async fn list_surfaces(&self) -> Result<Vec<Arc<dyn SurfaceHandle>>, HostError>;

    /// Window move/resize notifications.
    fn window_signals(&self) -> broadcast::Receiver<WindowSignal>;
}

/// The placeholder a surface tracks.
pub trait GeometrySource: Send + Sync {
    /// Current bounding box, or `None` when the placeholder is not mounted.
    fn bounds(&self) -> Option<Geometry>;

    /// Size-change notifications for the placeholder itself, if it can
    /// provide them.
    fn changes(&self) -> Option<watch::Receiver<()>> {
        None
    }
}
