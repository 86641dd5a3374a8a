use tokio::sync::oneshot;

use crate::errors::HostError;
use crate::host::SurfaceSpec;

pub(crate) type Reply<T> = oneshot::Sender<Result<T, HostError>>;

/// Work queued for the UI thread.
pub(crate) enum HostCommand {
    /// Fire-and-forget; the outcome goes to the creation board.
    Create { label: String, spec: SurfaceSpec },
    SetPosition {
        label: String,
        x: f64,
        y: f64,
        reply: Reply<()>,
    },
    SetSize {
        label: String,
        width: f64,
        height: f64,
        reply: Reply<()>,
    },
    Close { label: String, reply: Reply<()> },
    List { reply: Reply<Vec<String>> },
}

impl HostCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Create { .. } => "create",
            Self::SetPosition { .. } => "set_position",
            Self::SetSize { .. } => "set_size",
            Self::Close { .. } => "close",
            Self::List { .. } => "list",
        }
    }
}
