//! Host event types.

/// Outcome of a surface creation request, delivered at most once per
/// subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreationEvent {
    /// The host confirmed the surface exists.
    Created,
    /// The host failed to establish the surface. Carries the diagnostic.
    Failed(String),
}

/// Window-level geometry notifications from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowSignal {
    Moved,
    Resized,
}
