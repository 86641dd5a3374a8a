//! Error types for host operations and controller preconditions.

/// Failure reported by the host windowing runtime.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    #[error("surface creation failed: {0}")]
    CreateFailed(String),

    #[error("surface not found: {0}")]
    SurfaceGone(String),

    #[error("host operation failed: {0}")]
    Operation(String),

    #[error("host is no longer running")]
    Disconnected,
}

/// Failure to start an embedding controller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmbedError {
    #[error("geometry source for slot {slot} is not mounted")]
    SourceUnmounted { slot: String },
}
