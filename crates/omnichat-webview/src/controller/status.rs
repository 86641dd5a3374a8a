use std::fmt;

/// Lifecycle state of one slot's embedded surface.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ControllerStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    /// Creation failed. Carries the host's diagnostic.
    Error(String),
}

impl ControllerStatus {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Short lowercase name, suitable for log fields and window titles.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Ready => "ready",
            Self::Error(_) => "error",
        }
    }
}

impl fmt::Display for ControllerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error(message) => write!(f, "error: {message}"),
            other => f.write_str(other.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_idle() {
        assert_eq!(ControllerStatus::default(), ControllerStatus::Idle);
    }

    #[test]
    fn display_includes_error_message() {
        let status = ControllerStatus::Error("webview unavailable".into());
        assert_eq!(status.to_string(), "error: webview unavailable");
        assert_eq!(status.error_message(), Some("webview unavailable"));
        assert_eq!(ControllerStatus::Ready.to_string(), "ready");
    }
}
