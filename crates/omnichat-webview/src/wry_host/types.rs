/// Settings applied to every child webview the backend builds.
#[derive(Debug, Clone)]
pub struct SurfaceOptions {
    /// Whether the webview background should be transparent.
    pub transparent: bool,
    /// Whether to enable dev tools (on in debug builds).
    pub devtools: bool,
    /// Custom user agent string. `None` keeps the platform default, which
    /// the hosted chat sites expect.
    pub user_agent: Option<String>,
    pub clipboard: bool,
    pub autoplay: bool,
}

impl Default for SurfaceOptions {
    fn default() -> Self {
        Self {
            transparent: false,
            devtools: cfg!(debug_assertions),
            user_agent: None,
            clipboard: true,
            autoplay: true,
        }
    }
}
