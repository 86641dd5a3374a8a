mod app_state;
mod cli;
mod convert;
mod headless;

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;
use winit::event_loop::EventLoop;

use app_state::{AppEvent, OmniChatApp};
use cli::Command;

const DEFAULT_LOG_DIRECTIVE: &str = "omnichat=info";

fn main() {
    let args = cli::parse();

    // The config picks the final log level, but loading it can already warn.
    let startup_directive = args.log_level.as_deref().unwrap_or(DEFAULT_LOG_DIRECTIVE);
    let loaded = with_startup_logging(
        startup_directive,
        std::io::stderr,
        omnichat_config::load_config,
    );
    let config_level = loaded.as_ref().ok().map(|c| c.logging.level.clone());

    let log_directive = args
        .log_level
        .clone()
        .or(config_level)
        .unwrap_or_else(|| DEFAULT_LOG_DIRECTIVE.to_string());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(&log_directive))
        .init();

    let config = loaded.unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        omnichat_config::OmniChatConfig::default()
    });

    match args.command {
        Some(Command::Ask { prompt }) => {
            if let Err(e) = headless::ask(&config, &prompt.join(" ")) {
                eprintln!("omnichat: {e}");
                std::process::exit(1);
            }
        }
        Some(Command::Config { action }) => {
            if let Err(e) = headless::config(config, action) {
                eprintln!("omnichat: {e}");
                std::process::exit(1);
            }
        }
        None => run_gui(config),
    }
}

fn env_filter(directive: &str) -> EnvFilter {
    EnvFilter::from_default_env().add_directive(
        directive
            .parse()
            .unwrap_or_else(|_| DEFAULT_LOG_DIRECTIVE.parse().unwrap()),
    )
}

/// Run `load` under a provisional subscriber writing to `writer`, so events
/// emitted before the global subscriber exists still reach the user.
fn with_startup_logging<W, T>(directive: &str, writer: W, load: impl FnOnce() -> T) -> T
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter(directive))
        .with_writer(writer)
        .with_ansi(false)
        .finish();
    tracing::subscriber::with_default(subscriber, load)
}

fn run_gui(config: omnichat_config::OmniChatConfig) {
    tracing::info!("OmniChat v{} starting...", env!("CARGO_PKG_VERSION"));

    let event_loop = EventLoop::<AppEvent>::with_user_event()
        .build()
        .expect("failed to create event loop");
    let mut app = OmniChatApp::new(config, event_loop.create_proxy());

    tracing::info!("Entering event loop");
    if let Err(e) = event_loop.run_app(&mut app) {
        tracing::error!("Event loop error: {e}");
    }
    tracing::info!("Shutdown complete");
}
