//! OmniChatApp struct definition and constructor.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use winit::event_loop::EventLoopProxy;
use winit::window::Window;

use omnichat_config::OmniChatConfig;
use omnichat_layout::{LayoutEngine, Selection, SlotKey};
use omnichat_webview::wry_host::{WryHost, WryHostDriver};
use omnichat_webview::EmbeddingManager;

use super::types::{AppEvent, SlotCommand, SlotEntry};
use crate::convert::layout_engine;

/// Top-level application state.
pub struct OmniChatApp {
    pub(super) config: OmniChatConfig,
    pub(super) proxy: EventLoopProxy<AppEvent>,

    // Windowing
    pub(super) window: Option<Arc<Window>>,

    // Embedding
    pub(super) host: Option<Arc<WryHost>>,
    pub(super) driver: Option<WryHostDriver>,
    pub(super) manager: Option<EmbeddingManager>,
    pub(super) tokio_runtime: Option<tokio::runtime::Runtime>,
    pub(super) slot_tx: Option<tokio::sync::mpsc::UnboundedSender<SlotCommand>>,

    // Which tabs are on screen and where
    pub(super) selection: Selection,
    pub(super) layout: LayoutEngine,
    pub(super) slot_keys: Vec<SlotKey>,
    pub(super) slots: HashMap<SlotKey, SlotEntry>,

    pub(super) title: String,
    pub(super) shutdown_deadline: Option<Instant>,
    pub(super) should_exit: bool,
}

impl OmniChatApp {
    pub fn new(config: OmniChatConfig, proxy: EventLoopProxy<AppEvent>) -> Self {
        let layout = layout_engine(&config.layout);
        Self {
            config,
            proxy,
            window: None,
            host: None,
            driver: None,
            manager: None,
            tokio_runtime: None,
            slot_tx: None,
            selection: Selection::default(),
            layout,
            slot_keys: Vec::new(),
            slots: HashMap::new(),
            title: String::new(),
            shutdown_deadline: None,
            should_exit: false,
        }
    }

    pub(super) fn is_shutting_down(&self) -> bool {
        self.shutdown_deadline.is_some()
    }
}
