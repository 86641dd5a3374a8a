//! In-memory host used by the unit tests.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tokio::sync::{broadcast, oneshot, Notify};

use crate::creation_board::CreationBoard;
use crate::errors::HostError;
use crate::events::{CreationEvent, WindowSignal};
use crate::host::{SurfaceHandle, SurfaceHost, SurfaceSpec};

/// A geometry call recorded by a mock surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum GeometryCall {
    Position(f64, f64),
    Size(f64, f64),
}

#[derive(Default)]
struct MockState {
    live: BTreeMap<String, Arc<MockSurface>>,
    created: Vec<(String, SurfaceSpec)>,
    closes: HashMap<String, usize>,
    fail_closes: bool,
    fail_listing: bool,
    fail_create: Option<String>,
    auto_confirm: bool,
    listing_gate: Option<oneshot::Receiver<()>>,
    on_close: Option<CloseHook>,
}

type CloseHook = Arc<dyn Fn(&str) + Send + Sync>;

type Shared = Arc<Mutex<MockState>>;

fn lock(state: &Shared) -> MutexGuard<'_, MockState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) struct MockHost {
    state: Shared,
    board: Arc<CreationBoard>,
    surfaces: Mutex<HashMap<String, Arc<MockSurface>>>,
    signals: broadcast::Sender<WindowSignal>,
    listing_entered: Notify,
}

impl MockHost {
    pub fn new() -> Arc<Self> {
        let (signals, _) = broadcast::channel(16);
        Arc::new(Self {
            state: Shared::default(),
            board: Arc::new(CreationBoard::new()),
            surfaces: Mutex::new(HashMap::new()),
            signals,
            listing_entered: Notify::new(),
        })
    }

    fn make_surface(&self, label: &str) -> Arc<MockSurface> {
        let surface = Arc::new(MockSurface {
            label: label.to_string(),
            state: Arc::clone(&self.state),
            board: Arc::clone(&self.board),
            calls: Mutex::new(Vec::new()),
        });
        lock(&self.state)
            .live
            .insert(label.to_string(), Arc::clone(&surface));
        self.surfaces
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(label.to_string(), Arc::clone(&surface));
        surface
    }

    /// Put a surface into the host inventory without going through
    /// `create_surface`.
    pub fn spawn_surface(&self, label: &str) -> Arc<dyn SurfaceHandle> {
        self.make_surface(label)
    }

    pub fn surface(&self, label: &str) -> Option<Arc<MockSurface>> {
        self.surfaces
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(label)
            .cloned()
    }

    pub fn confirm(&self, label: &str) {
        self.board.resolve(label, CreationEvent::Created);
    }

    pub fn fail(&self, label: &str, message: &str) {
        self.board
            .resolve(label, CreationEvent::Failed(message.to_string()));
    }

    /// Drop the pending creation subscription without an outcome.
    pub fn abandon(&self, label: &str) {
        self.board.forget(label);
    }

    pub fn signal(&self, signal: WindowSignal) {
        let _ = self.signals.send(signal);
    }

    pub fn created(&self) -> Vec<(String, SurfaceSpec)> {
        lock(&self.state).created.clone()
    }

    pub fn created_labels(&self) -> Vec<String> {
        lock(&self.state)
            .created
            .iter()
            .map(|(l, _)| l.clone())
            .collect()
    }

    pub fn live_labels(&self) -> Vec<String> {
        lock(&self.state).live.keys().cloned().collect()
    }

    pub fn was_closed(&self, label: &str) -> bool {
        self.close_count(label) > 0
    }

    pub fn close_count(&self, label: &str) -> usize {
        lock(&self.state).closes.get(label).copied().unwrap_or(0)
    }

    pub fn fail_closes(&self, fail: bool) {
        lock(&self.state).fail_closes = fail;
    }

    pub fn fail_listing(&self, fail: bool) {
        lock(&self.state).fail_listing = fail;
    }

    pub fn fail_next_create(&self, message: &str) {
        lock(&self.state).fail_create = Some(message.to_string());
    }

    /// Resolve every new surface as created as soon as it is requested.
    pub fn auto_confirm(&self, enabled: bool) {
        lock(&self.state).auto_confirm = enabled;
    }

    /// Park the next `list_surfaces` call until the returned sender fires
    /// (or is dropped). The inventory is read after the release.
    pub fn hold_listing(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        lock(&self.state).listing_gate = Some(rx);
        tx
    }

    /// Resolves once a held `list_surfaces` call is parked.
    pub async fn listing_entered(&self) {
        self.listing_entered.notified().await;
    }

    /// Run `hook` with the label of every surface as it closes.
    pub fn on_close(&self, hook: impl Fn(&str) + Send + Sync + 'static) {
        lock(&self.state).on_close = Some(Arc::new(hook));
    }
}

#[async_trait]
impl SurfaceHost for MockHost {
    async fn create_surface(
        &self,
        label: &str,
        spec: SurfaceSpec,
    ) -> Result<Arc<dyn SurfaceHandle>, HostError> {
        let auto_confirm = {
            let mut state = lock(&self.state);
            if let Some(message) = state.fail_create.take() {
                return Err(HostError::CreateFailed(message));
            }
            state.created.push((label.to_string(), spec));
            state.auto_confirm
        };
        let surface = self.make_surface(label);
        if auto_confirm {
            self.confirm(label);
        }
        Ok(surface)
    }

    async fn list_surfaces(&self) -> Result<Vec<Arc<dyn SurfaceHandle>>, HostError> {
        let gate = lock(&self.state).listing_gate.take();
        if let Some(gate) = gate {
            self.listing_entered.notify_one();
            let _ = gate.await;
        }

        let state = lock(&self.state);
        if state.fail_listing {
            return Err(HostError::Operation("inventory unavailable".into()));
        }
        Ok(state
            .live
            .values()
            .map(|s| Arc::clone(s) as Arc<dyn SurfaceHandle>)
            .collect())
    }

    fn window_signals(&self) -> broadcast::Receiver<WindowSignal> {
        self.signals.subscribe()
    }
}

pub(crate) struct MockSurface {
    label: String,
    state: Shared,
    board: Arc<CreationBoard>,
    calls: Mutex<Vec<GeometryCall>>,
}

impl MockSurface {
    pub fn calls(&self) -> Vec<GeometryCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn clear_calls(&self) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn record(&self, call: GeometryCall) -> Result<(), HostError> {
        if !lock(&self.state).live.contains_key(&self.label) {
            return Err(HostError::SurfaceGone(self.label.clone()));
        }
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
        Ok(())
    }
}

#[async_trait]
impl SurfaceHandle for MockSurface {
    fn label(&self) -> &str {
        &self.label
    }

    async fn set_position(&self, x: f64, y: f64) -> Result<(), HostError> {
        self.record(GeometryCall::Position(x, y))
    }

    async fn set_size(&self, width: f64, height: f64) -> Result<(), HostError> {
        self.record(GeometryCall::Size(width, height))
    }

    async fn close(&self) -> Result<(), HostError> {
        let hook = {
            let mut state = lock(&self.state);
            *state.closes.entry(self.label.clone()).or_default() += 1;
            if state.fail_closes {
                return Err(HostError::Operation("close refused".into()));
            }
            state.live.remove(&self.label);
            state.on_close.clone()
        };
        if let Some(hook) = hook {
            hook(&self.label);
        }
        Ok(())
    }

    fn subscribe_creation(&self) -> oneshot::Receiver<CreationEvent> {
        self.board.subscribe(&self.label)
    }
}
