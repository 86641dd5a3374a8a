//! A shared, observable rectangle that stands in for a slot's on-screen area.

use std::sync::{Mutex, PoisonError};

use omnichat_common::Geometry;
use tokio::sync::watch;

use crate::host::GeometrySource;

/// Layout writes into a `Placeholder`; the synchronizer reads from it.
///
/// Every [`Placeholder::set`] that changes the rect notifies subscribers.
pub struct Placeholder {
    rect: Mutex<Option<Geometry>>,
    notify: watch::Sender<()>,
}

impl Placeholder {
    /// A placeholder that is not mounted yet.
    pub fn unmounted() -> Self {
        let (notify, _) = watch::channel(());
        Self {
            rect: Mutex::new(None),
            notify,
        }
    }

    pub fn mounted(rect: Geometry) -> Self {
        let placeholder = Self::unmounted();
        placeholder.set(Some(rect));
        placeholder
    }

    /// Update the rect. Returns `true` if it changed.
    pub fn set(&self, rect: Option<Geometry>) -> bool {
        let mut current = self.rect.lock().unwrap_or_else(PoisonError::into_inner);
        if *current == rect {
            return false;
        }
        *current = rect;
        drop(current);
        self.notify.send_replace(());
        true
    }

    pub fn unmount(&self) -> bool {
        self.set(None)
    }

    pub fn is_mounted(&self) -> bool {
        self.bounds().is_some()
    }
}

impl GeometrySource for Placeholder {
    fn bounds(&self) -> Option<Geometry> {
        *self.rect.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn changes(&self) -> Option<watch::Receiver<()>> {
        Some(self.notify.subscribe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmounted_has_no_bounds() {
        let p = Placeholder::unmounted();
        assert!(!p.is_mounted());
        assert_eq!(p.bounds(), None);
    }

    #[test]
    fn set_reports_changes_only() {
        let p = Placeholder::unmounted();
        let rect = Geometry::new(0.0, 80.0, 1280.0, 720.0);
        assert!(p.set(Some(rect)));
        assert!(!p.set(Some(rect)));
        assert_eq!(p.bounds(), Some(rect));
        assert!(p.unmount());
        assert!(!p.unmount());
    }

    #[tokio::test]
    async fn subscribers_see_changes() {
        let p = Placeholder::mounted(Geometry::new(0.0, 0.0, 10.0, 10.0));
        let mut rx = p.changes().unwrap();
        p.set(Some(Geometry::new(0.0, 0.0, 20.0, 10.0)));
        rx.changed().await.unwrap();
    }
}
