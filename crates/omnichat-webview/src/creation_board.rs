//! Creation outcomes keyed by surface label.
//!
//! A host backend resolves each label once. Subscribers that arrive after
//! the outcome still receive it, so a surface handle can be subscribed to
//! at any point after the creation request was queued.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::oneshot;

use crate::events::CreationEvent;

#[derive(Default)]
struct Entry {
    outcome: Option<CreationEvent>,
    waiters: Vec<oneshot::Sender<CreationEvent>>,
}

#[derive(Default)]
pub struct CreationBoard {
    entries: Mutex<HashMap<String, Entry>>,
}

impl CreationBoard {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn subscribe(&self, label: &str) -> oneshot::Receiver<CreationEvent> {
        let (tx, rx) = oneshot::channel();
        let mut entries = self.entries();
        let entry = entries.entry(label.to_string()).or_default();
        match &entry.outcome {
            Some(outcome) => {
                let _ = tx.send(outcome.clone());
            }
            None => entry.waiters.push(tx),
        }
        rx
    }

    /// Record the outcome for `label` and wake every waiter. Later calls for
    /// the same label are ignored.
    pub fn resolve(&self, label: &str, event: CreationEvent) {
        let mut entries = self.entries();
        let entry = entries.entry(label.to_string()).or_default();
        if entry.outcome.is_some() {
            return;
        }
        for waiter in entry.waiters.drain(..) {
            let _ = waiter.send(event.clone());
        }
        entry.outcome = Some(event);
    }

    /// Drop everything known about `label`. Pending waiters see their
    /// receiver close.
    pub fn forget(&self, label: &str) {
        self.entries().remove(label);
    }

    pub fn outcome(&self, label: &str) -> Option<CreationEvent> {
        self.entries().get(label).and_then(|e| e.outcome.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn early_subscriber_gets_outcome() {
        let board = CreationBoard::new();
        let rx = board.subscribe("emb-claude-1");
        board.resolve("emb-claude-1", CreationEvent::Created);
        assert_eq!(rx.await.unwrap(), CreationEvent::Created);
    }

    #[tokio::test]
    async fn late_subscriber_gets_recorded_outcome() {
        let board = CreationBoard::new();
        board.resolve("emb-claude-1", CreationEvent::Failed("no display".into()));
        let rx = board.subscribe("emb-claude-1");
        assert_eq!(
            rx.await.unwrap(),
            CreationEvent::Failed("no display".into())
        );
    }

    #[tokio::test]
    async fn first_resolution_wins() {
        let board = CreationBoard::new();
        board.resolve("emb-chatgpt-1", CreationEvent::Created);
        board.resolve("emb-chatgpt-1", CreationEvent::Failed("late".into()));
        assert_eq!(board.outcome("emb-chatgpt-1"), Some(CreationEvent::Created));
    }

    #[tokio::test]
    async fn forget_closes_pending_waiters() {
        let board = CreationBoard::new();
        let rx = board.subscribe("emb-gemini-1");
        board.forget("emb-gemini-1");
        assert!(rx.await.is_err());
        assert_eq!(board.outcome("emb-gemini-1"), None);
    }
}
