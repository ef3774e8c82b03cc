//! Shared board state: the latest views plus the refresh status.

use std::sync::Arc;

use chrono::{DateTime, Local};
use serde::Serialize;
use tokio::sync::watch;

use crate::domain::StationView;

/// Whether a refresh cycle is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RefreshStatus {
    Idle,
    Loading,
}

impl RefreshStatus {
    pub fn is_loading(self) -> bool {
        self == RefreshStatus::Loading
    }
}

/// Everything the presentation layer reads, taken at one instant.
#[derive(Debug, Clone)]
pub struct BoardSnapshot {
    /// Views from the most recent completed cycle.
    pub views: Arc<Vec<StationView>>,
    /// Current refresh status.
    pub status: RefreshStatus,
    /// Number of completed cycles.
    pub generation: u64,
    /// When the most recent cycle completed.
    pub updated_at: Option<DateTime<Local>>,
}

impl Default for BoardSnapshot {
    fn default() -> Self {
        Self {
            views: Arc::new(Vec::new()),
            status: RefreshStatus::Idle,
            generation: 0,
            updated_at: None,
        }
    }
}

/// Handle to the board state.
///
/// Cloning is cheap; all clones see the same state. Only the refresh
/// scheduler writes, everything else reads or subscribes.
#[derive(Clone)]
pub struct BoardState {
    tx: Arc<watch::Sender<BoardSnapshot>>,
}

impl BoardState {
    /// Create an empty, idle board.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(BoardSnapshot::default());
        Self { tx: Arc::new(tx) }
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> BoardSnapshot {
        self.tx.borrow().clone()
    }

    /// Views from the most recent completed cycle.
    pub fn current_views(&self) -> Arc<Vec<StationView>> {
        Arc::clone(&self.tx.borrow().views)
    }

    /// Current refresh status.
    pub fn status(&self) -> RefreshStatus {
        self.tx.borrow().status
    }

    /// Number of completed cycles.
    pub fn generation(&self) -> u64 {
        self.tx.borrow().generation
    }

    /// Subscribe to changes. The receiver is notified on every status
    /// transition, including each completed cycle.
    pub fn subscribe(&self) -> watch::Receiver<BoardSnapshot> {
        self.tx.subscribe()
    }

    /// Move from `Idle` to `Loading`.
    ///
    /// Returns `false`, changing nothing, if a cycle is already in flight.
    pub fn try_begin_cycle(&self) -> bool {
        self.tx.send_if_modified(|snapshot| {
            if snapshot.status.is_loading() {
                return false;
            }
            snapshot.status = RefreshStatus::Loading;
            true
        })
    }

    /// Replace the views with a cycle's results and return to `Idle`.
    pub fn complete_cycle(&self, views: Vec<StationView>) {
        self.tx.send_modify(|snapshot| {
            snapshot.views = Arc::new(views);
            snapshot.status = RefreshStatus::Idle;
            snapshot.generation += 1;
            snapshot.updated_at = Some(Local::now());
        });
    }

    /// Return to `Idle` keeping the previous views.
    pub fn abort_cycle(&self) {
        self.tx.send_if_modified(|snapshot| {
            if !snapshot.status.is_loading() {
                return false;
            }
            snapshot.status = RefreshStatus::Idle;
            true
        });
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle_and_empty() {
        let state = BoardState::new();
        assert_eq!(state.status(), RefreshStatus::Idle);
        assert_eq!(state.generation(), 0);
        assert!(state.current_views().is_empty());
        assert!(state.snapshot().updated_at.is_none());
    }

    #[test]
    fn only_one_cycle_at_a_time() {
        let state = BoardState::new();

        assert!(state.try_begin_cycle());
        assert_eq!(state.status(), RefreshStatus::Loading);
        assert!(!state.try_begin_cycle());

        state.complete_cycle(vec![StationView::empty("A")]);
        assert_eq!(state.status(), RefreshStatus::Idle);
        assert!(state.try_begin_cycle());
    }

    #[test]
    fn complete_replaces_views_wholesale() {
        let state = BoardState::new();

        state.try_begin_cycle();
        state.complete_cycle(vec![StationView::empty("A"), StationView::empty("B")]);
        assert_eq!(state.generation(), 1);
        assert_eq!(state.current_views().len(), 2);
        assert!(state.snapshot().updated_at.is_some());

        state.try_begin_cycle();
        state.complete_cycle(vec![StationView::empty("C")]);
        assert_eq!(state.generation(), 2);
        assert_eq!(*state.current_views(), vec![StationView::empty("C")]);
    }

    #[test]
    fn abort_keeps_previous_views() {
        let state = BoardState::new();
        state.try_begin_cycle();
        state.complete_cycle(vec![StationView::empty("A")]);

        state.try_begin_cycle();
        state.abort_cycle();
        assert_eq!(state.status(), RefreshStatus::Idle);
        assert_eq!(state.generation(), 1);
        assert_eq!(*state.current_views(), vec![StationView::empty("A")]);
    }

    #[test]
    fn held_views_survive_replacement() {
        let state = BoardState::new();
        state.try_begin_cycle();
        state.complete_cycle(vec![StationView::empty("old")]);

        let held = state.current_views();
        state.try_begin_cycle();
        state.complete_cycle(vec![StationView::empty("new")]);

        assert_eq!(held[0].title, "old");
        assert_eq!(state.current_views()[0].title, "new");
    }

    #[tokio::test]
    async fn subscribers_see_transitions() {
        let state = BoardState::new();
        let mut rx = state.subscribe();

        state.try_begin_cycle();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().status, RefreshStatus::Loading);

        // A rejected begin is not a change
        state.try_begin_cycle();
        assert!(!rx.has_changed().unwrap());

        state.complete_cycle(vec![]);
        rx.changed().await.unwrap();
        let snapshot = rx.borrow_and_update().clone();
        assert_eq!(snapshot.status, RefreshStatus::Idle);
        assert_eq!(snapshot.generation, 1);
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&RefreshStatus::Loading).unwrap(),
            "\"loading\""
        );
    }
}
