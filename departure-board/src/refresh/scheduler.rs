//! Periodic refresh of the board.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::FutureExt;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

use crate::board::{Aggregator, DepartureSource};

use super::state::BoardState;

/// How often to refresh when nothing else is configured.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(10);

/// Drives the aggregator on a fixed interval.
///
/// Ticks that arrive while a cycle is still in flight are dropped, not
/// queued, so at most one cycle runs at any time.
pub struct RefreshScheduler<S> {
    aggregator: Arc<Aggregator<S>>,
    state: BoardState,
    interval: Duration,
}

impl<S: DepartureSource + 'static> RefreshScheduler<S> {
    /// Create a scheduler that writes into `state`.
    pub fn new(aggregator: Aggregator<S>, state: BoardState, interval: Duration) -> Self {
        Self {
            aggregator: Arc::new(aggregator),
            state,
            interval,
        }
    }

    /// The board state this scheduler writes to.
    pub fn state(&self) -> &BoardState {
        &self.state
    }

    /// Run one cycle to completion, so the first page render has data.
    pub async fn prime(&self) {
        if self.state.try_begin_cycle() {
            run_cycle(&self.aggregator, &self.state).await;
        }
    }

    /// Start a cycle unless one is already in flight.
    ///
    /// Returns the handle of the spawned cycle, or `None` if the tick was
    /// dropped.
    pub fn tick(&self) -> Option<JoinHandle<()>> {
        if !self.state.try_begin_cycle() {
            debug!("refresh still in flight, dropping tick");
            return None;
        }

        let aggregator = Arc::clone(&self.aggregator);
        let state = self.state.clone();
        Some(tokio::spawn(async move {
            run_cycle(&aggregator, &state).await;
        }))
    }

    /// Tick forever. The first tick happens one interval from now.
    pub async fn run(self) {
        info!(interval_secs = self.interval.as_secs_f64(), "refresh scheduler started");

        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        interval.tick().await; // First tick is immediate, skip it

        loop {
            interval.tick().await;
            // Cycles run detached and publish into the board state.
            self.tick();
        }
    }

    /// Spawn [`Self::run`] as a background task.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }
}

/// Fetch everything and publish the result.
///
/// The aggregator isolates station failures itself, so the only way a cycle
/// fails as a whole is a panic. In that case the previous views are kept.
async fn run_cycle<S: DepartureSource>(aggregator: &Aggregator<S>, state: &BoardState) {
    let started = Instant::now();

    match AssertUnwindSafe(aggregator.fetch_all()).catch_unwind().await {
        Ok(views) => {
            state.complete_cycle(views);
            debug!(
                generation = state.generation(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "refresh cycle complete"
            );
        }
        Err(_) => {
            error!("refresh cycle panicked, keeping previous departures");
            state.abort_cycle();
        }
    }
}
