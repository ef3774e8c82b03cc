//! Periodic refresh and the state it maintains.
//!
//! [`BoardState`] holds the latest station views and an Idle/Loading status.
//! [`RefreshScheduler`] re-runs the aggregator on a fixed interval, using the
//! status as a gate so that cycles never overlap.

mod scheduler;
mod state;

pub use scheduler::{DEFAULT_REFRESH_INTERVAL, RefreshScheduler};
pub use state::{BoardSnapshot, BoardState, RefreshStatus};
