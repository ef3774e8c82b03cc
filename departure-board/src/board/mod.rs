//! Departure aggregation.
//!
//! One refresh cycle issues a request per monitored station, waits for all of
//! them, and filters each response into a [`StationView`]. Stations fail
//! independently: a station that cannot be fetched is shown empty.
//!
//! [`StationView`]: crate::domain::StationView

mod aggregator;
mod error;
mod filter;
mod source;
mod station;

pub use aggregator::Aggregator;
pub use error::FetchError;
pub use filter::{BusFilter, StationFilter, TrainFilter};
pub use source::DepartureSource;
pub use station::MonitoredStation;
