//! Per-station departure filters.

use std::collections::BTreeSet;

use crate::domain::DepartureEvent;

/// Which trains to keep for a station.
///
/// An unset criterion accepts everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrainFilter {
    /// Keep only this journey direction.
    pub direction: Option<i64>,
    /// Keep only these line numbers.
    pub lines: Option<BTreeSet<String>>,
}

impl TrainFilter {
    /// A filter that keeps every train.
    pub fn any() -> Self {
        Self::default()
    }

    /// Keep only trains heading in `direction`.
    pub fn towards(direction: i64) -> Self {
        Self {
            direction: Some(direction),
            lines: None,
        }
    }

    /// Restrict to the given line numbers.
    pub fn with_lines<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lines = Some(lines.into_iter().map(Into::into).collect());
        self
    }

    /// Whether a single departure passes the filter.
    pub fn accepts(&self, departure: &DepartureEvent) -> bool {
        self.direction
            .is_none_or(|dir| departure.journey_direction == dir)
            && self
                .lines
                .as_ref()
                .is_none_or(|lines| lines.contains(&departure.line_number))
    }

    /// Keep the accepted departures, preserving their order.
    pub fn apply(&self, trains: Vec<DepartureEvent>) -> Vec<DepartureEvent> {
        trains.into_iter().filter(|t| self.accepts(t)).collect()
    }
}

/// Which buses to show for a station.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BusFilter {
    /// No bus block for this station.
    Hidden,
    /// Every bus departure.
    #[default]
    All,
    /// Only these line numbers.
    Lines(BTreeSet<String>),
}

impl BusFilter {
    /// Show only the given bus lines.
    pub fn lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        BusFilter::Lines(lines.into_iter().map(Into::into).collect())
    }

    /// Filter upstream buses. Returns `None` when buses are hidden or the
    /// upstream list was absent.
    pub fn apply(&self, buses: Option<Vec<DepartureEvent>>) -> Option<Vec<DepartureEvent>> {
        match self {
            BusFilter::Hidden => None,
            BusFilter::All => buses,
            BusFilter::Lines(lines) => buses.map(|buses| {
                buses
                    .into_iter()
                    .filter(|b| lines.contains(&b.line_number))
                    .collect()
            }),
        }
    }

    /// Heading for the bus block, e.g. "Buss 722/723".
    pub fn heading(&self) -> Option<String> {
        match self {
            BusFilter::Hidden => None,
            BusFilter::All => Some("Buss".to_string()),
            BusFilter::Lines(lines) => Some(format!(
                "Buss {}",
                lines.iter().map(String::as_str).collect::<Vec<_>>().join("/")
            )),
        }
    }
}

/// The complete filter policy for one station.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StationFilter {
    pub trains: TrainFilter,
    pub buses: BusFilter,
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_departure() -> impl Strategy<Value = DepartureEvent> {
        ("(40|41|43|48|722|723)", 1i64..=2, 0i64..10_000).prop_map(|(line, dir, journey)| {
            DepartureEvent {
                line_number: line,
                destination: "Dest".to_string(),
                display_time: "1 min".to_string(),
                journey_number: journey,
                journey_direction: dir,
                deviations: vec![],
            }
        })
    }

    proptest! {
        /// Every kept train matches the direction, and nothing matching is dropped
        #[test]
        fn direction_filter_is_exact(
            trains in prop::collection::vec(arb_departure(), 0..30),
            dir in 1i64..=2,
        ) {
            let kept = TrainFilter::towards(dir).apply(trains.clone());
            let expected: Vec<_> = trains.into_iter().filter(|t| t.journey_direction == dir).collect();
            prop_assert_eq!(kept, expected);
        }

        /// Bus line filtering yields an order-preserving subsequence
        #[test]
        fn bus_filter_is_subsequence(buses in prop::collection::vec(arb_departure(), 0..30)) {
            let kept = BusFilter::lines(["722", "723"]).apply(Some(buses.clone())).unwrap();
            prop_assert!(kept.iter().all(|b| b.line_number == "722" || b.line_number == "723"));

            let mut remaining = buses.iter();
            for bus in &kept {
                prop_assert!(remaining.any(|b| b == bus));
            }
        }

        /// Filtering twice is the same as filtering once
        #[test]
        fn train_filter_idempotent(trains in prop::collection::vec(arb_departure(), 0..30)) {
            let filter = TrainFilter::towards(1).with_lines(["40", "41"]);
            let once = filter.apply(trains);
            prop_assert_eq!(filter.apply(once.clone()), once);
        }
    }
}
