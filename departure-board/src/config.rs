//! Process configuration, read from environment variables.
//!
//! Everything is read through a lookup function so tests can supply a map
//! instead of touching the real environment.

use std::collections::BTreeSet;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use crate::board::{BusFilter, MonitoredStation, StationFilter, TrainFilter};
use crate::domain::{DEFAULT_TIME_WINDOW_MINS, SiteId, StationQuery};
use crate::refresh::DEFAULT_REFRESH_INTERVAL;

/// Stations monitored when `STATIONS` is not set.
const DEFAULT_STATIONS: &str = "TULLINGE,SODRA";

const DEFAULT_PAGE_TITLE: &str = "Traffic from/to Tullinge";
const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_STATIC_DIR: &str = "static";
const DEFAULT_SL_TIMEOUT_SECS: u64 = 30;

/// Errors in the startup configuration. All of them are fatal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is unset or empty
    #[error("missing required setting {0}")]
    Missing(String),

    /// A variable is set but cannot be used
    #[error("invalid value for {key}: {message}")]
    Invalid { key: String, message: String },
}

const TULLINGE_BUS_LINES: &[&str] = &["722", "723"];
const SODRA_TRAIN_LINES: &[&str] = &["40", "41"];

/// Built-in defaults for well-known station keys.
struct StationDefaults {
    title: &'static str,
    train_direction: Option<i64>,
    train_lines: Option<&'static [&'static str]>,
    /// Bus lines to show; `None` hides the bus block.
    buses: Option<&'static [&'static str]>,
}

fn station_defaults(key: &str) -> Option<StationDefaults> {
    match key {
        "TULLINGE" => Some(StationDefaults {
            title: "Tullinge Station",
            train_direction: Some(2),
            train_lines: None,
            buses: Some(TULLINGE_BUS_LINES),
        }),
        "SODRA" => Some(StationDefaults {
            title: "Södra Station",
            train_direction: Some(1),
            train_lines: Some(SODRA_TRAIN_LINES),
            buses: None,
        }),
        _ => None,
    }
}

/// Complete application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// SL API key. Empty only in mock mode.
    pub api_key: String,
    /// Monitored stations, in display order.
    pub stations: Vec<MonitoredStation>,
    /// Time between refresh ticks.
    pub refresh_interval: Duration,
    /// Override for the SL base URL.
    pub sl_base_url: Option<String>,
    /// Upstream request timeout in seconds.
    pub sl_timeout_secs: u64,
    /// Directory of canned responses; replaces the live API when set.
    pub mock_dir: Option<PathBuf>,
    /// Address to listen on.
    pub bind_addr: SocketAddr,
    /// Directory served under `/static`.
    pub static_dir: PathBuf,
    /// Document title of the page.
    pub page_title: String,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mock_dir = get("SL_MOCK_DIR").map(PathBuf::from);

        let api_key = match get("REALTIME_KEY").or_else(|| get("API_KEY")) {
            Some(key) => key,
            None if mock_dir.is_some() => String::new(),
            None => return Err(ConfigError::Missing("REALTIME_KEY".to_string())),
        };

        let station_list = get("STATIONS").unwrap_or_else(|| DEFAULT_STATIONS.to_string());
        let stations = split_list(&station_list)
            .map(|key| parse_station(&key.to_uppercase(), &get))
            .collect::<Result<Vec<_>, _>>()?;

        if stations.is_empty() {
            return Err(ConfigError::Invalid {
                key: "STATIONS".to_string(),
                message: "no stations listed".to_string(),
            });
        }

        let refresh_secs: u64 = parse_or(
            "REFRESH_INTERVAL_SECS",
            &get,
            DEFAULT_REFRESH_INTERVAL.as_secs(),
        )?;
        if refresh_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "REFRESH_INTERVAL_SECS".to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        let host: IpAddr = parse_or("HOST", &get, DEFAULT_HOST)?;
        let port: u16 = parse_or("PORT", &get, DEFAULT_PORT)?;

        Ok(Self {
            api_key,
            stations,
            refresh_interval: Duration::from_secs(refresh_secs),
            sl_base_url: get("SL_BASE_URL"),
            sl_timeout_secs: parse_or("SL_TIMEOUT_SECS", &get, DEFAULT_SL_TIMEOUT_SECS)?,
            mock_dir,
            bind_addr: SocketAddr::new(host, port),
            static_dir: get("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR)),
            page_title: get("PAGE_TITLE").unwrap_or_else(|| DEFAULT_PAGE_TITLE.to_string()),
        })
    }
}

/// Build one station from its `{KEY}_*` variables.
fn parse_station<G>(key: &str, get: &G) -> Result<MonitoredStation, ConfigError>
where
    G: Fn(&str) -> Option<String>,
{
    let defaults = station_defaults(key);

    let site_key = format!("{key}_SITE_ID");
    let site_raw = get(&site_key).ok_or_else(|| ConfigError::Missing(site_key.clone()))?;
    let site_id = SiteId::parse(&site_raw).map_err(|e| ConfigError::Invalid {
        key: site_key,
        message: e.to_string(),
    })?;

    let title = get(&format!("{key}_TITLE"))
        .or_else(|| defaults.as_ref().map(|d| d.title.to_string()))
        .unwrap_or_else(|| key.to_string());

    let time_window = parse_or(&format!("{key}_TIME_WINDOW"), get, DEFAULT_TIME_WINDOW_MINS)?;

    let direction_key = format!("{key}_TRAIN_DIRECTION");
    let direction = match get(&direction_key).as_deref() {
        None => defaults.as_ref().and_then(|d| d.train_direction),
        Some("*") => None,
        Some(raw) => Some(raw.parse::<i64>().map_err(|e| ConfigError::Invalid {
            key: direction_key,
            message: e.to_string(),
        })?),
    };

    let train_lines = match get(&format!("{key}_TRAIN_LINES")).as_deref() {
        None => defaults
            .as_ref()
            .and_then(|d| d.train_lines)
            .map(|lines| lines.iter().map(|l| (*l).to_string()).collect::<BTreeSet<_>>()),
        Some("*") => None,
        Some(raw) => Some(split_list(raw).collect::<BTreeSet<_>>()),
    };

    let buses = match get(&format!("{key}_BUS_LINES")).as_deref() {
        None => match &defaults {
            Some(d) => d.buses.map_or(BusFilter::Hidden, |lines| {
                BusFilter::lines(lines.iter().copied())
            }),
            None => BusFilter::All,
        },
        Some("*") => BusFilter::All,
        Some(raw) if raw.eq_ignore_ascii_case("none") => BusFilter::Hidden,
        Some(raw) => BusFilter::Lines(split_list(raw).collect()),
    };

    let filter = StationFilter {
        trains: TrainFilter {
            direction,
            lines: train_lines,
        },
        buses,
    };

    Ok(
        MonitoredStation::new(title, StationQuery::new(site_id).with_time_window(time_window))
            .with_filter(filter),
    )
}

/// Split a comma-separated list, dropping blanks.
fn split_list(raw: &str) -> impl Iterator<Item = String> + '_ {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Parse an optional variable, falling back to `default` when unset.
fn parse_or<T, G>(key: &str, get: &G, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        None => Ok(default),
        Some(raw) => raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
            key: key.to_string(),
            message: e.to_string(),
        }),
    }
}
