//! Site identifier types.

use std::fmt;

use serde::Serialize;

/// Error returned when parsing an invalid site identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid site id: {reason}")]
pub struct InvalidSiteId {
    reason: &'static str,
}

/// An SL site identifier.
///
/// Site ids are opaque to us (in practice they are short digit strings), but
/// they end up in query strings and in mock file names, so only ASCII
/// letters, digits, `-` and `_` are accepted.
///
/// # Examples
///
/// ```
/// use departure_board::domain::SiteId;
///
/// let site = SiteId::parse(" 9525 ").unwrap();
/// assert_eq!(site.as_str(), "9525");
///
/// assert!(SiteId::parse("").is_err());
/// assert!(SiteId::parse("../etc").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SiteId(String);

impl SiteId {
    /// Parse a site id, ignoring surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidSiteId> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(InvalidSiteId {
                reason: "must not be empty",
            });
        }

        if !trimmed
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
        {
            return Err(InvalidSiteId {
                reason: "must contain only ASCII letters, digits, '-' or '_'",
            });
        }

        Ok(SiteId(trimmed.to_string()))
    }

    /// Returns the site id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SiteId({})", self.0)
    }
}

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
