//! SL client error types.

/// Errors from the SL realtime departures client.
#[derive(Debug, thiserror::Error)]
pub enum SlError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API rejected our credentials
    #[error("unauthorized: check REALTIME_KEY")]
    Unauthorized,

    /// API returned a non-success status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// API answered 200 but reported a failure in its own status field
    #[error("upstream error {code}: {message}")]
    Upstream { code: i64, message: String },

    /// Response body was not the JSON we expected
    #[error("JSON parse error: {message}")]
    Decode { message: String },
}

impl SlError {
    /// Whether this error came from decoding the body rather than the request.
    pub fn is_decode(&self) -> bool {
        matches!(self, SlError::Decode { .. })
    }
}
