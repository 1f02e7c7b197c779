use thiserror::Error;

/// Failure classes surfaced by the fetch layer.
///
/// Every variant is terminal for the load cycle that produced it; the only
/// retry the client performs is its built-in today -> yesterday fallback.
/// `Display` output is the message observers see, so it must stay readable.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure: DNS, connection refused/reset, timeout.
    #[error("network request failed: {0}")]
    Network(String),

    /// Non-success HTTP status on a date-scoped request.
    #[error("HTTP {code}: {status}")]
    Http { code: u16, status: String },

    /// The source answered, but reports no record for the requested date.
    #[error("no image for {date}: {message}")]
    NoImageForDate { date: String, message: String },

    /// Malformed JSON, or a field present with the wrong shape.
    #[error("response could not be parsed: {0}")]
    Parse(String),

    /// Anything that does not fit the classes above.
    #[error("{0}")]
    Unknown(String),
}

impl FetchError {
    /// Classify a client-side request error. Timeouts and connect failures
    /// are transport problems; the rest (builder misuse, redirect policy)
    /// stays uncategorized.
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() || err.is_request() {
            FetchError::Network(err.to_string())
        } else {
            FetchError::Unknown(err.to_string())
        }
    }
}
