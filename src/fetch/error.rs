use thiserror::Error;

/// Failures of a single fetch attempt, and the terminal error that wraps the last
/// one once every attempt has been used.
///
/// Cloneable so that one failed station-list load can be handed to every caller
/// that was waiting on it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    #[error("Network request failed for {url}: {message}")]
    Network { url: String, message: String },

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Invalid JSON response from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("Giving up on {url} after {attempts} attempts: {last}")]
    RetriesExhausted {
        url: String,
        attempts: u32,
        #[source]
        last: Box<FetchError>,
    },
}

/// The category of a [`FetchError`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchErrorKind {
    Network,
    HttpStatus,
    Decode,
    RetriesExhausted,
}

impl FetchError {
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::Network { .. } => FetchErrorKind::Network,
            FetchError::HttpStatus { .. } => FetchErrorKind::HttpStatus,
            FetchError::Decode { .. } => FetchErrorKind::Decode,
            FetchError::RetriesExhausted { .. } => FetchErrorKind::RetriesExhausted,
        }
    }

    /// The underlying attempt failure; `self` for anything but `RetriesExhausted`.
    pub fn last_cause(&self) -> &FetchError {
        match self {
            FetchError::RetriesExhausted { last, .. } => last.last_cause(),
            other => other,
        }
    }

    /// HTTP status of the last attempt, if it got that far.
    pub fn status(&self) -> Option<u16> {
        match self.last_cause() {
            FetchError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
