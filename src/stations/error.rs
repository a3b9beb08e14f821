use crate::fetch::error::FetchError;
use thiserror::Error;

/// Why the station list could not be loaded.
///
/// Cloneable because every caller waiting on the same in-flight load receives
/// the same outcome.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DirectoryError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Station list from {url} has an unexpected shape: {message}")]
    Schema { url: String, message: String },
}
