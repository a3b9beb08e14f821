pub mod error;
pub mod retrying_fetcher;
pub mod transport;
