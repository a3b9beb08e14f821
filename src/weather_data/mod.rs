pub mod aggregator;
pub mod error;
pub(crate) mod extractor;
pub mod fallback;
