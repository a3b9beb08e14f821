//! Debounced search input.

use std::time::Duration;
use tokio::sync::watch;

/// Default quiet period before a query is considered settled.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(200);

/// The editing end of a debounced query. Each call to [`QueryInput::edit`]
/// replaces the pending text and restarts the quiet period.
#[derive(Debug)]
pub struct QueryInput {
    tx: watch::Sender<String>,
}

impl QueryInput {
    pub fn edit(&self, text: impl Into<String>) {
        self.tx.send_replace(text.into());
    }

    pub fn current(&self) -> String {
        self.tx.borrow().clone()
    }
}

/// The reading end: yields the query text once no edit has happened for
/// `delay`.
#[derive(Debug)]
pub struct QueryDebouncer {
    rx: watch::Receiver<String>,
    delay: Duration,
}

/// Creates a connected input/debouncer pair starting from an empty query.
pub fn debounced(delay: Duration) -> (QueryInput, QueryDebouncer) {
    let (tx, rx) = watch::channel(String::new());
    (QueryInput { tx }, QueryDebouncer { rx, delay })
}

impl QueryDebouncer {
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Waits for the next edit, then for `delay` of silence, and returns the
    /// latest text. Intermediate values are skipped.
    ///
    /// Returns `None` once the [`QueryInput`] is dropped and every edit has
    /// been delivered.
    pub async fn settled(&mut self) -> Option<String> {
        self.rx.changed().await.ok()?;
        loop {
            match tokio::time::timeout(self.delay, self.rx.changed()).await {
                Ok(Ok(())) => continue,
                // Timer fired, or the input went away mid-burst.
                Ok(Err(_)) | Err(_) => break,
            }
        }
        Some(self.rx.borrow_and_update().clone())
    }
}
