//! Search input debouncing
//!
//! Raw keystroke-level input is pushed through a [`SearchInput`]. The paired
//! [`SearchDebouncer`] yields a committed value only after the input has been
//! quiet for the full delay; every change restarts the timer, so only the last
//! value of a burst is ever committed.

use std::time::Duration;

use tokio::sync::watch;
use tokio::time::sleep;

/// Quiet period before a search term is committed
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// Writer half: receives every raw edit
#[derive(Debug)]
pub struct SearchInput {
    raw: watch::Sender<String>,
}

impl SearchInput {
    /// Replace the raw term. Never blocks, never queues.
    pub fn set(&self, term: impl Into<String>) {
        self.raw.send_replace(term.into());
    }

    /// The raw term as last typed
    pub fn current(&self) -> String {
        self.raw.borrow().clone()
    }
}

/// Reader half: yields committed terms
#[derive(Debug)]
pub struct SearchDebouncer {
    raw: watch::Receiver<String>,
    committed: String,
    delay: Duration,
    initial_sent: bool,
}

impl SearchDebouncer {
    /// Create a debouncer with the standard 500 ms quiet period
    pub fn new() -> (SearchInput, Self) {
        Self::with_delay(SEARCH_DEBOUNCE)
    }

    /// Create a debouncer with a custom quiet period
    pub fn with_delay(delay: Duration) -> (SearchInput, Self) {
        let (tx, rx) = watch::channel(String::new());
        let debouncer = Self {
            raw: rx,
            committed: String::new(),
            delay,
            initial_sent: false,
        };
        (SearchInput { raw: tx }, debouncer)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Wait for the next committed term.
    ///
    /// The first call returns the initial empty term immediately. Later calls
    /// resolve once the input has settled on a value different from the last
    /// committed one. Returns `None` once the [`SearchInput`] is dropped; a
    /// value still inside its quiet window at that point is discarded.
    pub async fn next_commit(&mut self) -> Option<String> {
        if !self.initial_sent {
            self.initial_sent = true;
            return Some(self.committed.clone());
        }

        loop {
            self.raw.changed().await.ok()?;

            loop {
                tokio::select! {
                    changed = self.raw.changed() => changed.ok()?,
                    _ = sleep(self.delay) => break,
                }
            }

            let settled = self.raw.borrow_and_update().clone();
            if settled != self.committed {
                self.committed = settled.clone();
                tracing::debug!(term = %settled, "search term committed");
                return Some(settled);
            }
        }
    }

    /// Drive the debouncer until the input is dropped, handing every commit
    /// to `on_commit`.
    pub async fn run<F>(mut self, mut on_commit: F)
    where
        F: FnMut(String),
    {
        while let Some(term) = self.next_commit().await {
            on_commit(term);
        }
    }
}
