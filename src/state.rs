// src/state.rs
use std::sync::{Arc, RwLock};

use serde::Serialize;

use crate::fetch::ApodFetcher;
use crate::model::ApodRecord;

/// Shown when a failure carries no message of its own.
const GENERIC_ERROR_MESSAGE: &str = "an unknown error occurred";

/// Observable position of one load cycle. Exactly one case is active at a
/// time, and every cycle ends in `Success` or `Error`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LoadState {
    Loading,
    Success { record: ApodRecord },
    Error { message: String },
}

/// Owns the tri-state cell and runs load cycles against a fetcher.
///
/// Cheap to clone; clones share one cell. Overlapping `load` calls are not
/// serialized or cancelled: both run, and the later write wins.
#[derive(Clone)]
pub struct DailyImageController {
    fetcher: Arc<dyn ApodFetcher>,
    state: Arc<RwLock<LoadState>>,
}

impl DailyImageController {
    pub fn new(fetcher: Arc<dyn ApodFetcher>) -> Self {
        Self {
            fetcher,
            state: Arc::new(RwLock::new(LoadState::Loading)),
        }
    }

    /// Construct and kick off the initial load in the background.
    ///
    /// Must run inside a Tokio runtime. If the caller drops every handle
    /// while the load is still in flight, the result lands in a cell nobody
    /// reads and is dropped, not a crash.
    pub fn start(fetcher: Arc<dyn ApodFetcher>) -> Self {
        let controller = Self::new(fetcher);
        let bg = controller.clone();
        tokio::spawn(async move { bg.load().await });
        controller
    }

    /// One full cycle: `Loading`, a single fetch, then a full replace of the
    /// state with `Success` or `Error`.
    pub async fn load(&self) {
        self.set_state(LoadState::Loading);
        tracing::debug!("load cycle started");

        match self.fetcher.fetch_latest().await {
            Ok(record) => {
                tracing::debug!(date = %record.date, title = %record.title, "load cycle succeeded");
                self.set_state(LoadState::Success { record });
            }
            Err(err) => {
                let mut message = err.to_string();
                if message.trim().is_empty() {
                    message = GENERIC_ERROR_MESSAGE.to_string();
                }
                tracing::error!(%message, "load cycle failed");
                self.set_state(LoadState::Error { message });
            }
        }
    }

    /// User-initiated reload; same effect as `load`.
    pub async fn refresh(&self) {
        self.load().await;
    }

    /// Cloned snapshot of the current state.
    pub fn state(&self) -> LoadState {
        self.state.read().expect("state lock poisoned").clone()
    }

    fn set_state(&self, next: LoadState) {
        *self.state.write().expect("state lock poisoned") = next;
    }
}
