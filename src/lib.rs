// src/lib.rs
// Public library surface for the service binary and integration tests.

pub mod api;
pub mod config;
pub mod error;
pub mod fetch;
pub mod metrics;
pub mod model;
pub mod state;

// ---- Re-exports for stable public API ----
pub use crate::api::{create_router, AppState};
pub use crate::error::FetchError;
pub use crate::fetch::{ApodClient, ApodFetcher};
pub use crate::model::ApodRecord;
pub use crate::state::{DailyImageController, LoadState};
