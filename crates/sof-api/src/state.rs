//! Application state management

use sof_core::{AppConfig, Result};
use sof_pipeline::Pipeline;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Application state shared across handlers
///
/// The pipeline (and the recognition model inside it) is built once
/// here, before the server accepts requests, and is read-only for the
/// process lifetime. Requests only ever read it, so no locking.
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,
    /// Document processing pipeline
    pub pipeline: Pipeline,
    /// Server start time
    pub start_time: Instant,
    /// Request counter
    pub request_count: AtomicU64,
}

impl AppState {
    /// Create new application state with config
    ///
    /// Fails when the recognition model cannot be loaded; the server
    /// must not start without it.
    pub fn new(config: AppConfig) -> Result<Self> {
        let pipeline = Pipeline::from_config(&config)?;

        Ok(Self {
            config,
            pipeline,
            start_time: Instant::now(),
            request_count: AtomicU64::new(0),
        })
    }

    /// Increment request counter
    pub fn increment_requests(&self) -> u64 {
        self.request_count.fetch_add(1, Ordering::SeqCst)
    }

    /// Get total request count
    pub fn get_request_count(&self) -> u64 {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Get uptime in seconds
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
