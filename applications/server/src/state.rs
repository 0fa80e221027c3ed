/// Shared application state
use crate::services::TrackerService;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub tracker: Arc<TrackerService>,
}

impl AppState {
    pub fn new(tracker: Arc<TrackerService>) -> Self {
        Self { tracker }
    }
}
