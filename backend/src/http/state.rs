//! Application state for the HTTP server.

use std::sync::Arc;

use crate::db::repositories::LocalRepository;
use crate::db::repository::SegmentRepository;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Segment store shared by every request
    pub repository: Arc<dyn SegmentRepository>,
}

impl AppState {
    /// Create a new application state with the given repository.
    pub fn new(repository: Arc<dyn SegmentRepository>) -> Self {
        Self { repository }
    }

    /// State backed by a fresh, empty in-memory store.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(LocalRepository::new()))
    }
}
