//! Repository trait for abstracting segment storage.
//!
//! The trait is the contract of the segment store. Implementations must be
//! `Send + Sync` so a single instance can be shared by every request handler.

use async_trait::async_trait;

use crate::api::{Segment, SegmentDraft, SegmentFilter, SegmentId};

mod error;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

/// Storage operations for segments.
///
/// # Error Handling
/// Lookups on an unknown id return `RepositoryError::NotFound`. Any other
/// variant means the store itself failed.
#[async_trait]
pub trait SegmentRepository: Send + Sync {
    /// Check if the store is reachable.
    ///
    /// # Returns
    /// - `Ok(true)` if the store is healthy
    /// - `Ok(false)` if it is unhealthy but no error occurred
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// List segments matching `filter`, in ascending id order.
    async fn list_segments(&self, filter: &SegmentFilter) -> RepositoryResult<Vec<Segment>>;

    /// Store a new segment.
    ///
    /// Assigns the next identifier and stamps `created_at` with the current
    /// time. The identifier counter is advanced even if the segment is
    /// deleted later.
    async fn insert_segment(&self, draft: SegmentDraft) -> RepositoryResult<Segment>;

    /// Fetch a single segment.
    async fn get_segment(&self, id: SegmentId) -> RepositoryResult<Segment>;

    /// Replace `name` and `description` of an existing segment.
    ///
    /// `id` and `created_at` are left unchanged.
    async fn update_segment(&self, id: SegmentId, draft: SegmentDraft) -> RepositoryResult<Segment>;

    /// Remove a segment and return the removed record.
    async fn delete_segment(&self, id: SegmentId) -> RepositoryResult<Segment>;

    /// Number of stored segments.
    async fn count_segments(&self) -> RepositoryResult<usize>;
}
