//! High-level segment service layer.
//!
//! Repository-agnostic operations invoked by the HTTP handlers. They work with
//! any `SegmentRepository` implementation, including trait objects.
//!
//! # Usage
//!
//! ```no_run
//! use segment_service::api::SegmentDraft;
//! use segment_service::db::{services, repositories::LocalRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = LocalRepository::new();
//!     services::create_segment(&repo, SegmentDraft::new("Premium", "paying users")).await?;
//!
//!     let segments = services::list_segments(&repo, &Default::default(), None).await?;
//!     println!("Found {} segments", segments.len());
//!     Ok(())
//! }
//! ```

use log::{debug, info};

use crate::api::{PageRequest, Segment, SegmentDraft, SegmentFilter, SegmentId};

use super::repository::{RepositoryResult, SegmentRepository};

// ==================== Health & Connection ====================

/// Check if the store is healthy.
pub async fn health_check<R: SegmentRepository + ?Sized>(repo: &R) -> RepositoryResult<bool> {
    repo.health_check().await
}

/// Number of stored segments.
pub async fn count_segments<R: SegmentRepository + ?Sized>(repo: &R) -> RepositoryResult<usize> {
    repo.count_segments().await
}

// ==================== Segment Operations ====================

/// List segments in ascending id order.
///
/// The filter is applied first, then the optional pagination window.
pub async fn list_segments<R: SegmentRepository + ?Sized>(
    repo: &R,
    filter: &SegmentFilter,
    page: Option<PageRequest>,
) -> RepositoryResult<Vec<Segment>> {
    let segments = repo.list_segments(filter).await?;
    let matched = segments.len();

    let segments = match page {
        Some(page) => page.apply(segments),
        None => segments,
    };

    debug!(
        "Listed {} of {} matching segments (filtered: {})",
        segments.len(),
        matched,
        !filter.is_empty()
    );
    Ok(segments)
}

/// Create a new segment.
///
/// No validation is applied: empty and duplicate names are accepted.
pub async fn create_segment<R: SegmentRepository + ?Sized>(
    repo: &R,
    draft: SegmentDraft,
) -> RepositoryResult<Segment> {
    let segment = repo
        .insert_segment(draft)
        .await
        .map_err(|e| e.with_operation("create_segment"))?;
    info!("Created segment {} '{}'", segment.id, segment.name);
    Ok(segment)
}

/// Fetch a single segment.
pub async fn get_segment<R: SegmentRepository + ?Sized>(
    repo: &R,
    id: SegmentId,
) -> RepositoryResult<Segment> {
    let segment = repo.get_segment(id).await?;
    debug!("Fetched segment {}", id);
    Ok(segment)
}

/// Replace name and description of an existing segment.
pub async fn update_segment<R: SegmentRepository + ?Sized>(
    repo: &R,
    id: SegmentId,
    draft: SegmentDraft,
) -> RepositoryResult<Segment> {
    let segment = repo.update_segment(id, draft).await?;
    info!("Updated segment {} '{}'", segment.id, segment.name);
    Ok(segment)
}

/// Delete a segment. Its identifier is never handed out again.
pub async fn delete_segment<R: SegmentRepository + ?Sized>(
    repo: &R,
    id: SegmentId,
) -> RepositoryResult<()> {
    let removed = repo.delete_segment(id).await?;
    info!("Deleted segment {} '{}'", removed.id, removed.name);
    Ok(())
}
