//! In-memory local repository implementation.
//!
//! All data lives in a `BTreeMap` behind a single lock, so the identifier
//! counter and the map are always updated together. Nothing survives a
//! restart.

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::api::{Segment, SegmentDraft, SegmentFilter, SegmentId};
use crate::db::repository::{ErrorContext, RepositoryError, RepositoryResult, SegmentRepository};

/// In-memory local repository.
///
/// Cloning is cheap and yields a handle to the same underlying data.
///
/// # Example
/// ```
/// use segment_service::api::SegmentDraft;
/// use segment_service::db::repositories::LocalRepository;
/// use segment_service::db::repository::SegmentRepository;
///
/// # tokio_test_block(async {
/// let repo = LocalRepository::new();
/// let created = repo
///     .insert_segment(SegmentDraft::new("Premium", "paying users"))
///     .await
///     .unwrap();
/// assert_eq!(created.id.value(), 1);
/// assert_eq!(repo.segment_count(), 1);
/// # });
/// # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Runtime::new().unwrap().block_on(f)
/// # }
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    segments: BTreeMap<SegmentId, Segment>,
    next_segment_id: SegmentId,
    // Connection health
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            segments: BTreeMap::new(),
            next_segment_id: SegmentId(1),
            is_healthy: true,
        }
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Set the health status for testing connection failures.
    ///
    /// While unhealthy every operation except `health_check` fails with a
    /// retryable connection error.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Remove all segments. The identifier counter keeps its value.
    pub fn clear(&self) {
        self.data.write().segments.clear();
    }

    /// Get the number of segments stored.
    pub fn segment_count(&self) -> usize {
        self.data.read().segments.len()
    }

    /// Check if a segment exists.
    pub fn has_segment(&self, id: SegmentId) -> bool {
        self.data.read().segments.contains_key(&id)
    }

    fn ensure_healthy(data: &LocalData, operation: &str) -> RepositoryResult<()> {
        if data.is_healthy {
            Ok(())
        } else {
            Err(RepositoryError::connection_with_context(
                "Local repository is marked unhealthy",
                ErrorContext::new(operation),
            ))
        }
    }

    fn not_found(id: SegmentId, operation: &str) -> RepositoryError {
        RepositoryError::not_found_with_context(
            format!("Segment {} not found", id),
            ErrorContext::new(operation)
                .with_entity("segment")
                .with_entity_id(id),
        )
    }
}

#[async_trait]
impl SegmentRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }

    async fn list_segments(&self, filter: &SegmentFilter) -> RepositoryResult<Vec<Segment>> {
        let data = self.data.read();
        Self::ensure_healthy(&data, "list_segments")?;

        Ok(data
            .segments
            .values()
            .filter(|segment| filter.matches(segment))
            .cloned()
            .collect())
    }

    async fn insert_segment(&self, draft: SegmentDraft) -> RepositoryResult<Segment> {
        let mut data = self.data.write();
        Self::ensure_healthy(&data, "insert_segment")?;

        let id = data.next_segment_id;
        let next = id.value().checked_add(1).ok_or_else(|| {
            RepositoryError::internal_with_context(
                "Segment identifier space exhausted",
                ErrorContext::new("insert_segment").with_entity("segment"),
            )
        })?;
        data.next_segment_id = SegmentId(next);

        let segment = Segment {
            id,
            name: draft.name,
            description: draft.description,
            created_at: Utc::now(),
        };
        data.segments.insert(id, segment.clone());
        debug!("Stored segment {} ({} total)", id, data.segments.len());

        Ok(segment)
    }

    async fn get_segment(&self, id: SegmentId) -> RepositoryResult<Segment> {
        let data = self.data.read();
        Self::ensure_healthy(&data, "get_segment")?;

        data.segments
            .get(&id)
            .cloned()
            .ok_or_else(|| Self::not_found(id, "get_segment"))
    }

    async fn update_segment(
        &self,
        id: SegmentId,
        draft: SegmentDraft,
    ) -> RepositoryResult<Segment> {
        let mut data = self.data.write();
        Self::ensure_healthy(&data, "update_segment")?;

        let segment = data
            .segments
            .get_mut(&id)
            .ok_or_else(|| Self::not_found(id, "update_segment"))?;
        segment.name = draft.name;
        segment.description = draft.description;

        Ok(segment.clone())
    }

    async fn delete_segment(&self, id: SegmentId) -> RepositoryResult<Segment> {
        let mut data = self.data.write();
        Self::ensure_healthy(&data, "delete_segment")?;

        data.segments
            .remove(&id)
            .ok_or_else(|| Self::not_found(id, "delete_segment"))
    }

    async fn count_segments(&self) -> RepositoryResult<usize> {
        let data = self.data.read();
        Self::ensure_healthy(&data, "count_segments")?;
        Ok(data.segments.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str) -> SegmentDraft {
        SegmentDraft::new(name, format!("{} description", name))
    }

    #[tokio::test]
    async fn test_new_repository_is_empty() {
        let repo = LocalRepository::new();
        assert_eq!(repo.segment_count(), 0);
        assert!(repo
            .list_segments(&SegmentFilter::default())
            .await
            .unwrap()
            .is_empty());
        assert!(repo.health_check().await.unwrap());
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let repo = LocalRepository::new();
        let first = repo.insert_segment(draft("a")).await.unwrap();
        let second = repo.insert_segment(draft("b")).await.unwrap();

        assert_eq!(first.id, SegmentId(1));
        assert_eq!(second.id, SegmentId(2));
        assert!(first.created_at <= second.created_at);
        assert!(repo.has_segment(SegmentId(2)));
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let repo = LocalRepository::new();
        let first = repo.insert_segment(draft("a")).await.unwrap();
        repo.delete_segment(first.id).await.unwrap();
        repo.clear();

        let second = repo.insert_segment(draft("b")).await.unwrap();
        assert_eq!(second.id, SegmentId(2));
    }

    #[tokio::test]
    async fn test_update_keeps_id_and_creation_time() {
        let repo = LocalRepository::new();
        let created = repo.insert_segment(draft("a")).await.unwrap();

        let updated = repo
            .update_segment(created.id, SegmentDraft::new("renamed", ""))
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.name, "renamed");
        assert_eq!(updated.description, "");
        assert_eq!(repo.get_segment(created.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let repo = LocalRepository::new();
        let missing = SegmentId(99);

        let err = repo.get_segment(missing).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.context().entity_id.as_deref(), Some("99"));

        assert!(repo
            .update_segment(missing, draft("x"))
            .await
            .unwrap_err()
            .is_not_found());
        assert!(repo.delete_segment(missing).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_id_and_filtered() {
        let repo = LocalRepository::new();
        for name in ["gamma", "alpha", "beta"] {
            repo.insert_segment(draft(name)).await.unwrap();
        }

        let all = repo.list_segments(&SegmentFilter::default()).await.unwrap();
        let names: Vec<_> = all.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["gamma", "alpha", "beta"]);

        let filter = SegmentFilter {
            name: Some("A".to_string()),
            ..Default::default()
        };
        let matched = repo.list_segments(&filter).await.unwrap();
        let ids: Vec<_> = matched.iter().map(|s| s.id.value()).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        let filter = SegmentFilter {
            name: Some("ph".to_string()),
            ..Default::default()
        };
        let matched = repo.list_segments(&filter).await.unwrap();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].name, "alpha");
    }

    #[tokio::test]
    async fn test_unhealthy_repository_rejects_operations() {
        let repo = LocalRepository::new();
        repo.set_healthy(false);

        assert!(!repo.health_check().await.unwrap());
        let err = repo.insert_segment(draft("a")).await.unwrap_err();
        assert!(err.is_retryable());
        assert!(matches!(err, RepositoryError::ConnectionError { .. }));
        assert!(repo.count_segments().await.is_err());

        repo.set_healthy(true);
        assert!(repo.insert_segment(draft("a")).await.is_ok());
    }

    #[tokio::test]
    async fn test_clones_share_data() {
        let repo = LocalRepository::new();
        let handle = repo.clone();
        handle.insert_segment(draft("shared")).await.unwrap();
        assert_eq!(repo.count_segments().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_inserts_get_unique_ids() {
        let repo = LocalRepository::new();
        let mut handles = Vec::new();
        for i in 0..32 {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move {
                repo.insert_segment(draft(&format!("s{}", i))).await.unwrap().id
            }));
        }

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap().value());
        }
        ids.sort_unstable();
        assert_eq!(ids, (1..=32).collect::<Vec<_>>());
    }
}
