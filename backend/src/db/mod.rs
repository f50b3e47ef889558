//! Segment storage.
//!
//! This module provides abstractions for storage operations via the Repository
//! pattern, allowing different storage backends to be swapped easily.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  HTTP handlers                                          │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services.rs) - Business Logic           │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Trait (repository/) - Abstract Interface    │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Local Repository (in-memory)                           │
//! └─────────────────────────────────────────────────────────┘
//! ```

pub mod repositories;
pub mod repository;
pub mod services;

pub use repositories::LocalRepository;
pub use repository::{ErrorContext, RepositoryError, RepositoryResult, SegmentRepository};
pub use services::{
    count_segments, create_segment, delete_segment, get_segment, health_check, list_segments,
    update_segment,
};
