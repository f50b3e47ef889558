//! # Segment Service
//!
//! A small REST service for managing user segments: named records with a
//! description and a creation timestamp, kept in process memory.
//!
//! ## Architecture
//!
//! - [`api`]: Domain types shared by every layer
//! - [`db`]: Repository trait, the in-memory store and the service layer
//! - [`config`]: TOML and environment configuration
//! - [`http`]: Axum-based router, handlers and response encoding
//!
//! ## Endpoints
//!
//! | Method | Path                    | Success              |
//! |--------|-------------------------|----------------------|
//! | GET    | `/api/v1/segments`      | 200, array           |
//! | POST   | `/api/v1/segments`      | 201, created segment |
//! | GET    | `/api/v1/segments/{id}` | 200, segment         |
//! | PUT    | `/api/v1/segments/{id}` | 200, updated segment |
//! | DELETE | `/api/v1/segments/{id}` | 200, confirmation    |
//! | GET    | `/health`               | 200, service status  |

pub mod api;
pub mod config;
pub mod db;

#[cfg(feature = "http-server")]
pub mod http;
