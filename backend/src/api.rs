//! Domain types for the segment service.
//!
//! These types are shared by the repository layer and the HTTP layer. The
//! wire representation of a segment lives in `http::dto`; the types here are
//! storage-facing.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Segment identifier.
///
/// Identifiers are assigned by the store, start at 1 and are never reused.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SegmentId(pub i64);

impl SegmentId {
    pub fn new(value: i64) -> Self {
        SegmentId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SegmentId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(SegmentId)
    }
}

/// A stored segment record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub id: SegmentId,
    pub name: String,
    pub description: String,
    /// Set once at creation, never touched by updates.
    pub created_at: DateTime<Utc>,
}

/// The mutable part of a segment, as supplied by create and update requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentDraft {
    pub name: String,
    pub description: String,
}

impl SegmentDraft {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Optional criteria for listing segments.
///
/// Absent criteria match everything. Text criteria are case-insensitive
/// substring matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentFilter {
    pub id: Option<SegmentId>,
    pub name: Option<String>,
    pub description: Option<String>,
}

impl SegmentFilter {
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.name.is_none() && self.description.is_none()
    }

    pub fn matches(&self, segment: &Segment) -> bool {
        if let Some(id) = self.id {
            if segment.id != id {
                return false;
            }
        }
        if let Some(ref name) = self.name {
            if !contains_ignore_case(&segment.name, name) {
                return false;
            }
        }
        if let Some(ref description) = self.description {
            if !contains_ignore_case(&segment.description, description) {
                return false;
            }
        }
        true
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Zero-based pagination window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub size: usize,
}

impl PageRequest {
    pub fn new(page: usize, size: usize) -> Self {
        Self { page, size }
    }

    /// Keep only the items that fall inside this window.
    pub fn apply<T>(&self, items: Vec<T>) -> Vec<T> {
        let skip = self.page.saturating_mul(self.size);
        items.into_iter().skip(skip).take(self.size).collect()
    }
}
