//! Data Transfer Objects for the HTTP API.
//!
//! Wire names are camelCase (`segmentId`, `createdAt`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{PageRequest, Segment, SegmentDraft, SegmentFilter, SegmentId};

/// Body of create and update requests.
///
/// Missing fields decode as empty strings; unknown fields are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SegmentRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl From<SegmentRequest> for SegmentDraft {
    fn from(request: SegmentRequest) -> Self {
        SegmentDraft::new(request.name, request.description)
    }
}

/// Segment representation returned by every segment endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentResponse {
    pub segment_id: i64,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl From<Segment> for SegmentResponse {
    fn from(segment: Segment) -> Self {
        Self {
            segment_id: segment.id.value(),
            name: segment.name,
            description: segment.description,
            created_at: segment.created_at,
        }
    }
}

/// Generic confirmation payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultResponse {
    pub value: String,
}

impl DefaultResponse {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

/// Query parameters for the list endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListSegmentsQuery {
    /// Exact id match
    #[serde(default)]
    pub id: Option<i64>,
    /// Case-insensitive substring of the name
    #[serde(default)]
    pub name: Option<String>,
    /// Case-insensitive substring of the description
    #[serde(default)]
    pub description: Option<String>,
    /// Zero-based page index (only used together with `size`)
    #[serde(default)]
    pub page: Option<usize>,
    /// Page size; without it the whole list is returned
    #[serde(default)]
    pub size: Option<usize>,
}

impl ListSegmentsQuery {
    pub fn filter(&self) -> SegmentFilter {
        SegmentFilter {
            id: self.id.map(SegmentId::new),
            name: self.name.clone(),
            description: self.description.clone(),
        }
    }

    pub fn page_request(&self) -> Option<PageRequest> {
        self.size.map(|size| PageRequest::new(self.page.unwrap_or(0), size))
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Crate version
    pub version: String,
    /// Store status ("connected" / "disconnected")
    pub repository: String,
    /// Number of stored segments
    pub segments: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_response_uses_camel_case() {
        let segment = Segment {
            id: SegmentId(3),
            name: "A".to_string(),
            description: "d".to_string(),
            created_at: "2024-05-01T12:00:00Z".parse().unwrap(),
        };
        let json = serde_json::to_value(SegmentResponse::from(segment)).unwrap();

        assert_eq!(json["segmentId"], 3);
        assert_eq!(json["name"], "A");
        assert_eq!(json["description"], "d");
        assert_eq!(json["createdAt"], "2024-05-01T12:00:00Z");
        assert_eq!(json.as_object().unwrap().len(), 4);
    }

    #[test]
    fn test_segment_request_defaults_missing_fields() {
        let request: SegmentRequest =
            serde_json::from_str(r#"{"name":"only name","extra":1}"#).unwrap();
        assert_eq!(request.name, "only name");
        assert_eq!(request.description, "");
    }

    #[test]
    fn test_segment_request_rejects_wrong_types() {
        assert!(serde_json::from_str::<SegmentRequest>(r#"{"name":5}"#).is_err());
        assert!(serde_json::from_str::<SegmentRequest>("null").is_err());
    }

    #[test]
    fn test_list_query_without_size_has_no_page() {
        let query = ListSegmentsQuery {
            page: Some(2),
            ..Default::default()
        };
        assert!(query.page_request().is_none());
        assert!(query.filter().is_empty());
    }

    #[test]
    fn test_list_query_page_defaults_to_first() {
        let query = ListSegmentsQuery {
            size: Some(10),
            name: Some("vip".to_string()),
            ..Default::default()
        };
        assert_eq!(query.page_request(), Some(PageRequest::new(0, 10)));
        assert_eq!(query.filter().name.as_deref(), Some("vip"));
    }
}
