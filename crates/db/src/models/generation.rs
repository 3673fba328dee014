//! Row and DTO types for the `generations` table.

use dreambox_core::types::Timestamp;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Row type
// ---------------------------------------------------------------------------

/// One generation request and its stored artifacts.
///
/// `image_urls` holds presigned URLs (refreshed periodically; see the
/// signed-URL policy in `dreambox-core`), `image_keys` the permanent
/// object keys they were signed from. Both are index-aligned with the
/// request's pages/scenes; a failed index holds an empty string.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Generation {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub gen_type: String,
    pub prompt: String,
    pub style: Option<String>,
    pub page_count: i32,
    pub image_urls: Option<Json<Vec<String>>>,
    pub image_keys: Option<Json<Vec<String>>>,
    pub created_at: Timestamp,
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Fields required to create a generation record.
#[derive(Debug, Clone)]
pub struct CreateGeneration {
    pub gen_type: String,
    pub prompt: String,
    pub style: Option<String>,
    pub page_count: i32,
}

/// Listing filters for `GET /generations`.
#[derive(Debug, Clone, Deserialize)]
pub struct ListGenerations {
    /// Restrict to one generation type.
    #[serde(rename = "type")]
    pub gen_type: Option<String>,
    /// Page size (default 50).
    #[serde(default = "default_limit")]
    pub limit: i64,
    /// Offset into the newest-first ordering.
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    50
}

impl Default for ListGenerations {
    fn default() -> Self {
        Self {
            gen_type: None,
            limit: default_limit(),
            offset: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_params_default_to_fifty_newest() {
        let params = ListGenerations::default();
        assert_eq!(params.limit, 50);
        assert_eq!(params.offset, 0);
        assert!(params.gen_type.is_none());
    }

    #[test]
    fn list_params_deserialize_from_query_shape() {
        let params: ListGenerations =
            serde_json::from_str(r#"{"type":"comic","limit":10}"#).unwrap();
        assert_eq!(params.gen_type.as_deref(), Some("comic"));
        assert_eq!(params.limit, 10);
        assert_eq!(params.offset, 0);
    }

    #[test]
    fn generation_serializes_with_wire_field_names() {
        let row = Generation {
            id: Uuid::new_v4(),
            gen_type: "comic".to_string(),
            prompt: "a story".to_string(),
            style: None,
            page_count: 5,
            image_urls: Some(Json(vec!["https://bucket/a".to_string()])),
            image_keys: Some(Json(vec!["generated/a.png".to_string()])),
            created_at: chrono::Utc::now(),
        };
        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["type"], "comic");
        assert_eq!(value["pageCount"], 5);
        assert_eq!(value["imageUrls"][0], "https://bucket/a");
        assert!(value["createdAt"].is_string());
    }
}
