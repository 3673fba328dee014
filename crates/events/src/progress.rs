//! The generation progress-event vocabulary.
//!
//! Serialized shapes are a wire contract consumed by the web client; the
//! tests below pin them. Framing (`data: <JSON>\n\n`) is applied at the
//! transport boundary, never here.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A progress event published while a generation request runs.
///
/// Events are created at the moment of a state change, delivered through a
/// [`ProgressEmitter`](crate::ProgressEmitter), and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GenerationEvent {
    /// Human-readable phase update.
    Status { message: String },

    /// A chunk of streamed scene-split text, plus the accumulated text so
    /// far, so clients can render the split as it is written.
    ScenesTextChunk {
        content: String,
        #[serde(rename = "fullContent")]
        full_content: String,
    },

    /// Scene parsing finished; `count` image jobs are about to fan out.
    Scenes { count: usize },

    /// The image job at `index` finished and its artifact is reachable at
    /// `url`. Emitted exactly once per completed job.
    Progress {
        index: usize,
        total: usize,
        url: String,
    },

    /// A job or the whole run failed.
    Error { message: String },

    /// Terminal success event carrying the persisted record summary.
    Complete { data: CompleteData },
}

/// Payload of the terminal [`GenerationEvent::Complete`] event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteData {
    pub id: Uuid,
    pub image_urls: Vec<String>,
    pub scene_count: usize,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn status_wire_shape() {
        let event = GenerationEvent::Status {
            message: "Splitting the story into scenes...".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({"type": "status", "message": "Splitting the story into scenes..."})
        );
    }

    #[test]
    fn scenes_text_chunk_wire_shape() {
        let event = GenerationEvent::ScenesTextChunk {
            content: "Scene 1".to_string(),
            full_content: "Scene 1".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({"type": "scenes_text_chunk", "content": "Scene 1", "fullContent": "Scene 1"})
        );
    }

    #[test]
    fn scenes_wire_shape() {
        let event = GenerationEvent::Scenes { count: 5 };
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({"type": "scenes", "count": 5})
        );
    }

    #[test]
    fn progress_wire_shape() {
        let event = GenerationEvent::Progress {
            index: 2,
            total: 5,
            url: "https://bucket/signed/panel-2".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({
                "type": "progress",
                "index": 2,
                "total": 5,
                "url": "https://bucket/signed/panel-2",
            })
        );
    }

    #[test]
    fn error_wire_shape() {
        let event = GenerationEvent::Error {
            message: "image 3 failed".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({"type": "error", "message": "image 3 failed"})
        );
    }

    #[test]
    fn complete_wire_shape() {
        let id = Uuid::new_v4();
        let event = GenerationEvent::Complete {
            data: CompleteData {
                id,
                image_urls: vec!["https://bucket/a".to_string()],
                scene_count: 1,
            },
        };
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({
                "type": "complete",
                "data": {
                    "id": id.to_string(),
                    "imageUrls": ["https://bucket/a"],
                    "sceneCount": 1,
                },
            })
        );
    }
}
