//! Note entity and creation payload.

use serde::{Deserialize, Serialize};

use crate::id::NoteId;

/// A persisted note.
///
/// Serializes as `{ "id": "...", "title": "...", "content": "..." }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
}

impl Note {
    /// Assemble a note from its stored parts.
    #[must_use]
    pub fn new(id: NoteId, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
        }
    }
}

/// Client-supplied payload for creating a note.
///
/// Has no identifier field; an `id` sent by the client is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteRequest {
    pub title: String,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_serialize_shape() {
        let id = NoteId::generate();
        let note = Note::new(id, "Groceries", "eggs, milk");
        let value = serde_json::to_value(&note).unwrap();
        assert_eq!(value["id"], id.to_external());
        assert_eq!(value["title"], "Groceries");
        assert_eq!(value["content"], "eggs, milk");
    }

    #[test]
    fn test_note_request_ignores_client_id() {
        let json = r#"{"id": "00000000-0000-0000-0000-000000000000", "title": "A", "content": "B"}"#;
        let request: NoteRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.title, "A");
        assert_eq!(request.content, "B");
    }

    #[test]
    fn test_note_request_requires_fields() {
        assert!(serde_json::from_str::<NoteRequest>(r#"{"title": "A"}"#).is_err());
    }
}
