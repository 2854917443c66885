use crate::models::{Folder, Note};
use crate::Result;
use serde::{Deserialize, Serialize};

/// Key the serialized collection lives under in the gateway.
pub const STORAGE_KEY: &str = "notes";

pub const DOCUMENT_VERSION: u32 = 1;

/// The persisted form of the whole collection. Round-tripping through JSON
/// must reproduce an observationally identical collection, order included.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CollectionDocument {
    pub version: u32,
    pub notes: Vec<Note>,
    pub folders: Vec<Folder>,
}

impl CollectionDocument {
    pub fn new(notes: Vec<Note>, folders: Vec<Folder>) -> Self {
        Self {
            version: DOCUMENT_VERSION,
            notes,
            folders,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(blob: &str) -> Result<Self> {
        Ok(serde_json::from_str(blob)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Attachment, Location, NoteColor, NoteDraft};

    #[test]
    fn test_round_trip_preserves_collection() {
        let mut decorated = Note::new(NoteDraft {
            title: "Trip plan".to_string(),
            content: "Paris, Rome, Barcelona".to_string(),
            tags: vec!["Personal".to_string(), "Ideas".to_string()],
            color: Some(NoteColor::Purple),
            is_protected: true,
            password: Some("hunter2".to_string()),
            location: Some(Location {
                latitude: 48.8566,
                longitude: 2.3522,
                label: Some("Paris".to_string()),
            }),
            attachment: Some(Attachment::image("file:///itinerary.png")),
            ..Default::default()
        });
        decorated.is_favorite = true;

        let plain = Note::new(NoteDraft {
            title: "Grocery List".to_string(),
            content: "Milk, Eggs, Bread".to_string(),
            ..Default::default()
        });

        let document = CollectionDocument::new(
            vec![decorated, plain],
            vec![Folder::new("Work".to_string())],
        );

        let blob = document.to_json().unwrap();
        let restored = CollectionDocument::from_json(&blob).unwrap();
        assert_eq!(restored, document);
    }

    #[test]
    fn test_round_trip_preserves_order() {
        let notes: Vec<Note> = (0..5)
            .map(|i| {
                Note::new(NoteDraft {
                    title: format!("Note {}", i),
                    ..Default::default()
                })
            })
            .collect();
        let expected: Vec<String> = notes.iter().map(|n| n.id.clone()).collect();

        let document = CollectionDocument::new(notes, Vec::new());
        let restored = CollectionDocument::from_json(&document.to_json().unwrap()).unwrap();
        let actual: Vec<String> = restored.notes.iter().map(|n| n.id.clone()).collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_malformed_blob_is_a_serialization_error() {
        let result = CollectionDocument::from_json("not json");
        assert!(matches!(result, Err(crate::Error::Serialization(_))));
    }
}
