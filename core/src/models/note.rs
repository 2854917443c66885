use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Display color for a note. Cosmetic only; the query engine never filters
/// correctness-relevant behavior on it, but statistics group by it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum NoteColor {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
    Gray,
}

impl NoteColor {
    pub const ALL: [NoteColor; 7] = [
        NoteColor::Red,
        NoteColor::Orange,
        NoteColor::Yellow,
        NoteColor::Green,
        NoteColor::Blue,
        NoteColor::Purple,
        NoteColor::Gray,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            NoteColor::Red => "red",
            NoteColor::Orange => "orange",
            NoteColor::Yellow => "yellow",
            NoteColor::Green => "green",
            NoteColor::Blue => "blue",
            NoteColor::Purple => "purple",
            NoteColor::Gray => "gray",
        }
    }
}

impl FromStr for NoteColor {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        NoteColor::ALL
            .iter()
            .copied()
            .find(|c| c.name() == s.trim().to_lowercase())
            .ok_or_else(|| format!("unknown color: {}", s))
    }
}

impl fmt::Display for NoteColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Geographic annotation attached to a note. Stored and returned verbatim;
/// the core never interprets it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub label: Option<String>,
}

/// Media reference attached to a note, e.g. `{ kind: "image", uri: ... }`.
/// Opaque to the core.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Attachment {
    pub kind: String,
    pub uri: String,
}

impl Attachment {
    pub fn image(uri: impl Into<String>) -> Self {
        Self {
            kind: "image".to_string(),
            uri: uri.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub folder_id: Option<String>,
    pub color: Option<NoteColor>,
    pub is_favorite: bool,
    pub is_protected: bool,
    pub password: Option<String>,
    pub location: Option<Location>,
    pub attachment: Option<Attachment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a note. Title validation happens at the store
/// boundary, not here.
#[derive(Debug, Clone, Default)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub folder_id: Option<String>,
    pub color: Option<NoteColor>,
    pub is_favorite: bool,
    pub is_protected: bool,
    pub password: Option<String>,
    pub location: Option<Location>,
    pub attachment: Option<Attachment>,
}

/// Partial update for an existing note. `None` leaves a field untouched;
/// the nested `Option` on clearable fields distinguishes "set" from "clear".
#[derive(Debug, Clone, Default)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
    pub folder_id: Option<Option<String>>,
    pub color: Option<Option<NoteColor>>,
    pub is_protected: Option<bool>,
    pub password: Option<Option<String>>,
    pub location: Option<Option<Location>>,
    pub attachment: Option<Option<Attachment>>,
}

impl Note {
    /// Create a new note from a draft with a generated UUID
    pub fn new(draft: NoteDraft) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: draft.title,
            content: draft.content,
            tags: Note::dedup_tags(draft.tags),
            folder_id: draft.folder_id,
            color: draft.color,
            is_favorite: draft.is_favorite,
            is_protected: draft.is_protected,
            password: draft.password,
            location: draft.location,
            attachment: draft.attachment,
            created_at: now,
            updated_at: now,
        }
    }

    /// Update the modified timestamp
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Drop duplicate tags, keeping the first occurrence (case-sensitive)
    pub fn dedup_tags(tags: Vec<String>) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        tags.into_iter().filter(|t| seen.insert(t.clone())).collect()
    }
}
