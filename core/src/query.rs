use crate::models::{Note, NoteColor};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    UpdatedAt,
    CreatedAt,
    Title,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "updated" | "updated_at" => Ok(SortKey::UpdatedAt),
            "created" | "created_at" => Ok(SortKey::CreatedAt),
            "title" => Ok(SortKey::Title),
            other => Err(format!("unknown sort key: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Ascending),
            "desc" | "descending" => Ok(SortOrder::Descending),
            other => Err(format!("unknown sort order: {}", other)),
        }
    }
}

/// Combined filter and sort request. Every filter is optional; the defaults
/// select the whole collection ordered by most recently updated.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct QuerySpec {
    pub search_term: Option<String>,
    pub tags: Vec<String>,
    pub folder_id: Option<String>,
    pub color: Option<NoteColor>,
    pub favorites_only: bool,
    pub sort_key: SortKey,
    pub sort_order: SortOrder,
}

/// Derive an ordered view of the collection. Pure: no I/O, no mutation,
/// identical inputs give identical output.
///
/// Filters are conjunctive. The search term matches case-insensitively as a
/// substring of the title, the content, or any single tag; the tag filter
/// requires every listed tag to be present (exact, case-sensitive). The sort
/// is stable, so notes with equal keys keep their input order.
pub fn run_query(notes: &[Note], spec: &QuerySpec) -> Vec<Note> {
    let term = spec
        .search_term
        .as_deref()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty());

    let mut result: Vec<Note> = notes
        .iter()
        .filter(|note| {
            if spec.favorites_only && !note.is_favorite {
                return false;
            }
            if let Some(folder_id) = &spec.folder_id {
                if note.folder_id.as_deref() != Some(folder_id.as_str()) {
                    return false;
                }
            }
            if let Some(color) = spec.color {
                if note.color != Some(color) {
                    return false;
                }
            }
            if !spec.tags.iter().all(|t| note.tags.iter().any(|nt| nt == t)) {
                return false;
            }
            if let Some(term) = &term {
                if !matches_term(note, term) {
                    return false;
                }
            }
            true
        })
        .cloned()
        .collect();

    result.sort_by(|a, b| {
        let ordering = compare(a, b, spec.sort_key);
        match spec.sort_order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    });

    result
}

fn matches_term(note: &Note, term: &str) -> bool {
    note.title.to_lowercase().contains(term)
        || note.content.to_lowercase().contains(term)
        || note.tags.iter().any(|tag| tag.to_lowercase().contains(term))
}

fn compare(a: &Note, b: &Note, key: SortKey) -> Ordering {
    match key {
        SortKey::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
        // Lowercased comparison stands in for locale collation; titles that
        // only differ by case fall through to stable input order.
        SortKey::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
    }
}
