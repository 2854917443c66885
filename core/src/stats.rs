use crate::models::{Note, NoteColor};
use crate::query::{run_query, QuerySpec};
use std::collections::HashSet;

/// Read-side aggregates the dashboard derives from the collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionStats {
    pub total: usize,
    pub favorites: usize,
    pub distinct_tags: usize,
    /// Non-zero color groups, in the enum's declared order.
    pub by_color: Vec<(NoteColor, usize)>,
}

impl CollectionStats {
    pub fn collect(notes: &[Note]) -> Self {
        let tags: HashSet<&str> = notes
            .iter()
            .flat_map(|n| n.tags.iter().map(String::as_str))
            .collect();

        let by_color = NoteColor::ALL
            .iter()
            .filter_map(|color| {
                let count = notes.iter().filter(|n| n.color == Some(*color)).count();
                (count > 0).then_some((*color, count))
            })
            .collect();

        Self {
            total: notes.len(),
            favorites: notes.iter().filter(|n| n.is_favorite).count(),
            distinct_tags: tags.len(),
            by_color,
        }
    }
}

/// The `n` most recently updated notes, newest first.
pub fn recently_updated(notes: &[Note], n: usize) -> Vec<Note> {
    let mut recent = run_query(notes, &QuerySpec::default());
    recent.truncate(n);
    recent
}
