use crate::models::{Attachment, Note, NoteColor, NoteDraft};
use chrono::{Duration, Utc};

/// Built-in collection used to seed an empty store on first run. One-time
/// bootstrap only; an existing stored collection is never merged with this.
pub fn sample_notes() -> Vec<Note> {
    vec![
        seeded(
            "Meeting Notes - Project X",
            "Discussed Q3 strategy, assigned tasks to John and Sarah. Follow up on budget allocation by Friday. Need to schedule next sync.",
            &["Work", "Meeting", "Project A"],
            true,
            Some(NoteColor::Blue),
            None,
            0,
        ),
        seeded(
            "Grocery List",
            "Milk, Eggs, Bread, Butter, Coffee, Apples, Chicken breast, Spinach, Olive oil, Pasta.",
            &["Personal", "Shopping"],
            false,
            None,
            None,
            1,
        ),
        seeded(
            "Book Ideas for Summer",
            "1. 'The Midnight Library' by Matt Haig. 2. 'Project Hail Mary' by Andy Weir. 3. 'Circe' by Madeline Miller. 4. 'Dune' by Frank Herbert.",
            &["Personal", "Ideas"],
            true,
            Some(NoteColor::Green),
            None,
            2,
        ),
        seeded(
            "Workout Plan - Week 3",
            "Monday: Chest & Triceps. Tuesday: Back & Biceps. Wednesday: Legs & Shoulders. Thursday: Rest. Friday: Full Body. Weekend: Cardio.",
            &["Health", "Personal"],
            false,
            None,
            None,
            3,
        ),
        seeded(
            "Brainstorming Session - Marketing Campaign",
            "Target audience analysis, social media platforms, influencer outreach, budget considerations. Draft initial concepts by end of week.",
            &["Work", "Ideas"],
            false,
            Some(NoteColor::Orange),
            Some(Attachment::image("https://via.placeholder.com/150?text=Whiteboard")),
            4,
        ),
        seeded(
            "Recipe: Spicy Chicken Stir-fry",
            "Ingredients: Chicken, bell peppers, onion, broccoli, soy sauce, ginger, garlic, chili flakes. Steps: Marinate chicken, stir-fry veggies, combine.",
            &["Personal"],
            false,
            None,
            None,
            5,
        ),
        seeded(
            "Financial Goals - Q4",
            "Review investment portfolio, save 15% of income, pay off credit card debt. Consult with financial advisor.",
            &["Finance", "Personal"],
            true,
            Some(NoteColor::Yellow),
            None,
            6,
        ),
        seeded(
            "New Feature Idea - App",
            "Implement dark mode toggle, add multi-select for notes, improve search algorithm, integrate cloud sync for attachments.",
            &["Work", "Ideas", "Project A"],
            false,
            None,
            None,
            7,
        ),
        seeded(
            "To-Do List - Weekend",
            "Clean apartment, laundry, call mom, prepare for Monday meeting, read 30 mins.",
            &["Personal"],
            false,
            None,
            None,
            8,
        ),
        seeded(
            "Important Reminders",
            "Renew passport by end of month. Annual check-up next week. Pay utility bill.",
            &["Personal"],
            true,
            Some(NoteColor::Red),
            None,
            9,
        ),
        seeded(
            "Team Lunch Suggestions",
            "Italian, Mexican, Sushi, Burger joint. Vote for preferred cuisine by Tuesday.",
            &["Work", "Meeting"],
            false,
            None,
            None,
            10,
        ),
        seeded(
            "Travel Plans - Europe",
            "Paris (3), Rome (4), Barcelona (3). Book flights and accommodations by next month.",
            &["Personal"],
            false,
            Some(NoteColor::Purple),
            Some(Attachment::image("https://via.placeholder.com/150?text=Map")),
            11,
        ),
    ]
}

fn seeded(
    title: &str,
    content: &str,
    tags: &[&str],
    is_favorite: bool,
    color: Option<NoteColor>,
    attachment: Option<Attachment>,
    days_ago: i64,
) -> Note {
    let mut note = Note::new(NoteDraft {
        title: title.to_string(),
        content: content.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        is_favorite,
        color,
        attachment,
        ..Default::default()
    });
    let stamp = Utc::now() - Duration::days(days_ago);
    note.created_at = stamp;
    note.updated_at = stamp;
    note
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_sample_ids_are_unique() {
        let notes = sample_notes();
        let ids: HashSet<_> = notes.iter().map(|n| n.id.clone()).collect();
        assert_eq!(ids.len(), notes.len());
    }

    #[test]
    fn test_sample_notes_are_well_formed() {
        for note in sample_notes() {
            assert!(!note.title.trim().is_empty());
            assert!(note.updated_at >= note.created_at);
            let unique: HashSet<_> = note.tags.iter().collect();
            assert_eq!(unique.len(), note.tags.len());
        }
    }

    #[test]
    fn test_sample_spans_recency() {
        let notes = sample_notes();
        assert!(notes.iter().any(|n| n.is_favorite));
        assert!(notes.iter().any(|n| !n.is_favorite));
        assert!(notes.iter().any(|n| n.attachment.is_some()));
        let newest = notes.iter().map(|n| n.updated_at).max().unwrap();
        let oldest = notes.iter().map(|n| n.updated_at).min().unwrap();
        assert!(newest > oldest);
    }
}
