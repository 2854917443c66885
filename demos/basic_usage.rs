// Example: Basic usage of the noteleaf-core library
use std::sync::Arc;

use noteleaf_core::models::*;
use noteleaf_core::stats::{recently_updated, CollectionStats};
use noteleaf_core::storage::MemoryGateway;
use noteleaf_core::{run_query, NoteStore, QuerySpec, SortKey, SortOrder};

fn main() -> anyhow::Result<()> {
    println!("--- Basic Usage of noteleaf-core ---");

    // Open a store over an in-memory gateway; first run seeds sample notes
    let mut store = NoteStore::open(Arc::new(MemoryGateway::new()))?;
    println!("   ✓ Store opened with {} seeded notes", store.all().len());

    // ========== Create Notes ==========
    println!("\n2. Creating notes...");
    let grocery = store.create(NoteDraft {
        title: "Grocery Run".to_string(),
        content: "Milk, eggs, coffee, apples".to_string(),
        tags: vec!["Personal".to_string(), "Shopping".to_string()],
        ..Default::default()
    })?;
    println!("   ✓ Created note: {}", grocery.title);

    let standup = store.create(NoteDraft {
        title: "Standup Notes".to_string(),
        content: "Blocked on the API review, pairing with Sam after lunch".to_string(),
        tags: vec!["Work".to_string()],
        color: Some(NoteColor::Blue),
        ..Default::default()
    })?;
    println!("   ✓ Created note: {}", standup.title);

    // ========== Folders ==========
    println!("\n3. Organizing into folders...");
    let work = store.create_folder("Work")?;
    store.update(
        &standup.id,
        NotePatch {
            folder_id: Some(Some(work.id.clone())),
            ..Default::default()
        },
    )?;
    println!("   ✓ Moved '{}' into '{}'", standup.title, work.name);

    // ========== Favorites ==========
    println!("\n4. Starring a note...");
    let starred = store.toggle_favorite(&grocery.id)?;
    println!("   ✓ {} is now a favorite: {}", starred.title, starred.is_favorite);

    // ========== Querying ==========
    println!("\n5. Querying...");
    let snapshot = store.all();

    let favorites = run_query(
        &snapshot,
        &QuerySpec {
            favorites_only: true,
            ..Default::default()
        },
    );
    println!("   • Favorites: {}", favorites.len());

    let hits = run_query(
        &snapshot,
        &QuerySpec {
            search_term: Some("coffee".to_string()),
            ..Default::default()
        },
    );
    println!("   • Notes mentioning 'coffee': {}", hits.len());

    let alphabetical = run_query(
        &snapshot,
        &QuerySpec {
            tags: vec!["Work".to_string()],
            sort_key: SortKey::Title,
            sort_order: SortOrder::Ascending,
            ..Default::default()
        },
    );
    println!("   • Work notes A-Z:");
    for note in &alphabetical {
        println!("     - {}", note.title);
    }

    // ========== Statistics ==========
    println!("\n6. Collection statistics:");
    let stats = CollectionStats::collect(&snapshot);
    println!("   • Total notes: {}", stats.total);
    println!("   • Favorites: {}", stats.favorites);
    println!("   • Distinct tags: {}", stats.distinct_tags);
    for note in recently_updated(&snapshot, 3) {
        println!("   • Recent: {}", note.title);
    }

    // ========== Folder deletion keeps notes ==========
    println!("\n7. Deleting the folder...");
    store.remove_folder(&work.id)?;
    let orphan = store.get(&standup.id)?;
    println!(
        "   ✓ '{}' survives, folder_id = {:?}",
        orphan.title, orphan.folder_id
    );

    // Wait for queued saves before exit
    store.flush()?;
    println!("\n✅ Example completed successfully!");

    Ok(())
}
