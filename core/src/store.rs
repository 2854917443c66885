use crate::models::{Folder, Note, NoteDraft, NotePatch};
use crate::sample;
use crate::storage::{BackgroundSaver, CollectionDocument, StorageGateway, STORAGE_KEY};
use crate::{Error, Result};
use std::sync::Arc;

/// Authoritative owner of the note and folder collections, and the only
/// sanctioned write path. Views read a snapshot via `all()` and derive their
/// ordering through the query engine; nothing mutates notes from outside.
///
/// Every successful mutation queues a save of the full serialized
/// collection. The in-memory effect is visible immediately; durability is
/// eventual and a failed save never rolls the mutation back.
pub struct NoteStore {
    notes: Vec<Note>,
    folders: Vec<Folder>,
    revision: u64,
    saver: BackgroundSaver,
}

impl NoteStore {
    /// Open the store, loading the persisted collection. On first run (no
    /// stored document) the built-in sample collection is seeded and saved.
    pub fn open(gateway: Arc<dyn StorageGateway>) -> Result<Self> {
        let loaded = gateway.load(STORAGE_KEY)?;
        let saver = BackgroundSaver::spawn(gateway, STORAGE_KEY);

        let mut store = match loaded {
            Some(blob) => {
                let document = CollectionDocument::from_json(&blob)?;
                Self {
                    notes: document.notes,
                    folders: document.folders,
                    revision: 0,
                    saver,
                }
            }
            None => {
                log::info!("no stored collection found, seeding sample notes");
                let mut store = Self {
                    notes: sample::sample_notes(),
                    folders: Vec::new(),
                    revision: 0,
                    saver,
                };
                store.persist();
                store
            }
        };

        store.revision = 0;
        Ok(store)
    }

    /// Create a note from a draft
    pub fn create(&mut self, draft: NoteDraft) -> Result<Note> {
        if draft.title.trim().is_empty() {
            return Err(Error::InvalidInput("note title cannot be empty".to_string()));
        }
        if let Some(folder_id) = &draft.folder_id {
            self.require_folder(folder_id)?;
        }

        let note = Note::new(draft);
        self.notes.push(note.clone());
        self.persist();
        Ok(note)
    }

    /// Merge a patch into an existing note, refreshing `updated_at`
    pub fn update(&mut self, id: &str, patch: NotePatch) -> Result<Note> {
        if let Some(title) = &patch.title {
            if title.trim().is_empty() {
                return Err(Error::InvalidInput("note title cannot be empty".to_string()));
            }
        }
        if let Some(Some(folder_id)) = &patch.folder_id {
            self.require_folder(folder_id)?;
        }

        let note = self
            .notes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| Error::NotFound(format!("Note not found: {}", id)))?;

        if let Some(title) = patch.title {
            note.title = title;
        }
        if let Some(content) = patch.content {
            note.content = content;
        }
        if let Some(tags) = patch.tags {
            note.tags = Note::dedup_tags(tags);
        }
        if let Some(folder_id) = patch.folder_id {
            note.folder_id = folder_id;
        }
        if let Some(color) = patch.color {
            note.color = color;
        }
        if let Some(is_protected) = patch.is_protected {
            note.is_protected = is_protected;
        }
        if let Some(password) = patch.password {
            note.password = password;
        }
        if let Some(location) = patch.location {
            note.location = location;
        }
        if let Some(attachment) = patch.attachment {
            note.attachment = attachment;
        }
        note.touch();

        let updated = note.clone();
        self.persist();
        Ok(updated)
    }

    /// Delete a note. Hard delete, no tombstone.
    pub fn remove(&mut self, id: &str) -> Result<()> {
        let index = self
            .notes
            .iter()
            .position(|n| n.id == id)
            .ok_or_else(|| Error::NotFound(format!("Note not found: {}", id)))?;

        self.notes.remove(index);
        self.persist();
        Ok(())
    }

    /// Flip a note's favorite flag. Also refreshes `updated_at`, so a newly
    /// starred note surfaces in recently-updated views.
    pub fn toggle_favorite(&mut self, id: &str) -> Result<Note> {
        let note = self
            .notes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| Error::NotFound(format!("Note not found: {}", id)))?;

        note.is_favorite = !note.is_favorite;
        note.touch();

        let updated = note.clone();
        self.persist();
        Ok(updated)
    }

    /// Get a note by ID
    pub fn get(&self, id: &str) -> Result<Note> {
        self.notes
            .iter()
            .find(|n| n.id == id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("Note not found: {}", id)))
    }

    /// Snapshot of the whole collection in insertion order. The returned
    /// notes are copies; callers cannot reach the store's internal state.
    pub fn all(&self) -> Vec<Note> {
        self.notes.clone()
    }

    /// Create a folder
    pub fn create_folder(&mut self, name: &str) -> Result<Folder> {
        if !Folder::is_valid_name(name) {
            return Err(Error::InvalidInput("folder name cannot be empty".to_string()));
        }

        let folder = Folder::new(name.trim().to_string());
        self.folders.push(folder.clone());
        self.persist();
        Ok(folder)
    }

    /// Rename a folder
    pub fn rename_folder(&mut self, id: &str, name: &str) -> Result<Folder> {
        if !Folder::is_valid_name(name) {
            return Err(Error::InvalidInput("folder name cannot be empty".to_string()));
        }

        let folder = self
            .folders
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| Error::NotFound(format!("Folder not found: {}", id)))?;

        folder.name = name.trim().to_string();
        let renamed = folder.clone();
        self.persist();
        Ok(renamed)
    }

    /// Delete a folder. Member notes survive with their `folder_id` cleared;
    /// folder deletion never cascades to note deletion.
    pub fn remove_folder(&mut self, id: &str) -> Result<()> {
        let index = self
            .folders
            .iter()
            .position(|f| f.id == id)
            .ok_or_else(|| Error::NotFound(format!("Folder not found: {}", id)))?;

        self.folders.remove(index);
        for note in self.notes.iter_mut().filter(|n| n.folder_id.as_deref() == Some(id)) {
            note.folder_id = None;
        }
        self.persist();
        Ok(())
    }

    /// Snapshot of all folders
    pub fn folders(&self) -> Vec<Folder> {
        self.folders.clone()
    }

    /// Change counter, bumped on every successful mutation. Views re-run
    /// their query when it moves.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Block until every queued save has been written, surfacing the
    /// outcome of the final write.
    pub fn flush(&self) -> Result<()> {
        self.saver.flush()
    }

    fn require_folder(&self, id: &str) -> Result<()> {
        if self.folders.iter().any(|f| f.id == id) {
            Ok(())
        } else {
            Err(Error::NotFound(format!("Folder not found: {}", id)))
        }
    }

    fn persist(&mut self) {
        self.revision += 1;
        let document = CollectionDocument::new(self.notes.clone(), self.folders.clone());
        match document.to_json() {
            Ok(blob) => self.saver.enqueue(blob),
            Err(err) => log::error!("failed to serialize collection: {}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NoteColor;
    use crate::storage::MemoryGateway;
    use std::collections::HashSet;
    use std::thread::sleep;
    use std::time::Duration;

    fn empty_gateway() -> Arc<MemoryGateway> {
        let gateway = Arc::new(MemoryGateway::new());
        let blob = CollectionDocument::new(Vec::new(), Vec::new())
            .to_json()
            .unwrap();
        gateway.save(STORAGE_KEY, &blob).unwrap();
        gateway
    }

    fn empty_store() -> NoteStore {
        NoteStore::open(empty_gateway()).unwrap()
    }

    fn draft(title: &str) -> NoteDraft {
        NoteDraft {
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_appends_and_assigns_fresh_id() {
        let mut store = empty_store();

        let first = store.create(draft("First")).unwrap();
        let second = store.create(draft("Second")).unwrap();
        let third = store.create(draft("Third")).unwrap();

        let ids: HashSet<_> = [&first.id, &second.id, &third.id].into_iter().collect();
        assert_eq!(ids.len(), 3);
        assert_eq!(store.all().len(), 3);
        assert_eq!(store.all()[2].title, "Third");
    }

    #[test]
    fn test_create_rejects_blank_title() {
        let mut store = empty_store();

        assert!(matches!(store.create(draft("")), Err(Error::InvalidInput(_))));
        assert!(matches!(store.create(draft("   ")), Err(Error::InvalidInput(_))));
        assert!(store.all().is_empty());
    }

    #[test]
    fn test_create_dedups_tags() {
        let mut store = empty_store();
        let note = store
            .create(NoteDraft {
                title: "Tagged".to_string(),
                tags: vec!["Work".to_string(), "Work".to_string(), "Ideas".to_string()],
                ..Default::default()
            })
            .unwrap();
        assert_eq!(note.tags, vec!["Work", "Ideas"]);
    }

    #[test]
    fn test_update_merges_patch_and_preserves_identity() {
        let mut store = empty_store();
        let note = store.create(draft("Original")).unwrap();

        sleep(Duration::from_millis(10));
        let updated = store
            .update(
                &note.id,
                NotePatch {
                    content: Some("new body".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.id, note.id);
        assert_eq!(updated.created_at, note.created_at);
        assert_eq!(updated.title, "Original");
        assert_eq!(updated.content, "new body");
        assert!(updated.updated_at > note.updated_at);
    }

    #[test]
    fn test_update_unknown_id_is_not_found() {
        let mut store = empty_store();
        let result = store.update("missing", NotePatch::default());
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[test]
    fn test_update_rejects_blank_title_without_touching_note() {
        let mut store = empty_store();
        let note = store.create(draft("Keep me")).unwrap();

        let result = store.update(
            &note.id,
            NotePatch {
                title: Some("  ".to_string()),
                ..Default::default()
            },
        );

        assert!(matches!(result, Err(Error::InvalidInput(_))));
        assert_eq!(store.get(&note.id).unwrap(), note);
    }

    #[test]
    fn test_update_can_clear_optional_fields() {
        let mut store = empty_store();
        let folder = store.create_folder("Work").unwrap();
        let note = store
            .create(NoteDraft {
                title: "Colored".to_string(),
                folder_id: Some(folder.id.clone()),
                color: Some(NoteColor::Red),
                ..Default::default()
            })
            .unwrap();

        let updated = store
            .update(
                &note.id,
                NotePatch {
                    folder_id: Some(None),
                    color: Some(None),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.folder_id, None);
        assert_eq!(updated.color, None);
    }

    #[test]
    fn test_folder_reference_must_exist() {
        let mut store = empty_store();

        let result = store.create(NoteDraft {
            title: "Orphan".to_string(),
            folder_id: Some("no-such-folder".to_string()),
            ..Default::default()
        });
        assert!(matches!(result, Err(Error::NotFound(_))));

        let note = store.create(draft("Loose")).unwrap();
        let result = store.update(
            &note.id,
            NotePatch {
                folder_id: Some(Some("no-such-folder".to_string())),
                ..Default::default()
            },
        );
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[test]
    fn test_remove_deletes_exactly_one() {
        let mut store = empty_store();
        let keep = store.create(draft("Keep")).unwrap();
        let gone = store.create(draft("Gone")).unwrap();

        store.remove(&gone.id).unwrap();

        assert_eq!(store.all().len(), 1);
        assert!(matches!(store.get(&gone.id), Err(Error::NotFound(_))));
        assert!(store.get(&keep.id).is_ok());

        assert!(matches!(store.remove(&gone.id), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_toggle_favorite_flips_and_bumps_updated_at() {
        let mut store = empty_store();
        let note = store.create(draft("Starrable")).unwrap();
        assert!(!note.is_favorite);

        sleep(Duration::from_millis(10));
        let starred = store.toggle_favorite(&note.id).unwrap();
        assert!(starred.is_favorite);
        assert!(starred.updated_at > note.updated_at);

        let unstarred = store.toggle_favorite(&note.id).unwrap();
        assert!(!unstarred.is_favorite);

        assert!(matches!(store.toggle_favorite("missing"), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_all_returns_defensive_copy() {
        let mut store = empty_store();
        store.create(draft("Untouchable")).unwrap();

        let mut snapshot = store.all();
        snapshot[0].title = "Hijacked".to_string();
        snapshot.clear();

        assert_eq!(store.all()[0].title, "Untouchable");
    }

    #[test]
    fn test_first_run_seeds_once() {
        let gateway = Arc::new(MemoryGateway::new());

        let store = NoteStore::open(gateway.clone()).unwrap();
        let seeded: Vec<String> = store.all().iter().map(|n| n.id.clone()).collect();
        assert!(!seeded.is_empty());
        store.flush().unwrap();
        drop(store);

        let reopened = NoteStore::open(gateway).unwrap();
        let restored: Vec<String> = reopened.all().iter().map(|n| n.id.clone()).collect();
        assert_eq!(restored, seeded);
    }

    #[test]
    fn test_mutations_survive_reopen() {
        let gateway = empty_gateway();

        let mut store = NoteStore::open(gateway.clone()).unwrap();
        let note = store.create(draft("Durable")).unwrap();
        let folder = store.create_folder("Archive").unwrap();
        store
            .update(
                &note.id,
                NotePatch {
                    folder_id: Some(Some(folder.id.clone())),
                    ..Default::default()
                },
            )
            .unwrap();
        store.flush().unwrap();
        drop(store);

        let reopened = NoteStore::open(gateway).unwrap();
        let restored = reopened.get(&note.id).unwrap();
        assert_eq!(restored.title, "Durable");
        assert_eq!(restored.folder_id, Some(folder.id));
        assert_eq!(reopened.folders().len(), 1);
    }

    #[test]
    fn test_remove_folder_cascades_to_null() {
        let mut store = empty_store();
        let folder = store.create_folder("Doomed").unwrap();
        let a = store
            .create(NoteDraft {
                title: "A".to_string(),
                folder_id: Some(folder.id.clone()),
                ..Default::default()
            })
            .unwrap();
        let b = store
            .create(NoteDraft {
                title: "B".to_string(),
                folder_id: Some(folder.id.clone()),
                ..Default::default()
            })
            .unwrap();

        store.remove_folder(&folder.id).unwrap();

        assert_eq!(store.all().len(), 2);
        assert_eq!(store.get(&a.id).unwrap().folder_id, None);
        assert_eq!(store.get(&b.id).unwrap().folder_id, None);
        assert!(store.folders().is_empty());
    }

    #[test]
    fn test_folder_crud() {
        let mut store = empty_store();

        assert!(matches!(store.create_folder("  "), Err(Error::InvalidInput(_))));

        let folder = store.create_folder("  Inbox  ").unwrap();
        assert_eq!(folder.name, "Inbox");

        let renamed = store.rename_folder(&folder.id, "Projects").unwrap();
        assert_eq!(renamed.name, "Projects");
        assert_eq!(store.folders()[0].name, "Projects");

        assert!(matches!(
            store.rename_folder("missing", "X"),
            Err(Error::NotFound(_))
        ));
        assert!(matches!(store.remove_folder("missing"), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_revision_moves_on_every_mutation() {
        let mut store = empty_store();
        let start = store.revision();

        let note = store.create(draft("Tick")).unwrap();
        assert!(store.revision() > start);

        let before_toggle = store.revision();
        store.toggle_favorite(&note.id).unwrap();
        assert!(store.revision() > before_toggle);

        let before_failed = store.revision();
        let _ = store.create(draft(""));
        assert_eq!(store.revision(), before_failed);
    }
}
