mod folder;
mod note;

pub use folder::Folder;
pub use note::{Attachment, Location, Note, NoteColor, NoteDraft, NotePatch};
