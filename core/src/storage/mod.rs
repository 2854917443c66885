mod database;
mod document;
mod gateway;
mod saver;

pub use database::Database;
pub use document::{CollectionDocument, DOCUMENT_VERSION, STORAGE_KEY};
pub use gateway::{MemoryGateway, StorageGateway};
pub(crate) use saver::BackgroundSaver;
