pub mod error;
pub mod models;
pub mod query;
pub mod sample;
pub mod stats;
pub mod storage;
pub mod store;

pub use error::{Error, Result};
pub use query::{run_query, QuerySpec, SortKey, SortOrder};
pub use store::NoteStore;
