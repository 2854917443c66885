use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Folder {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Folder {
    /// Create a new folder with a generated UUID
    pub fn new(name: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            created_at: Utc::now(),
        }
    }

    /// Validate folder name
    pub fn is_valid_name(name: &str) -> bool {
        !name.trim().is_empty()
    }
}
