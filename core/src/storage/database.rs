use crate::storage::StorageGateway;
use crate::Result;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS storage (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);";

/// SQLite-backed key/value store holding the serialized collection.
pub struct Database {
    db_path: PathBuf,
}

impl Database {
    /// Create a new database manager
    pub fn new<P: AsRef<Path>>(db_path: P) -> Self {
        Self {
            db_path: db_path.as_ref().to_path_buf(),
        }
    }

    /// Open a connection, creating the file and schema on first use
    fn connect(&self) -> Result<Connection> {
        if let Some(parent) = self.db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(&self.db_path)?;
        conn.execute_batch(SCHEMA)?;

        Ok(conn)
    }

    /// Check if the database exists
    pub fn exists(&self) -> bool {
        self.db_path.exists()
    }

    /// Get the database path
    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// Backup the database
    pub fn backup<P: AsRef<Path>>(&self, backup_path: P) -> Result<()> {
        std::fs::copy(&self.db_path, backup_path)?;
        Ok(())
    }
}

impl StorageGateway for Database {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let conn = self.connect()?;
        let value = conn
            .query_row(
                "SELECT value FROM storage WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn save(&self, key: &str, blob: &str) -> Result<()> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO storage (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, blob],
        )?;
        Ok(())
    }
}
