//! SQLite cache for UI selection state

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

/// Database wrapper with thread-safe access
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open or create the database at the given path
    pub fn open(path: &Path) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path).context("Failed to open database")?;
        Self::with_connection(conn)
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        let db = Self {
            conn: Mutex::new(conn),
        };
        db.init_schema()?;
        Ok(db)
    }

    /// Initialize database schema
    fn init_schema(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();

        conn.execute_batch(
            r#"
            -- Checkbox selection per mod file path
            CREATE TABLE IF NOT EXISTS checkbox_states (
                path TEXT PRIMARY KEY,
                checked INTEGER NOT NULL
            );

            -- Schema version
            CREATE TABLE IF NOT EXISTS schema_version (
                version INTEGER PRIMARY KEY
            );
            INSERT OR IGNORE INTO schema_version (version) VALUES (1);
            "#,
        )
        .context("Failed to initialize database schema")?;

        Ok(())
    }

    // ========== Checkbox state ==========

    pub fn get_checkbox_state(&self, path: &str) -> Result<Option<bool>> {
        let conn = self.conn.lock().unwrap();
        let checked = conn
            .query_row(
                "SELECT checked FROM checkbox_states WHERE path = ?1",
                params![path],
                |row| row.get::<_, i32>(0),
            )
            .optional()?;
        Ok(checked.map(|c| c != 0))
    }

    pub fn set_checkbox_state(&self, path: &str, checked: bool) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO checkbox_states (path, checked) VALUES (?1, ?2)
             ON CONFLICT(path) DO UPDATE SET checked = excluded.checked",
            params![path, checked as i32],
        )?;
        Ok(())
    }

    pub fn get_checkbox_states(&self) -> Result<HashMap<String, bool>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT path, checked FROM checkbox_states")?;
        let states = stmt
            .query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, i32>(1)? != 0))
            })?
            .collect::<rusqlite::Result<HashMap<_, _>>>()?;
        Ok(states)
    }

    pub fn clear_checkbox_states(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute("DELETE FROM checkbox_states", [])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_checkbox_states() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(db.get_checkbox_state("Weapons/Weapons.esp").unwrap(), None);

        db.set_checkbox_state("Weapons/Weapons.esp", true).unwrap();
        db.set_checkbox_state("Armor/Armor.esp", false).unwrap();
        db.set_checkbox_state("Weapons/Weapons.esp", false).unwrap();

        assert_eq!(db.get_checkbox_state("Weapons/Weapons.esp").unwrap(), Some(false));
        let states = db.get_checkbox_states().unwrap();
        assert_eq!(states.len(), 2);
        assert!(!states["Armor/Armor.esp"]);

        db.clear_checkbox_states().unwrap();
        assert!(db.get_checkbox_states().unwrap().is_empty());
    }

    #[test]
    fn test_states_persist_on_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/state.db");

        Database::open(&path)
            .unwrap()
            .set_checkbox_state("A.esp", true)
            .unwrap();

        let db = Database::open(&path).unwrap();
        assert_eq!(db.get_checkbox_state("A.esp").unwrap(), Some(true));
    }
}
