//! Helpers for integration tests.

use std::path::PathBuf;

use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use pushkind_common::db::{DbPool, establish_connection_pool};
use tempfile::TempDir;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Migrated SQLite database used in integration tests.
pub struct TestDb {
    path: PathBuf,
    pool: DbPool,
    _dir: Option<TempDir>,
}

impl TestDb {
    /// Fresh database named `filename` inside its own temporary directory.
    pub fn new(filename: &str) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temporary directory.");
        let mut test_db = Self::at(dir.path().join(filename));
        test_db._dir = Some(dir);
        test_db
    }

    /// Fresh database at `path`; its files are removed on drop.
    pub fn at(path: PathBuf) -> Self {
        std::fs::remove_file(&path).ok();

        let pool = establish_connection_pool(&path.to_string_lossy())
            .expect("Failed to establish SQLite connection.");
        let mut conn = pool
            .get()
            .expect("Failed to get SQLite connection from pool.");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("Migrations failed");

        TestDb {
            path,
            pool,
            _dir: None,
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        let path = self.path.to_string_lossy();
        std::fs::remove_file(&self.path).ok();
        std::fs::remove_file(format!("{path}-shm")).ok();
        std::fs::remove_file(format!("{path}-wal")).ok();
    }
}
