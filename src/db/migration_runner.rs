use rusqlite::{params, Connection, OptionalExtension, Result};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

const BACKUPS_TO_KEEP: usize = 5;

// Unit tests print instead of going through a logger nobody initialised
macro_rules! migration_log {
    ($level:ident, $($arg:tt)*) => {
        #[cfg(not(test))]
        {
            log::$level!($($arg)*);
        }
        #[cfg(test)]
        {
            println!("[{}] {}", stringify!($level), format!($($arg)*));
        }
    };
}

#[derive(Debug, Clone)]
pub struct Migration {
    pub version: u32,
    pub name: &'static str,
    pub sql: &'static str,
}

impl Migration {
    pub fn checksum(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.sql.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    pub fn new(version: u32, name: &'static str, sql: &'static str) -> Self {
        Self { version, name, sql }
    }
}

pub struct MigrationRunner {
    migrations: Vec<Migration>,
}

impl Default for MigrationRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl MigrationRunner {
    pub fn new() -> Self {
        Self {
            migrations: Self::collect_migrations(),
        }
    }

    fn collect_migrations() -> Vec<Migration> {
        vec![
            Migration::new(
                0,
                "bootstrap",
                include_str!("migrations/000_bootstrap.sql"),
            ),
            Migration::new(
                1,
                "initial_schema",
                include_str!("migrations/001_initial_schema.sql"),
            ),
            Migration::new(
                2,
                "distinct_accounts_view",
                include_str!("migrations/002_distinct_accounts_view.sql"),
            ),
        ]
    }

    pub fn run_pending_migrations(&self, conn: &Connection, db_path: &str) -> Result<usize> {
        let mut applied = 0;

        // Fresh database: nothing to back up, just create the bookkeeping table
        if !self.has_schema_migrations_table(conn)? {
            migration_log!(info, "Empty journal database, creating schema_migrations");
            self.apply_migration(conn, &self.migrations[0])?;
            applied += 1;
        }

        let current_version = self.get_current_version(conn)?;
        migration_log!(info, "Journal schema at version {:?}", current_version);

        let pending: Vec<&Migration> = self
            .migrations
            .iter()
            .filter(|m| match current_version {
                Some(v) => m.version > v,
                None => m.version > 0,
            })
            .collect();

        let Some(target) = pending.last() else {
            return Ok(applied);
        };

        migration_log!(info, "{} journal migrations to apply", pending.len());

        // Only databases that already hold data are worth a backup
        let backup_path = if current_version.unwrap_or(0) > 0 && is_file_backed(db_path) {
            let path = self.create_backup(db_path, target.version)?;
            migration_log!(info, "Journal backed up to {}", path.display());
            Some(path)
        } else {
            None
        };

        for migration in pending {
            match self.apply_migration(conn, migration) {
                Ok(_) => {
                    applied += 1;
                    migration_log!(info, "Migration {} ({}) applied", migration.version, migration.name);
                }
                Err(e) => {
                    migration_log!(error, "Migration {} ({}) failed and was rolled back: {}", migration.version, migration.name, e);
                    if let Some(path) = &backup_path {
                        migration_log!(error, "Pre-migration copy of the journal: {}", path.display());
                    }
                    return Err(e);
                }
            }
        }

        Ok(applied)
    }

    fn apply_migration(&self, conn: &Connection, migration: &Migration) -> Result<()> {
        let start = SystemTime::now();

        let tx = conn.unchecked_transaction()?;
        tx.execute_batch(migration.sql)?;

        let now = current_timestamp();
        let execution_time = start
            .elapsed()
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0);

        tx.execute(
            "INSERT INTO schema_migrations (version, name, applied_at, checksum, execution_time_ms, notes)
             VALUES (?, ?, ?, ?, ?, NULL)",
            params![
                migration.version,
                migration.name,
                now,
                migration.checksum(),
                execution_time
            ],
        )?;

        tx.commit()?;

        migration_log!(
            info,
            "{} took {}ms",
            migration.name,
            execution_time
        );

        Ok(())
    }

    pub fn verify_migrations(&self, conn: &Connection) -> Result<()> {
        let mut stmt = conn.prepare(
            "SELECT version, name, checksum FROM schema_migrations WHERE checksum IS NOT NULL ORDER BY version",
        )?;

        let applied: Vec<(u32, String, String)> = stmt
            .query_map([], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?))
            })?
            .collect::<Result<Vec<_>>>()?;

        for (version, name, stored_checksum) in applied {
            if let Some(migration) = self.migrations.iter().find(|m| m.version == version) {
                let expected_checksum = migration.checksum();
                if stored_checksum != expected_checksum {
                    migration_log!(
                        error,
                        "Migration {} ({}) no longer matches the applied SQL: stored {}, now {}",
                        version,
                        name,
                        stored_checksum,
                        expected_checksum
                    );

                    return Err(rusqlite::Error::InvalidQuery);
                }
            }
        }

        Ok(())
    }

    pub fn get_current_version(&self, conn: &Connection) -> Result<Option<u32>> {
        if !self.has_schema_migrations_table(conn)? {
            return Ok(None);
        }

        let version: Option<u32> = conn
            .query_row(
                "SELECT MAX(version) FROM schema_migrations",
                [],
                |row| row.get::<_, Option<u32>>(0),
            )
            .optional()?
            .flatten();

        Ok(version)
    }

    fn create_backup(&self, db_path: &str, target_version: u32) -> Result<PathBuf> {
        let db_path_buf = PathBuf::from(db_path);
        let db_dir = db_path_buf
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        let backup_dir = db_dir.join("backups");

        fs::create_dir_all(&backup_dir).map_err(|e| {
            migration_log!(error, "Cannot create backup directory: {}", e);
            io_failure(format!("Cannot create backup directory: {}", e))
        })?;

        let timestamp = current_timestamp();
        let backup_name = format!("pre_migration_v{}_{}.db", target_version, timestamp);
        let backup_path = backup_dir.join(&backup_name);

        let src = Connection::open(db_path)?;
        let mut dst = Connection::open(&backup_path)?;

        {
            let backup = rusqlite::backup::Backup::new(&src, &mut dst)?;
            backup.run_to_completion(5, std::time::Duration::from_millis(250), None)?;
        }

        let metadata = fs::metadata(&backup_path).map_err(|e| {
            migration_log!(error, "Cannot stat backup file: {}", e);
            io_failure(format!("Cannot stat backup file: {}", e))
        })?;

        if metadata.len() == 0 {
            migration_log!(error, "Backup file has zero length");
            return Err(io_failure("Backup file has zero length".to_string()));
        }

        let integrity: String = dst.pragma_query_value(None, "integrity_check", |row| row.get(0))?;
        if integrity != "ok" {
            migration_log!(error, "Backup failed integrity_check: {}", integrity);
            return Err(io_failure(format!("Backup failed integrity_check: {}", integrity)));
        }

        migration_log!(
            info,
            "Backup {} verified ({:.2} MB)",
            backup_path.display(),
            metadata.len() as f64 / 1_048_576.0
        );

        self.cleanup_old_backups(&backup_dir)?;

        Ok(backup_path)
    }

    fn cleanup_old_backups(&self, backup_dir: &Path) -> Result<()> {
        let mut backups: Vec<_> = fs::read_dir(backup_dir)
            .map_err(|e| {
                migration_log!(warn, "Cannot list backup directory: {}", e);
                io_failure(format!("Cannot list backup directory: {}", e))
            })?
            .filter_map(|entry| entry.ok())
            .filter(|entry| {
                entry.path().extension().and_then(|s| s.to_str()) == Some("db")
                    && entry
                        .file_name()
                        .to_str()
                        .map(|s| s.starts_with("pre_migration_"))
                        .unwrap_or(false)
            })
            .collect();

        // Oldest first
        backups.sort_by_key(|entry| {
            entry
                .metadata()
                .and_then(|m| m.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH)
        });

        if backups.len() > BACKUPS_TO_KEEP {
            for entry in backups.iter().take(backups.len() - BACKUPS_TO_KEEP) {
                if let Err(e) = fs::remove_file(entry.path()) {
                    migration_log!(warn, "Cannot remove stale backup: {}", e);
                }
            }
        }

        Ok(())
    }

    fn has_schema_migrations_table(&self, conn: &Connection) -> Result<bool> {
        let count: i32 = conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='schema_migrations'",
            [],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }
}

fn is_file_backed(db_path: &str) -> bool {
    db_path != ":memory:" && Path::new(db_path).exists()
}

fn io_failure(message: String) -> rusqlite::Error {
    rusqlite::Error::SqliteFailure(rusqlite::ffi::Error::new(1), Some(message))
}

fn current_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_are_sequential() {
        let runner = MigrationRunner::new();
        for (i, m) in runner.migrations.iter().enumerate() {
            assert_eq!(m.version as usize, i, "Migration versions must be sequential");
        }
    }

    #[test]
    fn test_all_migrations_have_valid_sql() {
        let runner = MigrationRunner::new();
        let conn = Connection::open_in_memory().unwrap();

        for migration in &runner.migrations {
            conn.execute_batch(migration.sql)
                .unwrap_or_else(|_| panic!("Migration {} has invalid SQL", migration.name));
        }
    }

    #[test]
    fn test_fresh_install() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute("PRAGMA foreign_keys = ON", []).unwrap();

        let runner = MigrationRunner::new();
        let applied = runner.run_pending_migrations(&conn, ":memory:").unwrap();
        assert_eq!(applied, 3);

        for (kind, name) in [("table", "settings"), ("table", "trades"), ("view", "distinct_accounts")] {
            let count: i32 = conn
                .query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type=? AND name=?",
                    params![kind, name],
                    |row| row.get(0),
                )
                .unwrap();
            assert_eq!(count, 1, "{} {} should exist", kind, name);
        }

        let settings_rows: i32 = conn
            .query_row("SELECT COUNT(*) FROM settings", [], |row| row.get(0))
            .unwrap();
        assert_eq!(settings_rows, 1);
    }

    #[test]
    fn test_idempotency() {
        let conn = Connection::open_in_memory().unwrap();
        let runner = MigrationRunner::new();

        let first_run = runner.run_pending_migrations(&conn, ":memory:").unwrap();
        assert!(first_run > 0);

        let second_run = runner.run_pending_migrations(&conn, ":memory:").unwrap();
        assert_eq!(second_run, 0, "Should not apply any migrations on second run");
        assert_eq!(runner.get_current_version(&conn).unwrap(), Some(2));
    }

    #[test]
    fn test_migration_checksums() {
        let conn = Connection::open_in_memory().unwrap();
        let runner = MigrationRunner::new();
        runner.run_pending_migrations(&conn, ":memory:").unwrap();

        let count: i32 = conn
            .query_row(
                "SELECT COUNT(*) FROM schema_migrations WHERE checksum IS NOT NULL",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 3);
        assert!(runner.verify_migrations(&conn).is_ok());

        conn.execute("UPDATE schema_migrations SET checksum = 'tampered' WHERE version = 1", [])
            .unwrap();
        assert!(runner.verify_migrations(&conn).is_err());
    }

    #[test]
    fn test_failed_migration_rollback() {
        let conn = Connection::open_in_memory().unwrap();

        let runner = MigrationRunner::new();
        runner.apply_migration(&conn, &runner.migrations[0]).unwrap();
        runner.apply_migration(&conn, &runner.migrations[1]).unwrap();

        let bad_migration = Migration::new(2, "bad_migration", "INVALID SQL SYNTAX");
        let result = runner.apply_migration(&conn, &bad_migration);
        assert!(result.is_err(), "Should fail on invalid SQL");

        let version = runner.get_current_version(&conn).unwrap();
        assert_eq!(version, Some(1), "Version should still be 1 after failed migration");
    }

    #[test]
    fn test_pending_migrations_back_up_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("journal.db");
        let db_path_str = db_path.to_str().unwrap();

        let conn = Connection::open(&db_path).unwrap();
        let runner = MigrationRunner::new();
        runner.apply_migration(&conn, &runner.migrations[0]).unwrap();
        runner.apply_migration(&conn, &runner.migrations[1]).unwrap();

        let applied = runner.run_pending_migrations(&conn, db_path_str).unwrap();
        assert_eq!(applied, 1);

        let backups: Vec<_> = fs::read_dir(dir.path().join("backups")).unwrap().collect();
        assert_eq!(backups.len(), 1);
    }
}
