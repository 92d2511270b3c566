//! # Database Pool Management
//!
//! Opening the SQLite file and handing out repositories.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CLI startup                                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbConfig::new(path)            or   DbConfig::in_memory() (tests)     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::new(config).await  ← create file, pool, run migrations      │
//! │       │                                                                 │
//! │       ├──► db.history()     HistoryRepository                          │
//! │       ├──► db.drafts()      DraftRepository                            │
//! │       └──► db.favorites()   FavoriteRepository                         │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │             StorageRepository (app_storage key/value rows)              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  db.close().await                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! File databases use WAL journaling. In-memory databases live on a single
//! connection that is never recycled.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::draft::DraftRepository;
use crate::repository::favorites::FavoriteRepository;
use crate::repository::history::HistoryRepository;
use crate::repository::storage::StorageRepository;

const IN_MEMORY_PATH: &str = ":memory:";

// =============================================================================
// Configuration
// =============================================================================

/// Where the database lives and how the pool behaves.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new("/path/to/quickquote.db")
///     .max_connections(2)
///     .connect_timeout(Duration::from_secs(5));
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// SQLite file, or `:memory:`.
    pub path: PathBuf,

    /// Pool ceiling. A CLI run issues one statement at a time, so 2 is
    /// plenty.
    pub max_connections: u32,

    /// Connections held open while idle.
    pub min_connections: u32,

    /// How long to wait for a free connection (30 s for files).
    pub acquire_timeout: Duration,

    /// Idle connections are dropped after this (10 min for files).
    pub idle_timeout: Duration,

    /// Apply embedded migrations when opening.
    pub migrate: bool,
}

impl DbConfig {
    /// The file at `path`. The file and its parent directory are created
    /// on open if missing.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            path: path.into(),
            max_connections: 2,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(10 * 60),
            migrate: true,
        }
    }

    pub fn max_connections(mut self, n: u32) -> Self {
        self.max_connections = n;
        self
    }

    pub fn min_connections(mut self, n: u32) -> Self {
        self.min_connections = n;
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }

    /// Turns migration on open on or off.
    pub fn run_migrations(mut self, enabled: bool) -> Self {
        self.migrate = enabled;
        self
    }

    /// A private in-memory database, used by tests.
    pub fn in_memory() -> Self {
        DbConfig {
            path: PathBuf::from(IN_MEMORY_PATH),
            // the database only exists while its one connection is open
            max_connections: 1,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(60),
            migrate: true,
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.path == Path::new(IN_MEMORY_PATH)
    }

    fn connect_options(&self) -> DbResult<SqliteConnectOptions> {
        if self.is_in_memory() {
            return SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| DbError::ConnectionFailed(e.to_string()));
        }

        if let Some(dir) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)
                .map_err(|e| DbError::ConnectionFailed(format!("{}: {e}", dir.display())))?;
        }

        Ok(SqliteConnectOptions::new()
            .filename(&self.path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal))
    }
}

// =============================================================================
// Database
// =============================================================================

/// Database handle providing repository access.
///
/// Cloning is cheap; clones share the pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens the database and runs pending migrations (if enabled).
    ///
    /// ## Errors
    /// - [`DbError::ConnectionFailed`] if the file can't be created or opened
    /// - [`DbError::MigrationFailed`] if a migration fails
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        debug!(path = %config.path.display(), "Opening quote database");

        let options = config.connect_options()?;
        let pool_options = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.acquire_timeout);
        let pool_options = if config.is_in_memory() {
            pool_options.idle_timeout(None).max_lifetime(None)
        } else {
            pool_options.idle_timeout(Some(config.idle_timeout))
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        info!(
            path = %config.path.display(),
            connections = config.max_connections,
            "Quote database open"
        );

        let db = Database { pool };
        if config.migrate {
            db.run_migrations().await?;
        }
        Ok(db)
    }

    /// Applies pending migrations. [`Database::new`] calls this unless the
    /// config turns it off.
    pub async fn run_migrations(&self) -> DbResult<()> {
        migrations::run_migrations(&self.pool).await
    }

    /// The connection pool, for queries no repository covers.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Raw key/value rows.
    pub fn storage(&self) -> StorageRepository {
        StorageRepository::new(self.pool.clone())
    }

    /// Saved quotes.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let history = db.history().list().await?;
    /// ```
    pub fn history(&self) -> HistoryRepository {
        HistoryRepository::new(self.storage())
    }

    /// The saved draft.
    pub fn drafts(&self) -> DraftRepository {
        DraftRepository::new(self.storage())
    }

    /// Material favorites.
    pub fn favorites(&self) -> FavoriteRepository {
        FavoriteRepository::new(self.storage())
    }

    /// Closes the pool. Repository calls fail afterwards.
    pub async fn close(&self) {
        debug!("Closing quote database");
        self.pool.close().await;
    }

    /// True if the database answers a trivial query.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_database_is_migrated() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        assert!(db.health_check().await);
        let (total, applied) = migrations::migration_status(db.pool()).await.unwrap();
        assert_eq!(total, applied);
        assert!(total >= 1);
    }

    #[tokio::test]
    async fn test_config_setters() {
        let config = DbConfig::new("/tmp/quickquote-test.db")
            .max_connections(4)
            .min_connections(2)
            .run_migrations(false);

        assert_eq!(config.max_connections, 4);
        assert_eq!(config.min_connections, 2);
        assert!(!config.migrate);
        assert!(!config.is_in_memory());
        assert!(DbConfig::in_memory().is_in_memory());
    }

    #[tokio::test]
    async fn test_closed_database_is_unhealthy() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.close().await;
        assert!(!db.health_check().await);
    }
}
