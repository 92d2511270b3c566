//! # quickquote-store: Local Persistence for QuickQuote
//!
//! Keeps saved quotes, the draft form and material favorites in a local
//! SQLite database using sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  quickquote CLI (estimate --save, history, draft, favorites)            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                quickquote-store (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │◄───│ history       │    │  (embedded)  │  │   │
//! │  │   │  SqlitePool   │    │ draft         │    │ 001_initial  │  │   │
//! │  │   │               │    │ favorites     │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file (platform data dir, or QQ_DB_PATH)                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Store error types
//! - [`repository`] - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use quickquote_store::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("quickquote.db")).await?;
//! let favorites = db.favorites().list().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::draft::DraftRepository;
pub use repository::favorites::FavoriteRepository;
pub use repository::history::HistoryRepository;
pub use repository::storage::{StorageRepository, DRAFT_KEY, FAVORITES_KEY, HISTORY_KEY};
