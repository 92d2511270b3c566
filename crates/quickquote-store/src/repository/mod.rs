//! # Repository Module
//!
//! Typed access to the values QuickQuote keeps between runs.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CLI command                                                            │
//! │       │                                                                 │
//! │       │  db.history().record(record)                                    │
//! │       ▼                                                                 │
//! │  HistoryRepository / DraftRepository / FavoriteRepository               │
//! │       │  JSON documents (same shapes as the web app's local storage)    │
//! │       ▼                                                                 │
//! │  StorageRepository                                                      │
//! │       │  app_storage(key, value, updated_at)                            │
//! │       ▼                                                                 │
//! │  SQLite                                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`StorageRepository`](storage::StorageRepository) - Raw key/value rows
//! - [`HistoryRepository`](history::HistoryRepository) - Saved quotes (newest 5)
//! - [`DraftRepository`](draft::DraftRepository) - The saved quote form
//! - [`FavoriteRepository`](favorites::FavoriteRepository) - Material catalogue

pub mod draft;
pub mod favorites;
pub mod history;
pub mod storage;
