//! # Expenses Repository
//!
//! Concrete adapter implementations for the expense payment service.
//! This crate provides the SQLite repository implementing the
//! `PaymentRepository` port and a filesystem `AttachmentStore`.

pub mod media;
pub mod sqlite;

mod types;

#[cfg(test)]
mod sqlite_tests;

pub use media::FsAttachmentStore;
pub use sqlite::SqliteRepo;

/// Build and initialize a repository from a database URL.
///
/// This function:
/// 1. Connects to the database (creating the file if missing)
/// 2. Runs migrations to create tables
/// 3. Returns a ready-to-use repository
///
/// # Examples
///
/// ```ignore
/// let repo = build_repo("sqlite://expenses.db?mode=rwc").await?;
/// ```
pub async fn build_repo(database_url: &str) -> anyhow::Result<SqliteRepo> {
    SqliteRepo::new(database_url).await
}
