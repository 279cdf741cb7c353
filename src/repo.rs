//! Bookmark repository
//!
//! Every operation is exactly one SQL statement:
//! - list: full scan, newest first
//! - create: INSERT ... RETURNING (id and created_at come back in the same round-trip)
//! - delete: unconditional DELETE by id, zero affected rows is success

use sqlx::SqlitePool;

use crate::models::{Bookmark, NewBookmark, ValidationError};

#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] sqlx::Error),
}

pub struct BookmarkRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> BookmarkRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// All bookmarks, newest first. Ties on `created_at` fall back to the
    /// higher id first.
    pub async fn list(&self) -> Result<Vec<Bookmark>, RepoError> {
        let bookmarks = sqlx::query_as(
            r#"
            SELECT id, title, url, description, tags, created_at
            FROM bookmarks
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(bookmarks)
    }

    /// Validates the raw fields, then inserts. Nothing reaches storage when
    /// `title` or `url` is empty.
    pub async fn create(
        &self,
        title: &str,
        url: &str,
        description: &str,
        tags: &str,
    ) -> Result<Bookmark, RepoError> {
        let new = NewBookmark::new(title, url, description, tags)?;
        self.insert(&new).await
    }

    pub async fn insert(&self, new: &NewBookmark) -> Result<Bookmark, RepoError> {
        let bookmark = sqlx::query_as(
            r#"
            INSERT INTO bookmarks (title, url, description, tags)
            VALUES (?, ?, ?, ?)
            RETURNING id, title, url, description, tags, created_at
            "#,
        )
        .bind(new.title())
        .bind(new.url())
        .bind(new.description())
        .bind(new.tags())
        .fetch_one(self.pool)
        .await?;

        Ok(bookmark)
    }

    pub async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM bookmarks WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            tracing::debug!(id, "delete matched no bookmark");
        }

        Ok(())
    }
}
