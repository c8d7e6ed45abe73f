//! Post storage.

use sqlx::sqlite::SqlitePool;

#[derive(Clone)]
pub struct PostStore {
    pool: SqlitePool,
}

/// A stored post. `author_uuid` is set at creation and never reassigned.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Post {
    pub id: i64,
    pub uuid: String,
    pub author_uuid: String,
    pub title: String,
    pub content: String,
    pub image: Option<String>,
    pub created_at: String,
}

/// A post joined with its author's username, for the home feed.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PostListing {
    pub uuid: String,
    pub title: String,
    pub content: String,
    pub image: Option<String>,
    pub author_uuid: String,
    pub author_username: String,
    pub created_at: String,
}

impl PostStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a post. Returns the post UUID.
    pub async fn create(
        &self,
        author_uuid: &str,
        title: &str,
        content: &str,
        image: Option<&str>,
    ) -> Result<String, sqlx::Error> {
        let uuid = uuid::Uuid::new_v4().to_string();
        sqlx::query(
            "INSERT INTO posts (uuid, author_uuid, title, content, image) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&uuid)
        .bind(author_uuid)
        .bind(title)
        .bind(content)
        .bind(image)
        .execute(&self.pool)
        .await?;
        Ok(uuid)
    }

    /// Get a post by UUID regardless of author. Ownership is the caller's
    /// concern; filtering here would collapse "not found" and "not yours".
    pub async fn get_by_uuid(&self, uuid: &str) -> Result<Option<Post>, sqlx::Error> {
        sqlx::query_as(
            "SELECT id, uuid, author_uuid, title, content, image, created_at
             FROM posts WHERE uuid = ?",
        )
        .bind(uuid)
        .fetch_optional(&self.pool)
        .await
    }

    /// List all posts newest first. The rowid breaks ties between posts
    /// created within the same second.
    pub async fn list_newest_first(&self) -> Result<Vec<PostListing>, sqlx::Error> {
        sqlx::query_as(
            "SELECT p.uuid, p.title, p.content, p.image, p.author_uuid,
                    u.username AS author_username, p.created_at
             FROM posts p
             JOIN users u ON u.uuid = p.author_uuid
             ORDER BY p.created_at DESC, p.id DESC",
        )
        .fetch_all(&self.pool)
        .await
    }

    /// Update title, content, and image. The author column is deliberately
    /// absent from the SET list. Returns true when the post existed.
    pub async fn update(
        &self,
        uuid: &str,
        title: &str,
        content: &str,
        image: Option<&str>,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE posts SET title = ?, content = ?, image = ? WHERE uuid = ?")
                .bind(title)
                .bind(content)
                .bind(image)
                .bind(uuid)
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
