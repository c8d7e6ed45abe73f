//! User storage.

use sqlx::sqlite::SqlitePool;

#[derive(Clone)]
pub struct UserStore {
    pool: SqlitePool,
}

/// A stored user. `password_hash` is always a bcrypt digest; plaintext
/// passwords are hashed before they reach this layer.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub uuid: String,
    pub full_name: String,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub profile_image: Option<String>,
    pub created_at: String,
}

/// Fields required to create a user.
#[derive(Debug, Clone, Copy)]
pub struct NewUser<'a> {
    pub full_name: &'a str,
    pub email: &'a str,
    pub username: &'a str,
    pub password_hash: &'a str,
    pub profile_image: Option<&'a str>,
}

const USER_COLUMNS: &str =
    "id, uuid, full_name, email, username, password_hash, profile_image, created_at";

impl UserStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a user. Returns the generated user UUID.
    pub async fn create(&self, user: NewUser<'_>) -> Result<String, sqlx::Error> {
        let uuid = uuid::Uuid::new_v4().to_string();
        sqlx::query(
            "INSERT INTO users (uuid, full_name, email, username, password_hash, profile_image)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&uuid)
        .bind(user.full_name)
        .bind(user.email)
        .bind(user.username)
        .bind(user.password_hash)
        .bind(user.profile_image)
        .execute(&self.pool)
        .await?;
        Ok(uuid)
    }

    /// Get a user by username.
    pub async fn get_by_username(&self, username: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as(&format!(
            "SELECT {} FROM users WHERE username = ?",
            USER_COLUMNS
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
    }

    /// Get a user by UUID.
    pub async fn get_by_uuid(&self, uuid: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as(&format!("SELECT {} FROM users WHERE uuid = ?", USER_COLUMNS))
            .bind(uuid)
            .fetch_optional(&self.pool)
            .await
    }

    /// Update profile fields. The password hash and profile image are left
    /// untouched. Returns true when a row changed.
    pub async fn update_profile(
        &self,
        uuid: &str,
        full_name: &str,
        email: &str,
        username: &str,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE users SET full_name = ?, email = ?, username = ? WHERE uuid = ?")
                .bind(full_name)
                .bind(email)
                .bind(username)
                .bind(uuid)
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Check if a username is free (case-insensitive, per the schema).
    pub async fn is_username_available(&self, username: &str) -> Result<bool, sqlx::Error> {
        let count: (i32,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE username = ?")
            .bind(username)
            .fetch_one(&self.pool)
            .await?;
        Ok(count.0 == 0)
    }
}
