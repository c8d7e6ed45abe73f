//! Upload storage for post and profile images.
//!
//! Files land in a flat directory and are referenced by the string
//! `/uploads/{filename}`, which is what gets persisted on users and posts.
//! The rest of the system treats these references as opaque.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Clone)]
pub struct BlobStore {
    dir: PathBuf,
}

impl BlobStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store uploaded bytes and return the reference string.
    /// Stored names are `{unix-millis}-{sanitized original name}` so repeated
    /// uploads of the same file never collide.
    pub async fn save(&self, original_name: &str, bytes: &[u8]) -> std::io::Result<String> {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        let name = format!("{}-{}", millis, sanitize_filename(original_name));

        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(self.dir.join(&name), bytes).await?;

        Ok(format!("/uploads/{}", name))
    }

    /// Read a stored file by name. Returns None when the file is absent or
    /// the name tries to escape the uploads directory.
    pub async fn read(&self, name: &str) -> Option<Vec<u8>> {
        if name.contains("..") || name.contains('/') || name.contains('\\') {
            return None;
        }
        tokio::fs::read(self.dir.join(name)).await.ok()
    }
}

/// Strip any path components and replace characters that are unsafe in a
/// filename. Extensions survive so content types can be derived later.
fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    base.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect()
}
