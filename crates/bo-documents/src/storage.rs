//! Storage abstraction
//!
//! Provides a unified interface for document storage backends. Keys are
//! relative paths; backends must reject traversal attempts.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use sha2::{Digest, Sha256};
use thiserror::Error;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("document not found: {0}")]
    NotFound(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid key: {0}")]
    InvalidKey(String),
    #[error("storage backend error: {0}")]
    Backend(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Metadata for a stored document
#[derive(Debug, Clone)]
pub struct StoredDocument {
    /// The key the document was stored under
    pub key: String,
    /// Size in bytes
    pub size: u64,
    /// SHA256 digest of the content
    pub digest: String,
    /// Content type guessed from the key's extension
    pub content_type: String,
}

/// Document storage trait — unified interface for storage backends
#[async_trait]
pub trait DocumentStorage: Send + Sync {
    /// Store data under a key, overwriting any existing document.
    async fn put(&self, key: &str, data: Bytes) -> StorageResult<StoredDocument>;

    /// Retrieve data by key.
    async fn get(&self, key: &str) -> StorageResult<Bytes>;

    /// Delete data by key. Deleting a missing key is a `NotFound` error so
    /// callers can tell "removed" from "was never there".
    async fn delete(&self, key: &str) -> StorageResult<()>;

    /// Check whether a key exists.
    async fn exists(&self, key: &str) -> StorageResult<bool>;

    /// Public URL for direct access.
    fn public_url(&self, key: &str) -> String;

    /// Backend name for logging.
    fn name(&self) -> &str;
}

/// Collision-resistant disk name for an uploaded file: millisecond timestamp
/// prefix plus the sanitized original name.
pub fn generate_disk_filename(original: &str) -> String {
    let sanitized: String = original
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{}_{}", Utc::now().timestamp_millis(), sanitized)
}

fn digest_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

fn content_type_for(key: &str) -> String {
    mime_guess::from_path(key)
        .first_or_octet_stream()
        .to_string()
}

/// Local filesystem storage
pub struct LocalStorage {
    /// Root directory for storage
    root: PathBuf,
    /// Base URL for generating public links
    base_url: String,
}

impl LocalStorage {
    pub fn new(root: impl AsRef<Path>, base_url: impl Into<String>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            base_url: base_url.into(),
        }
    }

    /// Storage rooted in a temp directory, for tests and scratch use.
    pub fn temp() -> std::io::Result<Self> {
        let dir = std::env::temp_dir().join("backoffice-documents");
        std::fs::create_dir_all(&dir)?;
        Ok(Self::new(dir, "/documents"))
    }

    /// Resolve a key to a full path, rejecting directory traversal.
    fn resolve(&self, key: &str) -> StorageResult<PathBuf> {
        if key.is_empty() || key.contains("..") || key.starts_with('/') || key.starts_with('\\') {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(key))
    }
}

#[async_trait]
impl DocumentStorage for LocalStorage {
    #[instrument(skip(self, data), fields(backend = self.name()))]
    async fn put(&self, key: &str, data: Bytes) -> StorageResult<StoredDocument> {
        let path = self.resolve(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let mut file = fs::File::create(&path).await?;
        file.write_all(&data).await?;
        file.flush().await?;

        debug!(key, size = data.len(), "stored document");
        Ok(StoredDocument {
            key: key.to_string(),
            size: data.len() as u64,
            digest: digest_hex(&data),
            content_type: content_type_for(key),
        })
    }

    async fn get(&self, key: &str) -> StorageResult<Bytes> {
        let path = self.resolve(key)?;
        match fs::read(&path).await {
            Ok(data) => Ok(Bytes::from(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(key.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self), fields(backend = self.name()))]
    async fn delete(&self, key: &str) -> StorageResult<()> {
        let path = self.resolve(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!(key, "deleted document");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(key.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        let path = self.resolve(key)?;
        Ok(fs::try_exists(&path).await?)
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), key)
    }

    fn name(&self) -> &str {
        "local"
    }
}

/// In-memory storage for tests
#[derive(Default)]
pub struct MemoryStorage {
    documents: RwLock<HashMap<String, Bytes>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStorage for MemoryStorage {
    async fn put(&self, key: &str, data: Bytes) -> StorageResult<StoredDocument> {
        let document = StoredDocument {
            key: key.to_string(),
            size: data.len() as u64,
            digest: digest_hex(&data),
            content_type: content_type_for(key),
        };
        self.documents
            .write()
            .await
            .insert(key.to_string(), data);
        Ok(document)
    }

    async fn get(&self, key: &str) -> StorageResult<Bytes> {
        self.documents
            .read()
            .await
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        self.documents
            .write()
            .await
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        Ok(self.documents.read().await.contains_key(key))
    }

    fn public_url(&self, key: &str) -> String {
        format!("/documents/{key}")
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disk_filename_sanitizes() {
        let name = generate_disk_filename("order 12 (final).pdf");
        assert!(name.ends_with("order_12__final_.pdf"));
        assert!(!name.contains(' '));
    }

    #[tokio::test]
    async fn test_memory_roundtrip() {
        let storage = MemoryStorage::new();
        let stored = storage
            .put("cases/hearing.pdf", Bytes::from_static(b"%PDF-1.4"))
            .await
            .unwrap();
        assert_eq!(stored.size, 8);
        assert_eq!(stored.content_type, "application/pdf");

        let data = storage.get("cases/hearing.pdf").await.unwrap();
        assert_eq!(&data[..], b"%PDF-1.4");

        storage.delete("cases/hearing.pdf").await.unwrap();
        assert!(matches!(
            storage.delete("cases/hearing.pdf").await,
            Err(StorageError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_local_storage_rejects_traversal() {
        let storage = LocalStorage::new("/tmp/does-not-matter", "/documents");
        assert!(matches!(
            storage.put("../etc/passwd", Bytes::new()).await,
            Err(StorageError::InvalidKey(_))
        ));
    }

    #[tokio::test]
    async fn test_local_storage_roundtrip() {
        let storage = LocalStorage::temp().unwrap();
        let key = format!("{}/note.txt", uuid_like());
        storage
            .put(&key, Bytes::from_static(b"hello"))
            .await
            .unwrap();
        assert!(storage.exists(&key).await.unwrap());
        storage.delete(&key).await.unwrap();
        assert!(!storage.exists(&key).await.unwrap());
    }

    // unique-enough directory name without pulling uuid into this crate
    fn uuid_like() -> String {
        format!("test-{}", chrono::Utc::now().timestamp_nanos_opt().unwrap())
    }
}
