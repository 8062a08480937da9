// src/services/session_store.rs
use std::{
    collections::HashMap,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Arc,
};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::WidgetError;

/// Key under which the widget keeps its session identifier.
pub const SESSION_KEY: &str = "session_id";

/// Client-side key-value storage.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, WidgetError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), WidgetError>;
}

/// Keeps every key in one JSON object on disk.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Unreadable JSON is treated as an empty store so the next `set`
    /// replaces it.
    async fn load(&self) -> Result<HashMap<String, String>, WidgetError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(e) => return Err(e.into()),
        };
        if content.trim().is_empty() {
            return Ok(HashMap::new());
        }

        match serde_json::from_str(&content) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "session store is corrupt, starting empty"
                );
                Ok(HashMap::new())
            }
        }
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn get(&self, key: &str) -> Result<Option<String>, WidgetError> {
        Ok(self.load().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), WidgetError> {
        let mut entries = self.load().await?;
        entries.insert(key.to_string(), value.to_string());

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir).await?;
        }
        // Write next to the target and rename over it so readers never see
        // a half-written file.
        let json = serde_json::to_string_pretty(&entries)?;
        let staging = self.staging_path();
        tokio::fs::write(&staging, json).await?;
        tokio::fs::rename(&staging, &self.path).await?;
        Ok(())
    }
}

/// In-memory store. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    inner: Arc<RwLock<HashMap<String, String>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, key: &str) -> Result<Option<String>, WidgetError> {
        Ok(self.inner.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), WidgetError> {
        self.inner
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
