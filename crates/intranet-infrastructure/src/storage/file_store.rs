use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use intranet_core::storage::KeyValueStore;
use intranet_core::{IntranetError, Result};
use tracing::debug;

use super::atomic_json::AtomicJsonFile;

type Document = BTreeMap<String, String>;

/// Origin store persisted as a single JSON object of string values.
///
/// Each call reads or rewrites the whole document on a blocking thread, so
/// separate processes pointed at the same file observe each other's writes.
#[derive(Clone)]
pub struct FileStore {
    file: Arc<AtomicJsonFile<Document>>,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: Arc::new(AtomicJsonFile::new(path)),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.file.path().to_path_buf()
    }

    async fn blocking<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&AtomicJsonFile<Document>) -> Result<R> + Send + 'static,
        R: Send + 'static,
    {
        let file = self.file.clone();
        tokio::task::spawn_blocking(move || f(file.as_ref()))
            .await
            .map_err(|e| IntranetError::internal(format!("Failed to join task: {}", e)))?
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let key = key.to_string();
        self.blocking(move |file| {
            let doc = file
                .load()
                .map_err(|e| IntranetError::data_access(format!("Failed to read store: {}", e)))?;
            Ok(doc.and_then(|mut d| d.remove(&key)))
        })
        .await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        debug!(key, bytes = value.len(), "FileStore set");
        let key = key.to_string();
        let value = value.to_string();
        self.blocking(move |file| {
            file.update(Document::new(), |doc| {
                doc.insert(key, value);
            })
        })
        .await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        debug!(key, "FileStore remove");
        let key = key.to_string();
        self.blocking(move |file| {
            if file.load()?.is_none() {
                return Ok(());
            }
            file.update(Document::new(), |doc| {
                doc.remove(&key);
            })
        })
        .await
    }
}
