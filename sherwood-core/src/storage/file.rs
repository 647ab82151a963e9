use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use async_trait::async_trait;
use serde_json::{Map, Value};
use sherwood_contracts::storage::{StorageError, StoragePort};
use tokio::sync::Mutex;

/// Store persisted as a single JSON object on disk.
///
/// Each write rewrites the whole document through a temp file and a rename,
/// so a reader never observes a half-written file. Writes from this process
/// are serialized; separate processes sharing the file are last-write-wins.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_document(&self) -> Result<Map<String, Value>, StorageError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Ok(Map::new());
            }
            Err(err) => {
                return Err(StorageError::Unavailable(format!(
                    "failed to read {}: {err}",
                    self.path.display()
                )));
            }
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Map::new());
        }

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(StorageError::Unavailable(format!(
                "{} does not contain a JSON object",
                self.path.display()
            ))),
            Err(err) => Err(StorageError::Unavailable(format!(
                "failed to parse {}: {err}",
                self.path.display()
            ))),
        }
    }

    async fn write_document(
        &self,
        document: &Map<String, Value>,
    ) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec_pretty(document).map_err(|err| {
            StorageError::Unavailable(format!("failed to encode store: {err}"))
        })?;
        write_atomic(&self.path, &bytes).await.map_err(|err| {
            StorageError::Unavailable(format!(
                "failed to write {}: {err}",
                self.path.display()
            ))
        })
    }
}

#[async_trait]
impl StoragePort for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let document = self.read_document().await?;
        Ok(document.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut document = self.read_document().await?;
        document.insert(key.to_string(), value);
        self.write_document(&document).await
    }
}

async fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    tokio::fs::create_dir_all(parent).await?;

    let nanos = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let tmp_path = parent.join(format!(
        ".{}.tmp.{}",
        path.file_name().and_then(|v| v.to_str()).unwrap_or("store"),
        nanos
    ));
    let written = match tokio::fs::write(&tmp_path, bytes).await {
        Ok(()) => tokio::fs::rename(&tmp_path, path).await,
        Err(err) => Err(err),
    };
    if written.is_err() {
        let _ = tokio::fs::remove_file(&tmp_path).await;
    }
    written
}
