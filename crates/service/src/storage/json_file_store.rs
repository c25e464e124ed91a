use std::path::PathBuf;
use tokio::{fs, sync::RwLock};

use crate::errors::ServiceError;

/// Generic JSON file-backed list store.
///
/// Keeps a `Vec<T>` in memory and rewrites the whole file after each
/// mutation. A mutation that fails, or whose write fails, leaves both the
/// memory copy and the file as they were.
pub struct JsonFileStore<T> {
    inner: RwLock<Vec<T>>,
    file_path: PathBuf,
}

impl<T> JsonFileStore<T>
where
    T: serde::Serialize + serde::de::DeserializeOwned + Clone + Send + Sync,
{
    /// Open the store at `path`. Creates the file with an empty list if missing.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Self, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await.map_err(ServiceError::storage)?;
            }
        }

        let items: Vec<T> = match fs::read(&file_path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Vec::new(),
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| ServiceError::Storage(format!("corrupt data file {}: {e}", file_path.display())))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let empty: Vec<T> = Vec::new();
                write_file(&file_path, &empty).await?;
                empty
            }
            Err(e) => return Err(ServiceError::storage(e)),
        };

        Ok(Self { inner: RwLock::new(items), file_path })
    }

    pub fn path(&self) -> &std::path::Path {
        &self.file_path
    }

    /// Run a read-only closure over the current items.
    pub async fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&[T]) -> R,
    {
        let items = self.inner.read().await;
        f(&items)
    }

    /// Apply a mutation to a working copy, persist it, then publish it.
    pub async fn update<F, R>(&self, f: F) -> Result<R, ServiceError>
    where
        F: FnOnce(&mut Vec<T>) -> Result<R, ServiceError>,
    {
        let mut items = self.inner.write().await;
        let mut working = items.clone();
        let out = f(&mut working)?;
        write_file(&self.file_path, &working).await?;
        *items = working;
        Ok(out)
    }
}

async fn write_file<T: serde::Serialize>(path: &std::path::Path, items: &[T]) -> Result<(), ServiceError> {
    let data = serde_json::to_vec_pretty(items).map_err(ServiceError::storage)?;
    // write beside the target then rename, so readers never see a torn file
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, data).await.map_err(ServiceError::storage)?;
    fs::rename(&tmp, path).await.map_err(ServiceError::storage)?;
    Ok(())
}
