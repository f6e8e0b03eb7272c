use crate::error::{LensError, Result};
use chrono::Utc;
use serde::Serialize;
use serde_json::json;
use std::path::{Path, PathBuf};

/// Directory-backed document store. Each collection is a subdirectory and
/// each write lands one document shaped `{ <repo_name>: [ <record>, ... ] }`.
/// Persistence is strictly secondary: callers probe with `ping` first and
/// treat any failure as a warning, never as a failed render.
pub struct DocStore {
    root: PathBuf,
}

impl DocStore {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Advisory connectivity probe. Confirms the store root exists and is
    /// writable by touching it.
    pub fn ping(&self) -> Result<()> {
        std::fs::create_dir_all(&self.root)
            .map_err(|e| LensError::Store(format!("store root {:?} unavailable: {e}", self.root)))?;
        let probe = self.root.join(".ping");
        std::fs::write(&probe, b"ok")
            .and_then(|_| std::fs::remove_file(&probe))
            .map_err(|e| LensError::Store(format!("store root {:?} not writable: {e}", self.root)))
    }

    /// Writes one document into the named collection and returns its path.
    pub fn insert_document<T: Serialize>(
        &self,
        collection: &str,
        repo_name: &str,
        records: &[T],
    ) -> Result<PathBuf> {
        let dir = self.root.join(collection);
        std::fs::create_dir_all(&dir)
            .map_err(|e| LensError::Store(format!("collection {collection:?} unavailable: {e}")))?;

        let document = json!({ repo_name: records });
        let file_name = format!(
            "{}-{}.json",
            repo_name.replace(['/', '\\'], "-"),
            Utc::now().format("%Y%m%dT%H%M%S%3f")
        );
        let path = dir.join(file_name);
        std::fs::write(&path, serde_json::to_string_pretty(&document)?)
            .map_err(|e| LensError::Store(format!("failed to write {path:?}: {e}")))?;
        Ok(path)
    }
}
