use std::{
    ffi::OsString,
    fs::{self, File, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use fs2::FileExt;

use nametag_model::{Entity, EntityId, TagFilter};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, trace};

use super::{Registry, RegistryError, RegistryResult};

/// On-disk layout of a [`JsonFileRegistry`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryDocument {
    #[serde(default)]
    pub entities: Vec<Entity>,
}

/// Registry stored as a single JSON document.
///
/// The document is re-read on every call, so writes from other processes are
/// picked up by the next query. Each write replaces the whole file through a
/// temporary file in the same directory followed by a rename.
///
/// Writers serialize on an exclusive advisory lock of `<path>.lock`, held
/// across the read-modify-write, so a write never replaces the document from
/// a stale copy. Readers take no lock; the rename keeps every read whole.
#[derive(Debug, Clone)]
pub struct JsonFileRegistry {
    path: PathBuf,
}

impl JsonFileRegistry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sidecar file used for the writer lock.
    pub fn lock_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("registry"));
        name.push(".lock");
        self.path.with_file_name(name)
    }

    /// Block until this handle owns the writer lock.
    ///
    /// The lock is released when the returned file is dropped.
    fn lock_writers(&self) -> RegistryResult<File> {
        let lock_path = self.lock_path();
        let lock = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| RegistryError::Io(format!("open {}: {e}", lock_path.display())))?;
        lock.lock_exclusive()
            .map_err(|e| RegistryError::Io(format!("lock {}: {e}", lock_path.display())))?;
        Ok(lock)
    }

    /// Read and parse the current document.
    pub fn load(&self) -> RegistryResult<RegistryDocument> {
        let bytes = fs::read(&self.path)
            .map_err(|e| RegistryError::Io(format!("read {}: {e}", self.path.display())))?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Atomically replace the document.
    pub fn store(&self, doc: &RegistryDocument) -> RegistryResult<()> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let json = serde_json::to_vec_pretty(doc)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(&json)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path)
            .map_err(|e| RegistryError::Io(format!("persist {}: {}", self.path.display(), e.error)))?;

        trace!(path = %self.path.display(), entities = doc.entities.len(), "registry document stored");
        Ok(())
    }
}

impl Registry for JsonFileRegistry {
    fn name(&self) -> &'static str {
        "json-file"
    }

    fn find_entities(&self, filter: &TagFilter) -> RegistryResult<Vec<Entity>> {
        let doc = self.load()?;
        Ok(doc.entities.into_iter().filter(|e| filter.matches(e)).collect())
    }

    fn write_tag(&self, entity: &EntityId, key: &str, value: &str) -> RegistryResult<()> {
        let _lock = self.lock_writers()?;
        let mut doc = self.load()?;
        let target = doc
            .entities
            .iter_mut()
            .find(|e| &e.id == entity)
            .ok_or_else(|| RegistryError::UnknownEntity(entity.clone()))?;
        target.set_tag(key, value);

        self.store(&doc)?;
        debug!(%entity, key, value, path = %self.path.display(), "tag written");
        Ok(())
    }
}
