use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::{KeyValueStore, StorageError};

/// File-backed storage: one `<key>.json` file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the value files
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No stored value at {}", path.display());
                return Ok(None);
            }
            Err(e) => return Err(StorageError::Io(e)),
        };

        // Undecodable bytes count as no value; the next write replaces them
        match String::from_utf8(bytes) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) => {
                warn!("Stored value at {} is not valid UTF-8 ({}), ignoring it", path.display(), e);
                Ok(None)
            }
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if !self.dir.exists() {
            debug!("Creating storage directory: {}", self.dir.display());
            fs::create_dir_all(&self.dir)?;
        }

        // Write to a sibling file first so a crash never leaves a half-written value
        let path = self.path_for(key);
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, value)?;
        fs::rename(&tmp_path, &path)?;

        debug!("Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }
}
