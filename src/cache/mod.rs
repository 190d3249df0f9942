//! On-disk copies of the configuration document.
//!
//! Two fixed-name files live in the product data directory: the standard
//! cache written after every validated fetch, and a developer-override file
//! that, when present and enabled, takes priority and is trusted as-is.
//! Both hold the raw document bytes; the cache is written only after a
//! successful parse, so a half-validated document never reaches disk.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::schema;

/// File-system home of the cached document.
pub struct CacheStore {
    dir: PathBuf,
}

/// Which file a disk read came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheSource {
    Standard,
    Develop,
}

impl CacheSource {
    pub const fn as_str(self) -> &'static str {
        match self {
            CacheSource::Standard => "cache",
            CacheSource::Develop => "develop",
        }
    }
}

impl CacheStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the standard cache file.
    pub fn config_path(&self) -> PathBuf {
        self.dir.join(schema::CONFIG_DOC_NAME)
    }

    /// Path of the developer-override file.
    pub fn develop_config_path(&self) -> PathBuf {
        self.dir.join(schema::DEVELOP_CONFIG_DOC_NAME)
    }

    /// Read the developer-override file, then the standard cache.
    ///
    /// `allow_develop` gates the override file entirely; without it only the
    /// standard cache is consulted. Returns the raw bytes and which file they
    /// came from, or `None` when neither file is readable.
    pub fn read(&self, allow_develop: bool) -> Option<(Vec<u8>, CacheSource)> {
        if allow_develop {
            if let Some(bytes) = read_file(&self.develop_config_path()) {
                return Some((bytes, CacheSource::Develop));
            }
        }
        read_file(&self.config_path()).map(|bytes| (bytes, CacheSource::Standard))
    }

    /// Persist the raw document body to the standard cache file.
    pub fn write(&self, body: &[u8]) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.config_path(), body)?;
        debug!(path = %self.config_path().display(), bytes = body.len(), "wrote configuration cache");
        Ok(())
    }

    /// Delete the standard cache file; a missing file is not an error.
    pub fn remove(&self) {
        let path = self.config_path();
        match fs::remove_file(&path) {
            Ok(()) => debug!(path = %path.display(), "removed configuration cache"),
            Err(error) if error.kind() == io::ErrorKind::NotFound => {}
            Err(error) => warn!(path = %path.display(), %error, "failed to remove configuration cache"),
        }
    }
}

fn read_file(path: &Path) -> Option<Vec<u8>> {
    match fs::read(path) {
        Ok(bytes) => Some(bytes),
        Err(error) => {
            if error.kind() != io::ErrorKind::NotFound {
                warn!(path = %path.display(), %error, "failed to read configuration cache");
            }
            None
        }
    }
}
