//! Object-store boundary. The pipeline only ever talks to the narrow
//! `ObjectStore` trait; the bundled `LocalStore` maps keys onto a local
//! directory tree and serves development and testing. Production deployments
//! plug a remote store in behind the same trait.
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("object not found: {0}")]
    NotFound(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Blocking object fetch/put against a keyed store.
pub trait ObjectStore {
    /// Download the object at `key` to `dest`. Implementations must not
    /// leave a partial file at `dest` on failure.
    fn fetch(&self, key: &str, dest: &Path) -> Result<(), StoreError>;

    /// Upload the file at `src` under `key`. Idempotent: repeating a put of
    /// identical bytes under the same key is safe.
    fn put(&self, src: &Path, key: &str) -> Result<(), StoreError>;
}

/// Filesystem-backed store rooted at a directory; keys become relative paths.
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn object_path(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

impl ObjectStore for LocalStore {
    fn fetch(&self, key: &str, dest: &Path) -> Result<(), StoreError> {
        let src = self.object_path(key);
        if !src.is_file() {
            return Err(StoreError::NotFound(key.to_string()));
        }
        if let Err(e) = fs::copy(&src, dest) {
            // Remove whatever partial copy made it to disk.
            let _ = fs::remove_file(dest);
            return Err(StoreError::Io(e));
        }
        info!("fetched {} -> {:?}", key, dest);
        Ok(())
    }

    fn put(&self, src: &Path, key: &str) -> Result<(), StoreError> {
        let dest = self.object_path(key);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(src, &dest)?;
        info!("put {:?} -> {}", src, key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_then_fetch_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path().join("store"));
        let src = dir.path().join("a.bin");
        fs::write(&src, b"granule bytes").unwrap();

        store.put(&src, "prefix/a.bin").unwrap();
        // idempotent
        store.put(&src, "prefix/a.bin").unwrap();

        let dest = dir.path().join("fetched.bin");
        store.fetch("prefix/a.bin", &dest).unwrap();
        assert_eq!(fs::read(&dest).unwrap(), b"granule bytes");
    }

    #[test]
    fn fetch_of_missing_key_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());
        let dest = dir.path().join("out.bin");
        assert!(matches!(
            store.fetch("nope/missing.h5", &dest),
            Err(StoreError::NotFound(_))
        ));
        assert!(!dest.exists());
    }
}
