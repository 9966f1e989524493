use anyhow::{Context, Result};
use log::debug;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// A medium that stores named string blobs.
pub trait Backend {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    /// Removing a key that isn't there is not an error
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// One `<key>.json` file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        FileBackend { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

fn read_if_found(path: &Path) -> Result<Option<String>> {
    match std::fs::read_to_string(&path) {
        Ok(c) => Ok(Some(c)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into())
    }
}

impl Backend for FileBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        read_if_found(&path)
            .with_context(|| format!("Error reading {:?}", path))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("Error ensuring path {:?} exists", self.dir))?;
        let path = self.path_for(key);
        debug!("Writing {} bytes to {:?}", value.len(), path);
        std::fs::write(&path, value)
            .with_context(|| format!("Error writing {:?}", path))
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Error removing {:?}", path)),
        }
    }
}

/// Keeps everything in a map, gone when dropped
#[derive(Debug, Default, Clone)]
pub struct MemoryBackend {
    blobs: HashMap<String, String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Backend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.blobs.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.blobs.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.blobs.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_backend_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path().join("nested"));
        assert_eq!(backend.get("users").unwrap(), None);
    }

    #[test]
    fn file_backend_creates_dir_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("a").join("b");
        let mut backend = FileBackend::new(&root);
        backend.set("auth", "{\"token\":\"t\"}").unwrap();
        assert!(root.join("auth.json").exists());

        let reopened = FileBackend::new(&root);
        assert_eq!(reopened.get("auth").unwrap().as_deref(), Some("{\"token\":\"t\"}"));
    }

    #[test]
    fn remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut backend = FileBackend::new(dir.path());
        backend.set("auth", "x").unwrap();
        backend.remove("auth").unwrap();
        backend.remove("auth").unwrap();
        assert_eq!(backend.get("auth").unwrap(), None);

        let mut memory = MemoryBackend::new();
        memory.remove("auth").unwrap();
        memory.set("auth", "x").unwrap();
        memory.remove("auth").unwrap();
        assert_eq!(memory.get("auth").unwrap(), None);
    }
}
