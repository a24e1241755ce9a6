use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use log::{debug, warn};

use crate::error::{Error, Result};

pub const TOKEN_KEY: &str = "applytrack_token";
pub const USER_KEY: &str = "applytrack_user";
pub const API_URL_KEY: &str = "applytrack_api_url";

/// Default location of the store file in the user's config directory.
pub fn default_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("com", "applytrack", "ApplyTrack")?;
    Some(proj.config_dir().join("store.toml"))
}

fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Flat string key-value store persisted as TOML. Every mutation is written through.
#[derive(Debug, Clone)]
pub struct LocalStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl LocalStore {
    /// Opens the store at `path`. A missing or unreadable file yields an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(text) => toml::from_str::<BTreeMap<String, String>>(&text).unwrap_or_else(|e| {
                warn!("ignoring malformed store {}: {e}", path.display());
                BTreeMap::new()
            }),
            Err(_) => BTreeMap::new(),
        };
        debug!("opened store {} ({} keys)", path.display(), entries.len());
        Self { path, entries }
    }

    pub fn open_default() -> Result<Self> {
        let path = default_path().ok_or_else(|| Error::Storage("no config dir".into()))?;
        Ok(Self::open(path))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) -> Result<()> {
        self.entries.insert(key.to_string(), value.into());
        self.save()
    }

    pub fn remove(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_some() {
            self.save()?;
        }
        Ok(())
    }

    fn save(&self) -> Result<()> {
        ensure_dir(&self.path).map_err(Error::storage)?;
        let text = toml::to_string_pretty(&self.entries).map_err(Error::storage)?;
        fs::write(&self.path, text).map_err(Error::storage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("store.toml");

        let mut store = LocalStore::open(&path);
        store.set(TOKEN_KEY, "abc").unwrap();
        store.set(API_URL_KEY, "http://example.test").unwrap();

        let reopened = LocalStore::open(&path);
        assert_eq!(reopened.get(TOKEN_KEY), Some("abc"));
        assert_eq!(reopened.get(API_URL_KEY), Some("http://example.test"));
    }

    #[test]
    fn remove_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.toml");

        let mut store = LocalStore::open(&path);
        store.set(TOKEN_KEY, "abc").unwrap();
        store.remove(TOKEN_KEY).unwrap();
        assert!(LocalStore::open(&path).get(TOKEN_KEY).is_none());
    }

    #[test]
    fn write_failure_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "file, not a directory").unwrap();

        let mut store = LocalStore::open(blocker.join("store.toml"));
        assert!(matches!(store.set(TOKEN_KEY, "abc"), Err(Error::Storage(_))));
    }

    #[test]
    fn malformed_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.toml");
        fs::write(&path, "not = [valid").unwrap();
        assert!(LocalStore::open(&path).get(TOKEN_KEY).is_none());
    }
}
