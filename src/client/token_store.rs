//! Persistent bearer-token storage for the terminal client.

use std::fs;
use std::path::PathBuf;

use crate::client::ClientError;

/// Stores the bearer token in a plain file so separate CLI invocations share
/// a session. The path comes from `TASKHIVE_TOKEN_FILE`, falling back to
/// `~/.taskhive/token`.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn from_env() -> Self {
        let path = std::env::var("TASKHIVE_TOKEN_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".taskhive").join("token")
            });
        Self { path }
    }

    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    /// The stored token, if a non-empty one exists.
    pub fn load(&self) -> Option<String> {
        let token = fs::read_to_string(&self.path).ok()?;
        let token = token.trim().to_string();
        if token.is_empty() { None } else { Some(token) }
    }

    pub fn save(&self, token: &str) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, token)?;
        Ok(())
    }

    /// Removes the stored token. Missing files are not an error.
    pub fn clear(&self) -> Result<(), ClientError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::at(dir.path().join("token"));
        assert!(store.load().is_none());

        store.save("my-token").unwrap();
        assert_eq!(store.load().as_deref(), Some("my-token"));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::at(dir.path().join("token"));

        store.clear().unwrap();
        store.save("tok").unwrap();
        store.clear().unwrap();
        assert!(store.load().is_none());
        store.clear().unwrap();
    }

    #[test]
    fn test_whitespace_only_token_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::at(dir.path().join("token"));
        store.save("  \n").unwrap();
        assert!(store.load().is_none());
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::at(dir.path().join("nested").join("deeper").join("token"));
        store.save("tok").unwrap();
        assert_eq!(store.load().as_deref(), Some("tok"));
    }
}
