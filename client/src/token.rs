//! Bearer-token resolution.
//!
//! Tokens live in a key/value credential store written by whatever performs
//! the login. This crate only ever reads from it.

use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Key written on a regular user login
pub const PRIMARY_TOKEN_KEY: &str = "token";

/// Key written on an admin login
pub const SECONDARY_TOKEN_KEY: &str = "adminToken";

/// Read-only key/value store holding persisted credentials
pub trait CredentialStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
}

/// Supplies the bearer token for authenticated requests
pub trait TokenProvider: Send + Sync {
    fn bearer_token(&self) -> Option<String>;
}

/// In-memory credential store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }
}

impl CredentialStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }
}

/// Credential store backed by a flat JSON object on disk.
///
/// The file is re-read on every lookup so a token written by another process
/// after startup is picked up.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CredentialStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "credential file not readable");
                return None;
            }
        };

        let entries: HashMap<String, serde_json::Value> = match serde_json::from_str(&content) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "credential file is not a JSON object");
                return None;
            }
        };

        entries
            .get(key)
            .and_then(|value| value.as_str())
            .map(str::to_string)
    }
}

/// Resolves the token from the primary key, falling back to the secondary
/// key only when the primary is absent or empty.
#[derive(Debug, Clone)]
pub struct StoredTokens<S> {
    store: S,
}

impl<S: CredentialStore> StoredTokens<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: CredentialStore> TokenProvider for StoredTokens<S> {
    fn bearer_token(&self) -> Option<String> {
        [PRIMARY_TOKEN_KEY, SECONDARY_TOKEN_KEY]
            .iter()
            .filter_map(|key| self.store.get(key))
            .find(|token| !token.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_primary_key_wins() {
        let tokens = StoredTokens::new(
            MemoryStore::new()
                .with(PRIMARY_TOKEN_KEY, "user-token")
                .with(SECONDARY_TOKEN_KEY, "admin-token"),
        );
        assert_eq!(tokens.bearer_token().as_deref(), Some("user-token"));
    }

    #[test]
    fn test_falls_back_to_secondary_key() {
        let tokens =
            StoredTokens::new(MemoryStore::new().with(SECONDARY_TOKEN_KEY, "admin-token"));
        assert_eq!(tokens.bearer_token().as_deref(), Some("admin-token"));
    }

    #[test]
    fn test_empty_primary_falls_back() {
        let tokens = StoredTokens::new(
            MemoryStore::new()
                .with(PRIMARY_TOKEN_KEY, "")
                .with(SECONDARY_TOKEN_KEY, "admin-token"),
        );
        assert_eq!(tokens.bearer_token().as_deref(), Some("admin-token"));
    }

    #[test]
    fn test_no_token_when_both_absent() {
        let tokens = StoredTokens::new(MemoryStore::new());
        assert!(tokens.bearer_token().is_none());
    }

    #[test]
    fn test_file_store_reads_json_object() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"adminToken": "from-disk", "user": {{"id": 4}}}}"#).unwrap();

        let store = FileStore::new(file.path());
        assert_eq!(store.get(SECONDARY_TOKEN_KEY).as_deref(), Some("from-disk"));
        assert!(store.get("user").is_none());

        let tokens = StoredTokens::new(store);
        assert_eq!(tokens.bearer_token().as_deref(), Some("from-disk"));
    }

    #[test]
    fn test_file_store_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("absent.json"));
        assert!(store.get(PRIMARY_TOKEN_KEY).is_none());
    }
}
