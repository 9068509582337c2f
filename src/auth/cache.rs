//! On-disk bearer token cache keyed by client ID

use super::token::TokenRecord;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

/// Failures reading or writing the cache file. Never fatal to a command.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("failed to access token cache {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse token cache {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize token cache: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl CacheError {
    /// The cache file does not exist yet, as on a first run
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CacheError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CacheFile {
    #[serde(default)]
    tokens: HashMap<String, TokenRecord>,
}

/// Mapping from client ID to its last known token, backed by `cache.json`
#[derive(Debug)]
pub struct CredentialCache {
    path: PathBuf,
    tokens: HashMap<String, TokenRecord>,
}

impl CredentialCache {
    /// Create an empty cache bound to `path`. Nothing is read until [`load`](Self::load).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            tokens: HashMap::new(),
        }
    }

    /// Replace the in-memory mapping with the file contents.
    ///
    /// On any failure the mapping is left empty and the error is returned for
    /// the caller to log.
    pub fn load(&mut self) -> Result<(), CacheError> {
        self.tokens.clear();

        let content = fs::read_to_string(&self.path).map_err(|source| CacheError::Io {
            path: self.path.clone(),
            source,
        })?;

        let file: CacheFile =
            serde_json::from_str(&content).map_err(|source| CacheError::Parse {
                path: self.path.clone(),
                source,
            })?;

        debug!(
            "Loaded {} cached token(s) from {:?}",
            file.tokens.len(),
            self.path
        );
        self.tokens = file.tokens;
        Ok(())
    }

    pub fn get(&self, client_id: &str) -> Option<&TokenRecord> {
        self.tokens.get(client_id)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Store `token` for `client_id` and write the whole mapping to disk
    pub fn save(&mut self, client_id: &str, token: TokenRecord) -> Result<(), CacheError> {
        self.tokens.insert(client_id.to_string(), token);

        let file = CacheFile {
            tokens: self.tokens.clone(),
        };
        let content = serde_json::to_string_pretty(&file)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| CacheError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        fs::write(&self.path, content).map_err(|source| CacheError::Io {
            path: self.path.clone(),
            source,
        })?;

        // Owner-only: the file holds bearer tokens
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600)).map_err(
                |source| CacheError::Io {
                    path: self.path.clone(),
                    source,
                },
            )?;
        }

        debug!("Saved token for client {} to {:?}", client_id, self.path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn record(token: &str) -> TokenRecord {
        TokenRecord {
            access_token: token.to_string(),
            token_type: "Bearer".to_string(),
            expiry: Utc::now() + Duration::hours(1),
            refresh_token: None,
        }
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = CredentialCache::new(dir.path().join("cache.json"));

        let err = cache.load().unwrap_err();
        assert!(matches!(err, CacheError::Io { .. }));
        assert!(err.is_not_found());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_load_empty_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.json");
        fs::write(&path, "").unwrap();

        let mut cache = CredentialCache::new(&path);
        assert!(matches!(cache.load(), Err(CacheError::Parse { .. })));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_load_corrupt_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.json");
        fs::write(&path, "{\"tokens\": {\"a\": 42").unwrap();

        let mut cache = CredentialCache::new(&path);
        let err = cache.load().unwrap_err();
        assert!(!err.is_not_found());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_save_preserves_other_clients() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("cache.json");

        let mut first = CredentialCache::new(&path);
        first.save("A", record("a-1")).unwrap();
        first.save("B", record("b-1")).unwrap();

        let mut second = CredentialCache::new(&path);
        second.load().unwrap();
        second.save("A", record("a-2")).unwrap();

        let mut reread = CredentialCache::new(&path);
        reread.load().unwrap();
        assert_eq!(reread.len(), 2);
        assert_eq!(reread.get("A").unwrap().access_token, "a-2");
        assert_eq!(reread.get("B").unwrap().access_token, "b-1");
    }

    #[test]
    fn test_file_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.json");

        let mut cache = CredentialCache::new(&path);
        cache.save("client", record("secret-token")).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(
            raw["tokens"]["client"]["access_token"],
            serde_json::json!("secret-token")
        );
        assert!(raw["tokens"]["client"]["expiry"].is_string());
    }

    #[cfg(unix)]
    #[test]
    fn test_saved_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.json");
        CredentialCache::new(&path).save("A", record("t")).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
