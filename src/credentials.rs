//! Persistent credential storage
//!
//! Tokens live in a small JSON key-value file in the platform data
//! directory. The app only ever reads from it.

use directories::ProjectDirs;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Key under which the bearer token is stored
pub const TOKEN_KEY: &str = "token";

/// Read-only access to stored credentials
#[cfg_attr(test, mockall::automock)]
pub trait CredentialStore: Send + Sync {
    /// The stored bearer token, if any
    fn get_token(&self) -> Option<String>;
}

/// Credential store backed by a JSON object on disk
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store in the platform data directory, falling back to the working
    /// directory when no home directory can be determined
    pub fn from_default_location() -> Self {
        let path = ProjectDirs::from("br", "helplife", "help-life-tui")
            .map(|dirs| dirs.data_dir().join("storage.json"))
            .unwrap_or_else(|| PathBuf::from("storage.json"));
        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn get_item(&self, key: &str) -> Option<String> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
            Err(err) => {
                tracing::warn!("Failed to read credential store {:?}: {err}", self.path);
                return None;
            }
        };
        match serde_json::from_str::<HashMap<String, String>>(&content) {
            Ok(mut items) => items.remove(key),
            Err(err) => {
                tracing::warn!("Ignoring malformed credential store {:?}: {err}", self.path);
                None
            }
        }
    }
}

impl CredentialStore for FileCredentialStore {
    fn get_token(&self) -> Option<String> {
        self.get_item(TOKEN_KEY)
    }
}
