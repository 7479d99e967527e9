//! Persistent session-token store
//!
//! The backend token is opaque and carries no embedded expiry, so the client
//! tracks its own session horizon (24 h by default) and refuses to hand back
//! a token past it. Token and expiry are one JSON record written atomically
//! (temp file + rename), so a crash mid-write can never leave a token
//! without its expiry or vice versa. A record that fails to parse is treated
//! as the partial-write failure state and purged.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Session horizon applied by [`TokenStore::set_token`]
pub const DEFAULT_EXPIRY_HOURS: i64 = 24;

const TOKEN_FILE: &str = "auth_token.json";

/// On-disk record: both fields land together or not at all
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredToken {
    token: String,
    expires_at: DateTime<Utc>,
}

/// File-backed token store rooted at one directory
#[derive(Debug, Clone)]
pub struct TokenStore {
    dir: PathBuf,
}

impl TokenStore {
    /// Open the store in the platform data directory
    /// (`~/.local/share/moneta` on Linux)
    pub fn open_default() -> Result<Self> {
        let dir = dirs::data_dir()
            .ok_or_else(|| Error::Storage("No platform data directory available".to_string()))?
            .join("moneta");
        Self::open(&dir)
    }

    /// Open the store in an explicit directory, creating it if needed
    pub fn open(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    fn token_path(&self) -> PathBuf {
        self.dir.join(TOKEN_FILE)
    }

    /// Persist a token with the default 24 h horizon
    pub fn set_token(&self, token: &str) -> Result<()> {
        self.set_token_with_expiry(token, DEFAULT_EXPIRY_HOURS)
    }

    /// Persist a token with an explicit horizon in hours
    pub fn set_token_with_expiry(&self, token: &str, expiry_hours: i64) -> Result<()> {
        let record = StoredToken {
            token: token.to_string(),
            expires_at: Utc::now() + Duration::hours(expiry_hours),
        };
        self.write_record(&record)?;
        debug!(expiry_hours, "session token stored");
        Ok(())
    }

    /// Write the record atomically: temp file in the same directory, then
    /// rename over the real path
    fn write_record(&self, record: &StoredToken) -> Result<()> {
        let json = serde_json::to_vec_pretty(record)?;
        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(&json)?;
        tmp.persist(self.token_path())
            .map_err(|e| Error::Storage(format!("Failed to persist token file: {}", e)))?;
        Ok(())
    }

    /// The stored token, if one exists and its horizon has not passed
    ///
    /// An expired or unreadable record is purged before returning, so later
    /// calls also see no token.
    pub fn get_token(&self) -> Result<Option<String>> {
        let path = self.token_path();
        let contents = match fs::read(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let record: StoredToken = match serde_json::from_slice(&contents) {
            Ok(record) => record,
            Err(e) => {
                warn!("Purging unreadable token record: {}", e);
                self.remove_token()?;
                return Ok(None);
            }
        };

        if Utc::now() >= record.expires_at {
            debug!("session token expired, purging");
            self.remove_token()?;
            return Ok(None);
        }

        Ok(Some(record.token))
    }

    /// Purge the stored token unconditionally; a missing record is success
    pub fn remove_token(&self) -> Result<()> {
        match fs::remove_file(self.token_path()) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Whether a current (non-expired) token exists. Derived, never stored.
    pub fn is_valid(&self) -> bool {
        matches!(self.get_token(), Ok(Some(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, TokenStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::open(dir.path()).unwrap();
        (dir, store)
    }

    #[test]
    fn test_set_and_get_round_trip() {
        let (_dir, store) = temp_store();
        store.set_token("abc123").unwrap();
        assert_eq!(store.get_token().unwrap(), Some("abc123".to_string()));
        assert!(store.is_valid());
    }

    #[test]
    fn test_default_horizon_is_24_hours() {
        let (_dir, store) = temp_store();
        store.set_token("abc123").unwrap();

        let contents = fs::read(store.token_path()).unwrap();
        let record: StoredToken = serde_json::from_slice(&contents).unwrap();
        let horizon = record.expires_at - Utc::now();
        assert!(horizon > Duration::hours(23));
        assert!(horizon <= Duration::hours(24));
    }

    #[test]
    fn test_overwrite_replaces_previous_token() {
        let (_dir, store) = temp_store();
        store.set_token("first").unwrap();
        store.set_token("second").unwrap();
        assert_eq!(store.get_token().unwrap(), Some("second".to_string()));
    }

    #[test]
    fn test_expired_token_is_purged() {
        let (_dir, store) = temp_store();

        // Simulate time passing beyond the horizon: a record whose expiry
        // is already in the past.
        let record = StoredToken {
            token: "abc".to_string(),
            expires_at: Utc::now() - Duration::hours(1),
        };
        fs::write(store.token_path(), serde_json::to_vec(&record).unwrap()).unwrap();

        assert_eq!(store.get_token().unwrap(), None);
        assert!(!store.token_path().exists());

        // Stays absent on subsequent reads
        assert_eq!(store.get_token().unwrap(), None);
        assert!(!store.is_valid());
    }

    #[test]
    fn test_corrupt_record_is_purged() {
        let (_dir, store) = temp_store();
        fs::write(store.token_path(), b"{\"token\": \"abc\"").unwrap();

        assert_eq!(store.get_token().unwrap(), None);
        assert!(!store.token_path().exists());
    }

    #[test]
    fn test_remove_token_is_idempotent() {
        let (_dir, store) = temp_store();
        store.remove_token().unwrap();

        store.set_token("abc").unwrap();
        store.remove_token().unwrap();
        assert_eq!(store.get_token().unwrap(), None);
        store.remove_token().unwrap();
    }

    #[test]
    fn test_empty_store_reports_invalid() {
        let (_dir, store) = temp_store();
        assert!(!store.is_valid());
        assert_eq!(store.get_token().unwrap(), None);
    }
}
