//! Stored client-token records.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::sync::Arc;

/// A stored API token, keyed by the token's `jti` claim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenRecord {
    /// Revoked tokens stay in the store so revocation is observable.
    pub revoked: bool,
    /// Expiry timestamp; tokens at or past this instant are rejected.
    pub expires_at: DateTime<Utc>,
}

impl TokenRecord {
    /// Check whether the token is past its expiry.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }
}

/// A thread-safe store of token records, shared across requests.
#[derive(Clone, Default)]
pub struct TokenStore {
    inner: Arc<DashMap<String, TokenRecord>>,
}

impl TokenStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load records from a JSON file, if it exists.
    pub fn load_from_file(path: &str) -> std::io::Result<Self> {
        let store = Self::new();
        if Path::new(path).exists() {
            let file = File::open(path)?;
            let reader = BufReader::new(file);
            let map: HashMap<String, TokenRecord> = serde_json::from_reader(reader)?;
            for (jti, record) in map {
                store.inner.insert(jti, record);
            }
            tracing::info!(count = store.inner.len(), path = %path, "Loaded client tokens");
        } else {
            tracing::warn!(path = %path, "Token file not found, starting with empty store");
        }
        Ok(store)
    }

    /// Save records to a JSON file.
    pub fn save_to_file(&self, path: &str) -> std::io::Result<()> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        let map: HashMap<_, _> = self
            .inner
            .iter()
            .map(|r| (r.key().clone(), r.value().clone()))
            .collect();
        serde_json::to_writer(writer, &map)?;
        Ok(())
    }

    /// Insert or replace a record.
    pub fn insert(&self, jti: impl Into<String>, record: TokenRecord) {
        self.inner.insert(jti.into(), record);
    }

    /// Look up a record by jti.
    pub fn get(&self, jti: &str) -> Option<TokenRecord> {
        self.inner.get(jti).map(|r| r.value().clone())
    }

    /// Mark a stored token revoked. Returns false when unknown.
    pub fn revoke(&self, jti: &str) -> bool {
        match self.inner.get_mut(jti) {
            Some(mut r) => {
                r.revoked = true;
                true
            }
            None => false,
        }
    }

    /// Number of stored records.
    pub fn count(&self) -> usize {
        self.inner.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn live_record() -> TokenRecord {
        TokenRecord {
            revoked: false,
            expires_at: Utc::now() + Duration::hours(1),
        }
    }

    #[test]
    fn store_lookup_and_revocation() {
        let store = TokenStore::new();
        assert!(store.get("abc").is_none());

        store.insert("abc", live_record());
        assert!(!store.get("abc").unwrap().revoked);

        assert!(store.revoke("abc"));
        assert!(store.get("abc").unwrap().revoked);
        assert!(!store.revoke("missing"));
    }

    #[test]
    fn expiry_check() {
        let now = Utc::now();
        let expired = TokenRecord {
            revoked: false,
            expires_at: now - Duration::seconds(1),
        };
        assert!(expired.is_expired(now));

        let live = TokenRecord {
            revoked: false,
            expires_at: now + Duration::seconds(1),
        };
        assert!(!live.is_expired(now));
    }

    #[test]
    fn persistence_round_trip() {
        let path = "test_tokens_persistence.json";

        let store = TokenStore::new();
        store.insert("token-1", live_record());
        store.save_to_file(path).unwrap();

        let loaded = TokenStore::load_from_file(path).unwrap();
        assert_eq!(loaded.count(), 1);
        assert!(loaded.get("token-1").is_some());

        std::fs::remove_file(path).unwrap_or_default();
    }

    #[test]
    fn missing_file_yields_empty_store() {
        let loaded = TokenStore::load_from_file("definitely_not_here.json").unwrap();
        assert_eq!(loaded.count(), 0);
    }
}
