// SPDX-FileCopyrightText: 2025 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Access/refresh token persistence.
//!
//! Tokens live under two fixed keys and are treated as opaque strings.
//! Storage failures are logged and read back as "no token", which later
//! resolves to an anonymous session.

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use pickledb::{PickleDb, PickleDbDumpPolicy, SerializationMethod};
use tracing::warn;

use crate::model::TokenPair;

pub const ACCESS_TOKEN_KEY: &str = "helpdesk_access_token";
pub const REFRESH_TOKEN_KEY: &str = "helpdesk_refresh_token";

/// Get/set/clear storage for the current token pair.
pub trait TokenStore: Send + Sync {
    fn access(&self) -> Option<String>;

    fn refresh(&self) -> Option<String>;

    /// Replace both tokens at once.
    fn set_pair(&self, access: &str, refresh: &str);

    /// Remove both tokens.
    fn clear(&self);

    fn pair(&self) -> Option<TokenPair> {
        Some(TokenPair::new(self.access()?, self.refresh()?))
    }
}

/// Process-local token store.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    inner: RwLock<Slots>,
}

#[derive(Debug, Default)]
struct Slots {
    access: Option<String>,
    refresh: Option<String>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pair(access: &str, refresh: &str) -> Self {
        let store = Self::new();
        store.set_pair(access, refresh);
        store
    }
}

impl TokenStore for MemoryTokenStore {
    fn access(&self) -> Option<String> {
        let slots = self.inner.read().unwrap_or_else(|e| e.into_inner());
        slots.access.clone()
    }

    fn refresh(&self) -> Option<String> {
        let slots = self.inner.read().unwrap_or_else(|e| e.into_inner());
        slots.refresh.clone()
    }

    fn set_pair(&self, access: &str, refresh: &str) {
        let mut slots = self.inner.write().unwrap_or_else(|e| e.into_inner());
        slots.access = Some(access.to_string());
        slots.refresh = Some(refresh.to_string());
    }

    fn clear(&self) {
        let mut slots = self.inner.write().unwrap_or_else(|e| e.into_inner());
        *slots = Slots::default();
    }
}

/// Token store persisted to a JSON key-value file.
pub struct FileTokenStore {
    db: RwLock<PickleDb>,
    path: PathBuf,
}

impl FileTokenStore {
    /// Open (or create) the token file at `path`.
    ///
    /// An unreadable file is replaced by an empty store.
    pub fn open(path: &Path) -> Self {
        if let Some(parent) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                warn!("Token store directory {:?} unavailable: {}", parent, e);
            }
        }
        let db = if path.exists() {
            PickleDb::load(
                path,
                PickleDbDumpPolicy::DumpUponRequest,
                SerializationMethod::Json,
            )
            .unwrap_or_else(|e| {
                warn!("Token store {:?} unreadable, starting empty: {}", path, e);
                PickleDb::new(
                    path,
                    PickleDbDumpPolicy::DumpUponRequest,
                    SerializationMethod::Json,
                )
            })
        } else {
            PickleDb::new(
                path,
                PickleDbDumpPolicy::DumpUponRequest,
                SerializationMethod::Json,
            )
        };
        Self {
            db: RwLock::new(db),
            path: path.to_path_buf(),
        }
    }

    /// Returns the platform default path: `~/.config/helpdesk-rs/session.db`.
    /// Falls back to `./session.db` when the config dir is unavailable.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .map(|p| p.join("helpdesk-rs").join("session.db"))
            .unwrap_or_else(|| PathBuf::from("session.db"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_key(&self, key: &str) -> Option<String> {
        let db = self.db.read().unwrap_or_else(|e| e.into_inner());
        db.get::<String>(key)
    }

    fn persist(&self, db: &mut PickleDb) {
        if let Err(e) = db.dump() {
            warn!("Failed to write token store {:?}: {}", self.path, e);
        }
    }
}

impl TokenStore for FileTokenStore {
    fn access(&self) -> Option<String> {
        self.read_key(ACCESS_TOKEN_KEY)
    }

    fn refresh(&self) -> Option<String> {
        self.read_key(REFRESH_TOKEN_KEY)
    }

    fn set_pair(&self, access: &str, refresh: &str) {
        let mut db = self.db.write().unwrap_or_else(|e| e.into_inner());
        let access = access.to_string();
        let refresh = refresh.to_string();
        if let Err(e) = db.set(ACCESS_TOKEN_KEY, &access) {
            warn!("Failed to store access token: {}", e);
        }
        if let Err(e) = db.set(REFRESH_TOKEN_KEY, &refresh) {
            warn!("Failed to store refresh token: {}", e);
        }
        self.persist(&mut db);
    }

    fn clear(&self) {
        let mut db = self.db.write().unwrap_or_else(|e| e.into_inner());
        for key in [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY] {
            if let Err(e) = db.rem(key) {
                warn!("Failed to remove {}: {}", key, e);
            }
        }
        self.persist(&mut db);
    }
}
