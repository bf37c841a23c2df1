use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::Mutex;

use crate::error::PortalError;
use crate::models::Session;

/// Well-known storage key under which the single session record is persisted.
/// Kept identical to the front-end's localStorage key so the two stores are
/// interchangeable.
pub const SESSION_KEY: &str = "eduErpUser";

// 1. SessionVault Contract
/// SessionVault
///
/// Defines the abstract contract for the durable session storage layer, the
/// server-side analogue of the browser's localStorage slot. This trait allows
/// us to swap the concrete implementation from the real file-backed vault
/// (FileSessionVault) to the in-memory mock (MemorySessionVault) during
/// testing, without affecting the Session Store.
///
/// Absence of the record means "no session". Malformed content is reported as
/// `StorageRead` and must be treated by callers as absence, never as fatal.
#[async_trait]
pub trait SessionVault: Send + Sync {
    /// Reads the persisted session record, if any.
    async fn load(&self) -> Result<Option<Session>, PortalError>;

    /// Replaces the persisted session record.
    async fn save(&self, session: &Session) -> Result<(), PortalError>;

    /// Removes the persisted session record. Idempotent: clearing an empty
    /// vault succeeds.
    async fn clear(&self) -> Result<(), PortalError>;
}

/// VaultState
///
/// The concrete type used to share the vault across the application state.
pub type VaultState = Arc<dyn SessionVault>;

// 2. The Real Implementation (file-backed)
/// FileSessionVault
///
/// Persists the session as one JSON file named after `SESSION_KEY` inside the
/// configured session directory. One file, zero or one record, matching the
/// single-slot semantics of the source.
#[derive(Clone)]
pub struct FileSessionVault {
    path: PathBuf,
}

impl FileSessionVault {
    /// new
    ///
    /// Builds the vault rooted at the configured session directory. The
    /// directory is created lazily on the first save.
    pub fn new(session_dir: &Path) -> Self {
        Self {
            path: session_dir.join(format!("{SESSION_KEY}.json")),
        }
    }
}

#[async_trait]
impl SessionVault for FileSessionVault {
    async fn load(&self) -> Result<Option<Session>, PortalError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            // A missing file is the normal "never logged in" case.
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(PortalError::StorageRead(e.to_string())),
        };

        match serde_json::from_slice::<Session>(&bytes) {
            Ok(session) => Ok(Some(session)),
            Err(e) => Err(PortalError::StorageRead(e.to_string())),
        }
    }

    async fn save(&self, session: &Session) -> Result<(), PortalError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| PortalError::StorageRead(e.to_string()))?;
        }

        let bytes = serde_json::to_vec_pretty(session)
            .map_err(|e| PortalError::StorageRead(e.to_string()))?;

        tokio::fs::write(&self.path, bytes)
            .await
            .map_err(|e| PortalError::StorageRead(e.to_string()))
    }

    async fn clear(&self) -> Result<(), PortalError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            // Already clear: idempotency is part of the contract.
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PortalError::StorageRead(e.to_string())),
        }
    }
}

// 3. The Mock Implementation (For Unit Tests)
/// MemorySessionVault
///
/// An in-memory vault used for unit and integration testing. It stores the raw
/// serialized payload so tests can also seed deliberately malformed content
/// and exercise the StorageRead path.
#[derive(Default)]
pub struct MemorySessionVault {
    slot: Mutex<Option<String>>,
}

impl MemorySessionVault {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the vault with an already-persisted session, simulating a prior
    /// browser visit.
    pub fn with_session(session: &Session) -> Self {
        let payload = serde_json::to_string(session).expect("seed session serializes");
        Self {
            slot: Mutex::new(Some(payload)),
        }
    }

    /// Seeds the vault with unparseable bytes to drive the malformed-payload
    /// startup path.
    pub fn poisoned() -> Self {
        Self {
            slot: Mutex::new(Some("{not-a-session".to_string())),
        }
    }
}

#[async_trait]
impl SessionVault for MemorySessionVault {
    async fn load(&self) -> Result<Option<Session>, PortalError> {
        let slot = self.slot.lock().expect("vault slot lock poisoned");
        match slot.as_deref() {
            None => Ok(None),
            Some(payload) => serde_json::from_str::<Session>(payload)
                .map(Some)
                .map_err(|e| PortalError::StorageRead(e.to_string())),
        }
    }

    async fn save(&self, session: &Session) -> Result<(), PortalError> {
        let payload = serde_json::to_string(session)
            .map_err(|e| PortalError::StorageRead(e.to_string()))?;
        *self.slot.lock().expect("vault slot lock poisoned") = Some(payload);
        Ok(())
    }

    async fn clear(&self) -> Result<(), PortalError> {
        *self.slot.lock().expect("vault slot lock poisoned") = None;
        Ok(())
    }
}
