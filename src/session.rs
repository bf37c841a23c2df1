use std::sync::Arc;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crate::auth::AuthState;
use crate::error::PortalError;
use crate::models::{Role, Session};
use crate::vault::VaultState;

/// SessionState
///
/// The three observable states of the Session Store. `Unknown` exists only
/// between construction and the completion of the startup load; consumers must
/// not treat it as "logged out", otherwise every page load would flash a
/// redirect before the persisted session is restored.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// Startup load has not completed yet.
    Unknown,
    /// A live session exists.
    Authenticated(Session),
    /// Startup load completed and found nothing, or the user logged out.
    Unauthenticated,
}

impl SessionState {
    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionState::Authenticated(session) => Some(session),
            _ => None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, SessionState::Unknown)
    }
}

/// SessionStore
///
/// The single source of truth for "who is logged in". Exactly one instance
/// exists per process, shared via `AppState`; the Route Guard only reads it.
///
/// Lifecycle: construct in `Unknown`, call `initialize` exactly once to load
/// the persisted record, then serve `login`/`logout`/`current`.
///
/// Concurrency rules (enforced here, not by callers):
/// - at most one login attempt is in flight at a time; a second concurrent
///   attempt fails fast with `LoginPending`,
/// - a logout racing a pending login wins: the login's result is discarded so
///   a stale session can never be resurrected.
pub struct SessionStore {
    state: RwLock<SessionState>,
    vault: VaultState,
    authenticator: AuthState,
    /// Single-flight gate for login attempts.
    login_pending: AtomicBool,
    /// Bumped by every logout; a login that started under an older epoch
    /// discards its result.
    epoch: AtomicU64,
}

/// SessionStoreState
///
/// The concrete type used to share the store across the application state.
pub type SessionStoreState = Arc<SessionStore>;

impl SessionStore {
    /// new
    ///
    /// Builds the store in the `Unknown` state. Nothing is read from the vault
    /// until `initialize` runs, so `current` reports `Unknown` until then.
    pub fn new(vault: VaultState, authenticator: AuthState) -> Self {
        Self {
            state: RwLock::new(SessionState::Unknown),
            vault,
            authenticator,
            login_pending: AtomicBool::new(false),
            epoch: AtomicU64::new(0),
        }
    }

    /// initialize
    ///
    /// One-shot startup load from the vault. Transitions `Unknown` to
    /// `Authenticated` or `Unauthenticated` exactly once; calling it again is
    /// a no-op. A malformed persisted record is logged and treated as absence,
    /// never propagated to callers.
    pub async fn initialize(&self) {
        if !self.current().is_unknown() {
            return;
        }

        let loaded = match self.vault.load().await {
            Ok(Some(session)) => {
                tracing::info!(
                    subject = %session.subject_id,
                    role = %session.role,
                    "restored persisted session"
                );
                SessionState::Authenticated(session)
            }
            Ok(None) => SessionState::Unauthenticated,
            Err(e) => {
                // StorageRead is recoverable by definition: treat as absence.
                tracing::warn!("discarding unreadable persisted session: {e}");
                SessionState::Unauthenticated
            }
        };

        let mut state = self.state.write().expect("session state lock poisoned");
        // Another initialize may have raced us past the check above.
        if state.is_unknown() {
            *state = loaded;
        }
    }

    /// current
    ///
    /// Synchronous read of the session state.
    pub fn current(&self) -> SessionState {
        self.state
            .read()
            .expect("session state lock poisoned")
            .clone()
    }

    /// login
    ///
    /// Runs one authentication attempt through the authenticator port and, on
    /// success, installs and persists the resulting session.
    ///
    /// - A second call while one is pending fails fast with `LoginPending`.
    /// - An `Authentication` failure leaves any prior session unchanged.
    /// - If a logout lands while the attempt is pending, the result is
    ///   discarded and the call returns `LoginSuperseded`.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<Session, PortalError> {
        if self.login_pending.swap(true, Ordering::SeqCst) {
            return Err(PortalError::LoginPending);
        }

        let started_epoch = self.epoch.load(Ordering::SeqCst);
        let outcome = self.authenticator.authenticate(email, password, role).await;

        let result = match outcome {
            Ok(session) => {
                if self.epoch.load(Ordering::SeqCst) != started_epoch {
                    // Logout already won while authentication was pending;
                    // nothing was persisted yet, so just discard.
                    tracing::info!(email, "discarding login result superseded by logout");
                    Err(PortalError::LoginSuperseded)
                } else {
                    if let Err(e) = self.vault.save(&session).await {
                        // Persistence failure degrades to a non-surviving
                        // session; the login itself still succeeds.
                        tracing::warn!("failed to persist session: {e}");
                    }

                    // The epoch must be re-read under the state lock: a logout
                    // that landed while the save above was suspended has
                    // already cleared state and vault, and installing now
                    // would resurrect the stale session.
                    let installed = {
                        let mut state =
                            self.state.write().expect("session state lock poisoned");
                        if self.epoch.load(Ordering::SeqCst) == started_epoch {
                            *state = SessionState::Authenticated(session.clone());
                            true
                        } else {
                            false
                        }
                    };

                    if installed {
                        tracing::info!(subject = %session.subject_id, role = %session.role, "login succeeded");
                        Ok(session)
                    } else {
                        // Undo the record the save above just re-wrote.
                        tracing::info!(email, "discarding login result superseded by logout");
                        if let Err(e) = self.vault.clear().await {
                            tracing::warn!("failed to clear persisted session: {e}");
                        }
                        Err(PortalError::LoginSuperseded)
                    }
                }
            }
            Err(e) => Err(e),
        };

        self.login_pending.store(false, Ordering::SeqCst);
        result
    }

    /// logout
    ///
    /// Clears the in-memory session and the persisted copy. Always succeeds
    /// and is idempotent; bumping the epoch first guarantees that any login
    /// attempt still in flight discards its result.
    pub async fn logout(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        *self.state.write().expect("session state lock poisoned") = SessionState::Unauthenticated;
        if let Err(e) = self.vault.clear().await {
            tracing::warn!("failed to clear persisted session: {e}");
        }
        tracing::info!("session cleared");
    }
}
