use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::error::PortalError;
use crate::models::{Role, Session};
use crate::repository::DirectoryState;

/// Authenticator
///
/// The asynchronous authentication port. The Session Store talks only to this
/// trait, so the mock implementation below can later be replaced by a real one
/// (password hashing, server round-trip) without changing the store's contract.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Validates a login attempt and, on success, produces the session to
    /// install. Failure means no identity record matched the (email, role)
    /// pair; any prior session is left for the caller to preserve.
    async fn authenticate(
        &self,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<Session, PortalError>;
}

/// AuthState
///
/// The concrete type used to share the authenticator across the application state.
pub type AuthState = Arc<dyn Authenticator>;

/// MockAuthenticator
///
/// The demo implementation: a fixed delay simulating the network round-trip,
/// followed by an identity lookup by email + role against the directory.
///
/// **The password is accepted but never verified.** The source system shipped
/// this exact stub; it is kept as-is rather than silently replaced with an
/// invented verification scheme, and is a known gap for any production use.
pub struct MockAuthenticator {
    directory: DirectoryState,
    delay: Duration,
}

impl MockAuthenticator {
    pub fn new(directory: DirectoryState, delay: Duration) -> Self {
        Self { directory, delay }
    }
}

#[async_trait]
impl Authenticator for MockAuthenticator {
    async fn authenticate(
        &self,
        email: &str,
        _password: &str,
        role: Role,
    ) -> Result<Session, PortalError> {
        // Simulated network latency, as in the source (1000ms by default).
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        match self.directory.find_identity(email, role).await {
            Some(identity) => Ok(identity.session()),
            None => Err(PortalError::Authentication),
        }
    }
}
