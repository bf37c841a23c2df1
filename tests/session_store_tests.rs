use async_trait::async_trait;
use eduerp_portal::{
    auth::MockAuthenticator,
    data,
    error::PortalError,
    models::{Role, Session},
    repository::{DirectoryState, SeedDirectory},
    session::{SessionState, SessionStore},
    vault::{MemorySessionVault, SessionVault, VaultState},
};
use std::sync::Arc;
use std::time::Duration;

/// A vault whose save stalls, so a logout can land while the session record
/// is being persisted.
struct SlowSaveVault {
    inner: MemorySessionVault,
    save_delay: Duration,
}

impl SlowSaveVault {
    fn new(save_delay: Duration) -> Self {
        Self {
            inner: MemorySessionVault::new(),
            save_delay,
        }
    }
}

#[async_trait]
impl SessionVault for SlowSaveVault {
    async fn load(&self) -> Result<Option<Session>, PortalError> {
        self.inner.load().await
    }

    async fn save(&self, session: &Session) -> Result<(), PortalError> {
        tokio::time::sleep(self.save_delay).await;
        self.inner.save(session).await
    }

    async fn clear(&self) -> Result<(), PortalError> {
        self.inner.clear().await
    }
}

// --- Helpers ---

fn directory() -> DirectoryState {
    Arc::new(SeedDirectory::new())
}

/// Builds a store over the given vault with the given simulated login delay.
fn store_with(vault: VaultState, delay_ms: u64) -> Arc<SessionStore> {
    let authenticator = Arc::new(MockAuthenticator::new(
        directory(),
        Duration::from_millis(delay_ms),
    ));
    Arc::new(SessionStore::new(vault, authenticator))
}

// --- Lifecycle ---

#[tokio::test]
async fn store_reports_unknown_before_initialize() {
    let store = store_with(Arc::new(MemorySessionVault::new()), 0);
    // Pre-load state must be Unknown, not Unauthenticated: consumers must
    // not treat "not yet loaded" as "logged out".
    assert!(store.current().is_unknown());
}

#[tokio::test]
async fn initialize_with_empty_vault_is_unauthenticated() {
    let store = store_with(Arc::new(MemorySessionVault::new()), 0);
    store.initialize().await;
    assert_eq!(store.current(), SessionState::Unauthenticated);
}

#[tokio::test]
async fn malformed_persisted_payload_is_treated_as_absent() {
    // A poisoned vault must resolve to Unauthenticated without any error
    // reaching the caller.
    let store = store_with(Arc::new(MemorySessionVault::poisoned()), 0);
    store.initialize().await;
    assert_eq!(store.current(), SessionState::Unauthenticated);
}

// --- Login ---

#[tokio::test]
async fn login_with_known_identity_succeeds() {
    let store = store_with(Arc::new(MemorySessionVault::new()), 0);
    store.initialize().await;

    let session = store
        .login("admin@eduerp.com", "anything", Role::Admin)
        .await
        .expect("login should succeed");

    assert_eq!(session.role, Role::Admin);
    assert_eq!(session.subject_id, data::ADMIN_ID);
    assert_eq!(store.current().session().map(|s| s.subject_id), Some(data::ADMIN_ID));
}

#[tokio::test]
async fn login_with_unknown_identity_fails_and_preserves_state() {
    let store = store_with(Arc::new(MemorySessionVault::new()), 0);
    store.initialize().await;

    let err = store
        .login("nope@x.com", "pw", Role::Student)
        .await
        .expect_err("no identity record matches");
    assert!(matches!(err, PortalError::Authentication));
    assert_eq!(store.current(), SessionState::Unauthenticated);
}

#[tokio::test]
async fn login_with_wrong_role_for_known_email_fails() {
    let store = store_with(Arc::new(MemorySessionVault::new()), 0);
    store.initialize().await;

    // The email exists but is registered as admin; matching is by the pair.
    let err = store
        .login("admin@eduerp.com", "pw", Role::Teacher)
        .await
        .expect_err("role must match the identity record");
    assert!(matches!(err, PortalError::Authentication));
}

#[tokio::test]
async fn failed_login_leaves_existing_session_untouched() {
    let store = store_with(Arc::new(MemorySessionVault::new()), 0);
    store.initialize().await;

    store
        .login("teacher@eduerp.com", "pw", Role::Teacher)
        .await
        .expect("seed teacher exists");

    let err = store
        .login("ghost@eduerp.com", "pw", Role::Teacher)
        .await
        .expect_err("unknown identity");
    assert!(matches!(err, PortalError::Authentication));

    // The prior teacher session survives the failed attempt.
    assert_eq!(
        store.current().session().map(|s| s.subject_id),
        Some(data::TEACHER_JANE_ID)
    );
}

// --- Logout ---

#[tokio::test]
async fn logout_is_idempotent() {
    let store = store_with(Arc::new(MemorySessionVault::new()), 0);
    store.initialize().await;

    store
        .login("student@eduerp.com", "pw", Role::Student)
        .await
        .expect("seed student exists");

    store.logout().await;
    assert_eq!(store.current(), SessionState::Unauthenticated);

    // Second logout: still Unauthenticated, no error.
    store.logout().await;
    assert_eq!(store.current(), SessionState::Unauthenticated);
}

// --- Persistence round-trip ---

#[tokio::test]
async fn session_survives_simulated_reload() {
    let vault: VaultState = Arc::new(MemorySessionVault::new());

    let first = store_with(vault.clone(), 0);
    first.initialize().await;
    let session = first
        .login("student@eduerp.com", "pw", Role::Student)
        .await
        .expect("login should succeed");

    // A fresh store over the same vault models a page reload.
    let second = store_with(vault, 0);
    second.initialize().await;

    let restored = second.current();
    let restored = restored.session().expect("session should be restored");
    assert_eq!(restored.subject_id, session.subject_id);
    assert_eq!(restored.role, session.role);
}

#[tokio::test]
async fn logout_clears_the_persisted_copy() {
    let vault: VaultState = Arc::new(MemorySessionVault::new());

    let store = store_with(vault.clone(), 0);
    store.initialize().await;
    store
        .login("admin@eduerp.com", "pw", Role::Admin)
        .await
        .expect("login should succeed");
    store.logout().await;

    assert!(vault.load().await.expect("vault readable").is_none());
}

// --- Concurrency rules ---

#[tokio::test]
async fn second_login_while_one_is_pending_is_discarded() {
    // 200ms delay keeps the first attempt in flight while the second arrives.
    let store = store_with(Arc::new(MemorySessionVault::new()), 200);
    store.initialize().await;

    let racing = {
        let store = store.clone();
        tokio::spawn(async move { store.login("admin@eduerp.com", "pw", Role::Admin).await })
    };
    tokio::time::sleep(Duration::from_millis(20)).await;

    let err = store
        .login("teacher@eduerp.com", "pw", Role::Teacher)
        .await
        .expect_err("second attempt must be rejected while one is pending");
    assert!(matches!(err, PortalError::LoginPending));

    // The first attempt still completes normally.
    let session = racing.await.expect("task").expect("first login succeeds");
    assert_eq!(session.role, Role::Admin);
}

#[tokio::test]
async fn logout_wins_over_a_pending_login() {
    let vault: VaultState = Arc::new(MemorySessionVault::new());
    let store = store_with(vault.clone(), 200);
    store.initialize().await;

    let racing = {
        let store = store.clone();
        tokio::spawn(async move { store.login("admin@eduerp.com", "pw", Role::Admin).await })
    };
    tokio::time::sleep(Duration::from_millis(20)).await;

    // Logout lands while the login is still sleeping in the authenticator.
    store.logout().await;

    let err = racing
        .await
        .expect("task")
        .expect_err("the pending login's result must be discarded");
    assert!(matches!(err, PortalError::LoginSuperseded));

    // No stale session was resurrected, in memory or in the vault.
    assert_eq!(store.current(), SessionState::Unauthenticated);
    assert!(vault.load().await.expect("vault readable").is_none());
}

#[tokio::test]
async fn logout_during_session_persistence_still_wins() {
    // Authentication resolves instantly; the race window is the vault save.
    let vault: VaultState = Arc::new(SlowSaveVault::new(Duration::from_millis(200)));
    let store = store_with(vault.clone(), 0);
    store.initialize().await;

    let racing = {
        let store = store.clone();
        tokio::spawn(async move { store.login("admin@eduerp.com", "pw", Role::Admin).await })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;

    // Logout lands while the login is suspended inside vault.save.
    store.logout().await;

    let err = racing
        .await
        .expect("task")
        .expect_err("the result persisted after logout must be discarded");
    assert!(matches!(err, PortalError::LoginSuperseded));

    // The re-written record was compensated away and no session installed.
    assert_eq!(store.current(), SessionState::Unauthenticated);
    assert!(vault.load().await.expect("vault readable").is_none());
}
