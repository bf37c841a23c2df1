use chrono::{TimeZone, Utc};
use eduerp_portal::{
    error::PortalError,
    models::{Role, Session},
    vault::{FileSessionVault, SESSION_KEY, SessionVault},
};
use serial_test::serial;
use std::path::PathBuf;
use uuid::Uuid;

// All tests share one on-disk directory, so they are serialized.

fn vault_dir() -> PathBuf {
    PathBuf::from("./target/eduerp-vault-tests")
}

fn record_path() -> PathBuf {
    vault_dir().join(format!("{SESSION_KEY}.json"))
}

fn reset_dir() {
    let _ = std::fs::remove_file(record_path());
}

fn sample_session() -> Session {
    Session {
        subject_id: Uuid::from_u128(2),
        display_name: "Jane Smith".to_string(),
        role: Role::Teacher,
        contact_email: "teacher@eduerp.com".to_string(),
        avatar_ref: None,
        joined_at: Utc.with_ymd_and_hms(2023, 1, 15, 9, 30, 0).unwrap(),
    }
}

#[tokio::test]
#[serial]
async fn empty_vault_loads_as_none() {
    reset_dir();
    let vault = FileSessionVault::new(&vault_dir());
    assert!(vault.load().await.expect("load succeeds").is_none());
}

#[tokio::test]
#[serial]
async fn save_then_load_round_trips() {
    reset_dir();
    let vault = FileSessionVault::new(&vault_dir());

    let session = sample_session();
    vault.save(&session).await.expect("save succeeds");

    let restored = vault
        .load()
        .await
        .expect("load succeeds")
        .expect("record present");
    assert_eq!(restored, session);
}

#[tokio::test]
#[serial]
async fn save_creates_the_session_directory() {
    let dir = vault_dir().join("nested").join("deeper");
    let _ = std::fs::remove_dir_all(vault_dir().join("nested"));
    let vault = FileSessionVault::new(&dir);

    vault.save(&sample_session()).await.expect("save succeeds");
    assert!(dir.join(format!("{SESSION_KEY}.json")).exists());
}

#[tokio::test]
#[serial]
async fn malformed_record_is_reported_as_a_storage_error() {
    reset_dir();
    std::fs::create_dir_all(vault_dir()).expect("test dir");
    std::fs::write(record_path(), b"{not-a-session").expect("seed garbage");

    let vault = FileSessionVault::new(&vault_dir());
    let err = vault.load().await.expect_err("garbage must not parse");
    assert!(matches!(err, PortalError::StorageRead(_)));
}

#[tokio::test]
#[serial]
async fn clear_removes_the_record_and_is_idempotent() {
    reset_dir();
    let vault = FileSessionVault::new(&vault_dir());

    vault.save(&sample_session()).await.expect("save succeeds");
    vault.clear().await.expect("clear succeeds");
    assert!(!record_path().exists());

    // Clearing again must still succeed.
    vault.clear().await.expect("second clear succeeds");
    assert!(vault.load().await.expect("load succeeds").is_none());
}
