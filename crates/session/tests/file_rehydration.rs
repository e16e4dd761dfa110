//! Restart behaviour of the session store over a real file.

use chrono::{Duration, Utc};
use crm_core::guard::{AuthGate, GuardDecision, RoleGate};
use crm_core::roles::{Role, RoleSet};
use crm_core::session::{BearerToken, Session, SessionProfile};
use crm_session::{FileStorage, SessionStorage, SessionStore, DEFAULT_SESSION_TTL_DAYS};

fn amy() -> SessionProfile {
    SessionProfile {
        id: "u1".into(),
        name: "Amy".into(),
        email: "a@x.com".into(),
        role: Role::Admin,
        token: BearerToken::new("tok123"),
    }
}

fn ttl() -> Duration {
    Duration::days(DEFAULT_SESSION_TTL_DAYS)
}

#[test]
fn session_survives_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let store = SessionStore::open(FileStorage::new(&path), ttl());
    store.login(amy());
    drop(store);

    let restarted = SessionStore::open(FileStorage::new(&path), ttl());
    assert_eq!(restarted.current(), Session::Authenticated(amy()));
    assert_eq!(AuthGate.evaluate(&restarted.current()), GuardDecision::Render);
}

#[test]
fn logout_removes_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let store = SessionStore::open(FileStorage::new(&path), ttl());
    store.login(amy());
    assert!(path.exists());

    store.logout();
    assert!(!path.exists());

    let restarted = SessionStore::open(FileStorage::new(&path), ttl());
    assert_eq!(restarted.current(), Session::Anonymous);
}

#[test]
fn expired_file_rehydrates_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    let start = Utc::now();

    SessionStore::open_at(FileStorage::new(&path), ttl(), start).login_at(amy(), start);

    let six_days = start + Duration::days(6);
    let still_valid = SessionStore::open_at(FileStorage::new(&path), ttl(), six_days);
    assert!(still_valid.current().is_authenticated());

    let eight_days = start + Duration::days(8);
    let expired = SessionStore::open_at(FileStorage::new(&path), ttl(), eight_days);
    assert_eq!(expired.current(), Session::Anonymous);
    assert!(!path.exists(), "expired record should be erased");

    let gate = RoleGate::new(RoleSet::of(&[Role::Admin]));
    assert_eq!(gate.evaluate(&expired.current()), GuardDecision::to_landing());
}

#[test]
fn corrupt_file_rehydrates_empty_and_is_erased() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, b"id=u1;role=admin").unwrap();

    let store = SessionStore::open(FileStorage::new(&path), ttl());
    assert_eq!(store.current(), Session::Anonymous);
    assert!(FileStorage::new(&path).load().unwrap().is_none());
}
