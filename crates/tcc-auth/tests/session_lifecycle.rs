//! End-to-end lifecycle: a server-issued token drives the client session.

use chrono::{TimeDelta, Utc};
use figment::Jail;
use tcc_auth::token_store::{TOKEN_ENV_VAR, TokenSource};
use tcc_auth::{Session, TokenKeys, TokenStore, decode::decode_unverified};
use tcc_core::entities::User;
use tcc_core::enums::Role;

fn admin() -> User {
    User {
        id: "usr-ad000001".into(),
        name: "Admin".into(),
        email: "admin@tcc.local".into(),
        role: Role::Admin,
        created_at: Utc::now(),
    }
}

#[test]
fn issued_token_decodes_to_same_identity_both_ways() {
    let keys = TokenKeys::new(b"integration", "tcc", TimeDelta::minutes(30));
    let token = keys.issue(&admin()).unwrap();

    let verified = keys.verify(&token).unwrap();
    let unverified = decode_unverified(&token).unwrap();
    assert_eq!(verified, unverified);
    assert_eq!(unverified.to_identity().user_id, "usr-ad000001");
    assert!(unverified.to_identity().is_admin());
}

#[test]
fn expired_server_token_is_removed_on_restore() {
    let tmp = tempfile::TempDir::new().unwrap();
    let store = TokenStore::new(tmp.path(), "user_token").without_env();
    let keys = TokenKeys::new(b"integration", "tcc", TimeDelta::minutes(30));
    let token = keys
        .issue_at(&admin(), Utc::now() - TimeDelta::hours(1))
        .unwrap();
    store.store(&token).unwrap();

    let session = Session::restore(store.clone());
    assert!(!session.is_authenticated());
    assert!(store.load().is_none(), "expired token must be cleared");
}

#[test]
fn env_token_wins_over_file() {
    Jail::expect_with(|jail| {
        let keys = TokenKeys::new(b"integration", "tcc", TimeDelta::minutes(30));
        let env_token = keys.issue(&admin()).unwrap();
        jail.set_env(TOKEN_ENV_VAR, &env_token);

        let store = TokenStore::new(jail.directory(), "user_token");
        store.store("file-token").expect("store");

        let session = Session::restore(store);
        assert!(session.is_authenticated());
        assert_eq!(session.source(), Some(TokenSource::Env));
        assert_eq!(session.token(), Some(env_token.as_str()));
        Ok(())
    });
}
