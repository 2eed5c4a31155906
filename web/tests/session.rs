#![cfg(target_arch = "wasm32")]

use sentiple_web::auth::{ACCESS_TOKEN_KEY, NICKNAME_KEY, UID_KEY};
use sentiple_web::interop::local_storage_set;
use sentiple_web::{load_session, AuthState};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn session_is_read_from_local_storage() {
    local_storage_set(UID_KEY, "user-9");
    local_storage_set(ACCESS_TOKEN_KEY, "token-abc");
    local_storage_set(NICKNAME_KEY, "sunny");

    match load_session() {
        AuthState::Authenticated(session) => {
            assert_eq!(session.user_id, "user-9");
            assert_eq!(session.bearer().as_deref(), Some("Bearer token-abc"));
            assert_eq!(session.nickname, "sunny");
        }
        AuthState::Anonymous => panic!("expected a session"),
    }
}

#[wasm_bindgen_test]
fn blank_uid_is_anonymous() {
    local_storage_set(UID_KEY, "");
    assert_eq!(load_session(), AuthState::Anonymous);
}
