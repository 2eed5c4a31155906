//! Session context.
//!
//! The login flow lives outside this client and leaves `uid`, `accessToken`
//! and `nickname` in local storage. They are read once when the app starts
//! and provided to the tree as a `Signal<AuthState>`. Workflows never read
//! storage themselves; pages hand them the `Session` explicitly.

use dioxus::prelude::*;

pub const UID_KEY: &str = "uid";
pub const ACCESS_TOKEN_KEY: &str = "accessToken";
pub const NICKNAME_KEY: &str = "nickname";

// ── Session ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub access_token: Option<String>,
    pub nickname: String,
}

impl Session {
    pub fn new(user_id: impl Into<String>, access_token: Option<String>) -> Self {
        Self {
            user_id: user_id.into(),
            access_token,
            nickname: String::new(),
        }
    }

    /// Value for the `Authorization` header, if a token is present.
    pub fn bearer(&self) -> Option<String> {
        self.access_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(|t| format!("Bearer {t}"))
    }

    pub fn has_token(&self) -> bool {
        self.bearer().is_some()
    }
}

/// Build a session from raw storage entries. A missing or blank uid means
/// there is no session at all.
pub fn session_from_entries(
    uid: Option<String>,
    token: Option<String>,
    nickname: Option<String>,
) -> Option<Session> {
    let user_id = uid.map(|u| u.trim().to_string()).filter(|u| !u.is_empty())?;
    Some(Session {
        user_id,
        access_token: token.filter(|t| !t.trim().is_empty()),
        nickname: nickname.unwrap_or_default(),
    })
}

// ── Auth state ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum AuthState {
    /// No uid in storage.
    #[default]
    Anonymous,
    /// A uid is known; the token may still be missing.
    Authenticated(Session),
}

impl AuthState {
    pub fn session(&self) -> Option<&Session> {
        match self {
            AuthState::Authenticated(session) => Some(session),
            AuthState::Anonymous => None,
        }
    }
}

/// Read the session left by the login flow.
pub fn load_session() -> AuthState {
    let session = session_from_entries(
        crate::interop::local_storage_get(UID_KEY),
        crate::interop::local_storage_get(ACCESS_TOKEN_KEY),
        crate::interop::local_storage_get(NICKNAME_KEY),
    );
    match session {
        Some(session) => {
            dioxus_logger::tracing::debug!("Session loaded for user {}", session.user_id);
            AuthState::Authenticated(session)
        }
        None => AuthState::Anonymous,
    }
}

/// Consume the `Signal<AuthState>` context provided by `App`.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_uid_means_no_session() {
        assert!(session_from_entries(None, Some("t".into()), None).is_none());
        assert!(session_from_entries(Some("  ".into()), Some("t".into()), None).is_none());
    }

    #[test]
    fn blank_token_is_dropped() {
        let session = session_from_entries(Some("u1".into()), Some(" ".into()), None).unwrap();
        assert_eq!(session.access_token, None);
        assert!(!session.has_token());
    }

    #[test]
    fn bearer_header_wraps_token() {
        let session = Session::new("u1", Some("abc".to_string()));
        assert_eq!(session.bearer().as_deref(), Some("Bearer abc"));
        assert_eq!(AuthState::Authenticated(session.clone()).session(), Some(&session));
        assert_eq!(AuthState::Anonymous.session(), None);
    }
}
