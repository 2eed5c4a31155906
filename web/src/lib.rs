pub mod api;
pub mod auth;
pub mod components;
pub mod config;
pub mod interop;
pub mod notice;
pub mod pages;
pub mod router;
pub mod state;
pub mod storage;

pub use api::{ApiError, BlogApi, HttpBlogApi};
pub use auth::{load_session, AuthState, Session};
pub use router::{open_song_result, Route};
pub use storage::{HttpStorage, Storage, StorageError};

use dioxus::prelude::*;

const APP_STYLES: &str = r#"
body {
    margin: 0;
    font-family: -apple-system, BlinkMacSystemFont, "Pretendard", "Noto Sans KR", sans-serif;
    color: #1f1f24;
    background: #fafafa;
}

.page-message {
    display: flex;
    flex-direction: column;
    align-items: center;
    gap: 1rem;
    padding: 4rem 1rem;
    color: #777;
}
"#;

/// Root component: session context plus the router.
#[component]
pub fn App() -> Element {
    use_context_provider(|| Signal::new(load_session()));

    rsx! {
        style { {APP_STYLES} }
        Router::<Route> {}
    }
}
