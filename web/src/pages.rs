//! Route targets. Each page pulls its inputs (route params, navigation
//! payloads) and hands them to a component.

use dioxus::prelude::*;
use dioxus_logger::tracing::{error, warn};
use shared_types::{PersistedPost, PostId};

use crate::components::editor::logic::draft_from_blob;
use crate::components::editor::Draft;
use crate::components::{Landing, MyBlogView, PlaylistView, PostEditor, SongResultView};
use crate::router::{navigate_guarded, Route};
use crate::state::{PENDING_EDIT, PENDING_MEDIA_RESULT};
use crate::storage::HttpStorage;

#[component]
pub fn Home() -> Element {
    rsx! { Landing {} }
}

#[component]
pub fn Write() -> Element {
    rsx! { PostEditor { post_id: None, initial: None } }
}

/// Draft to edit: the stored artifact when it can be read, the post's own
/// fields with an empty body otherwise.
async fn load_post_draft(post: &PersistedPost) -> Draft {
    let fallback = || Draft {
        title: post.title.clone(),
        thumbnail_url: Some(post.thumbnail_url.clone()).filter(|url| !url.is_empty()),
        hash_tag: post.hash_tag.clone(),
        ..Draft::default()
    };

    match HttpStorage::default().fetch(&post.post_url).await {
        Ok(body) => draft_from_blob(&body).unwrap_or_else(|e| {
            warn!("Post {} artifact is unreadable: {}", post.post_id, e);
            fallback()
        }),
        Err(e) => {
            error!("Loading post {} failed: {}", post.post_id, e);
            fallback()
        }
    }
}

#[component]
pub fn EditPost(post_id: PostId) -> Element {
    let pending = PENDING_EDIT
        .read()
        .clone()
        .filter(|post| post.post_id == post_id);

    let draft = use_resource(use_reactive!(|(pending,)| async move {
        match pending {
            Some(post) => Some(load_post_draft(&post).await),
            None => None,
        }
    }));

    let loaded = draft.read().clone();
    match loaded {
        Some(Some(initial)) => rsx! {
            PostEditor { key: "{post_id}", post_id: Some(post_id), initial: Some(initial) }
        },
        Some(None) => rsx! {
            div {
                class: "page-message",
                p { "This post is not available for editing." }
                button { onclick: move |_| navigate_guarded(Route::Home {}), "Go home" }
            }
        },
        None => rsx! {
            div { class: "page-message", p { "Loading..." } }
        },
    }
}

#[component]
pub fn SongResult() -> Element {
    match PENDING_MEDIA_RESULT.read().clone() {
        Some(media) => rsx! { SongResultView { media } },
        None => rsx! {
            div {
                class: "page-message",
                p { "There is no generated song to show." }
                button { onclick: move |_| navigate_guarded(Route::Home {}), "Go home" }
            }
        },
    }
}

#[component]
pub fn MyBlog(uid: String) -> Element {
    rsx! { MyBlogView { uid } }
}

#[component]
pub fn Playlist(uid: String) -> Element {
    rsx! { PlaylistView { uid } }
}
