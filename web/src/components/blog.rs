//! Blog and playlist listings
//!
//! Both pages list what this session created: posts from the editor and
//! songs saved on the result screen.

use dioxus::prelude::*;
use shared_types::{visible_hashtags, PersistedPost};

use crate::auth::use_auth;
use crate::router::{navigate_guarded, Route};
use crate::state::{SavedSong, PENDING_EDIT, RECENT_POSTS, SAVED_SONGS};

const BLOG_STYLES: &str = r#"
.blog-page { display: flex; gap: 2rem; min-height: 100vh; padding: 1.25rem; }
.blog-content { flex: 1; display: flex; flex-direction: column; gap: 1rem; }
.blog-placeholder { color: var(--text-secondary, #777); }

.user-panel {
    width: 14rem;
    display: flex;
    flex-direction: column;
    gap: 0.5rem;
    padding: 1rem;
    border-right: 1px solid var(--border-color, #ddd);
}
.user-panel-name { font-size: 1.2rem; font-weight: 600; }
.user-panel-link {
    background: none;
    border: none;
    padding: 0;
    text-align: left;
    color: var(--accent-bg, #6b5bd6);
    cursor: pointer;
}

.post-card { display: flex; gap: 1rem; align-items: center; padding: 0.75rem; }
.post-card-info { flex: 2; display: flex; flex-direction: column; gap: 0.5rem; }
.post-card-title { margin: 0; font-size: 1.3rem; }
.post-card-tags { display: flex; flex-wrap: wrap; gap: 0.4rem; font-size: 0.85rem; color: var(--text-secondary, #777); }
.post-card-actions { display: flex; gap: 0.5rem; }
.post-card-action { font-size: 0.8rem; background: none; border: none; padding: 0; cursor: pointer; color: var(--text-secondary, #777); }
.post-card-action:hover { color: inherit; }
.post-card-thumb { width: 12rem; height: 10rem; object-fit: cover; border-radius: 1rem; background: #fff; }

.song-row { display: flex; align-items: center; gap: 1rem; padding: 0.5rem 0; }
.song-row-title { font-weight: 600; min-width: 10rem; }
.song-row-emotions { color: var(--text-secondary, #777); min-width: 6rem; }
"#;

#[component]
pub fn PostCard(post: PersistedPost) -> Element {
    let tags = visible_hashtags(post.hash_tag.split(' ').map(str::to_string).collect());
    let post_id = post.post_id;
    let editing = post.clone();

    rsx! {
        div {
            class: "post-card",
            div {
                class: "post-card-info",
                h2 { class: "post-card-title", "{post.title}" }
                if !tags.is_empty() {
                    div {
                        class: "post-card-tags",
                        for tag in tags {
                            span { key: "{tag}", "#{tag}" }
                        }
                    }
                }
                div {
                    class: "post-card-actions",
                    a { class: "post-card-action", href: "{post.post_url}", target: "_blank", "Open" }
                    button {
                        class: "post-card-action",
                        onclick: move |_| {
                            *PENDING_EDIT.write() = Some(editing.clone());
                            navigate_guarded(Route::EditPost { post_id });
                        },
                        "Edit"
                    }
                }
            }
            if !post.thumbnail_url.is_empty() {
                img { class: "post-card-thumb", src: "{post.thumbnail_url}", alt: "Post visual" }
            }
        }
    }
}

/// Nickname plus links to the user's blog and playlist.
#[component]
pub fn UserPanel(uid: String) -> Element {
    let auth = use_auth();
    let nickname = auth
        .read()
        .session()
        .filter(|s| s.user_id == uid)
        .map(|s| s.nickname.clone())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| uid.clone());
    let blog_uid = uid.clone();
    let playlist_uid = uid.clone();

    rsx! {
        aside {
            class: "user-panel",
            span { class: "user-panel-name", "{nickname}" }
            button {
                class: "user-panel-link",
                onclick: move |_| navigate_guarded(Route::MyBlog { uid: blog_uid.clone() }),
                "My Blog"
            }
            button {
                class: "user-panel-link",
                onclick: move |_| navigate_guarded(Route::Playlist { uid: playlist_uid.clone() }),
                "My Playlist"
            }
            button {
                class: "user-panel-link",
                onclick: move |_| navigate_guarded(Route::Write {}),
                "Write"
            }
        }
    }
}

/// Session posts newest first; nothing when the blog belongs to someone else.
pub fn posts_for(posts: &[PersistedPost], owner_matches: bool) -> Vec<PersistedPost> {
    if !owner_matches {
        return Vec::new();
    }
    posts.iter().rev().cloned().collect()
}

#[component]
pub fn MyBlogView(uid: String) -> Element {
    let auth = use_auth();
    let is_owner = auth.read().session().is_some_and(|s| s.user_id == uid);
    let posts = posts_for(&RECENT_POSTS.read(), is_owner);

    rsx! {
        style { {BLOG_STYLES} }
        div {
            class: "blog-page",
            UserPanel { uid: uid.clone() }
            main {
                class: "blog-content",
                if posts.is_empty() {
                    p { class: "blog-placeholder", "No posts yet." }
                }
                for post in posts {
                    PostCard { key: "{post.post_id}", post }
                }
            }
        }
    }
}

#[component]
fn SongRow(song: SavedSong) -> Element {
    rsx! {
        div {
            class: "song-row",
            span { class: "song-row-title", "{song.title}" }
            span { class: "song-row-emotions", "{song.emotion1} · {song.emotion2}" }
            audio { src: "{song.music_url}", controls: true, preload: "none" }
        }
    }
}

#[component]
pub fn PlaylistView(uid: String) -> Element {
    let auth = use_auth();
    let is_owner = auth.read().session().is_some_and(|s| s.user_id == uid);
    let songs: Vec<SavedSong> = if is_owner {
        SAVED_SONGS.read().iter().rev().cloned().collect()
    } else {
        Vec::new()
    };

    rsx! {
        style { {BLOG_STYLES} }
        div {
            class: "blog-page",
            UserPanel { uid: uid.clone() }
            main {
                class: "blog-content",
                h2 { "Playlist" }
                if songs.is_empty() {
                    p { class: "blog-placeholder", "No songs saved yet." }
                }
                for song in songs {
                    SongRow { key: "{song.music_id}", song }
                }
            }
        }
    }
}
