use dioxus::prelude::*;

use crate::api::HttpBlogApi;
use crate::auth::use_auth;
use crate::components::blog::PostCard;
use crate::interop::scroll_into_view_smooth;
use crate::router::{navigate_guarded, Route};
use crate::state::{RECENT_POSTS, SAVED_SONGS};

use super::sections::{load_trending, next_active, SectionId, SectionObserver};
use super::styles::LANDING_STYLES;

#[component]
fn DotNav(active: SectionId) -> Element {
    rsx! {
        nav {
            class: "dot-nav",
            for section in SectionId::ALL {
                button {
                    key: "{section.element_id()}",
                    class: if section == active { "dot-nav-dot active" } else { "dot-nav-dot" },
                    title: section.label(),
                    onclick: move |_| scroll_into_view_smooth(section.element_id()),
                }
            }
        }
    }
}

#[component]
pub fn Landing() -> Element {
    let auth = use_auth();
    let mut active = use_signal(SectionId::default);
    let mut observer: Signal<Option<SectionObserver>> = use_signal(|| None);
    let mut trending = use_signal(Vec::<String>::new);
    let mut trending_loaded = use_signal(|| false);

    // Sections exist once mounted
    use_effect(move || {
        if observer.peek().is_some() {
            return;
        }
        observer.set(SectionObserver::observe(move |readings| {
            let current = *active.peek();
            let next = next_active(current, &readings);
            if next != current {
                active.set(next);
            }
        }));
    });

    // Initial load - only run once
    use_effect(move || {
        if trending_loaded() {
            return;
        }
        trending_loaded.set(true);
        spawn(async move {
            let session = auth.peek().session().cloned();
            let api = HttpBlogApi::new(session.as_ref());
            trending.set(load_trending(&api).await);
        });
    });

    let tags = trending.read().clone();
    let recent: Vec<_> = RECENT_POSTS.read().iter().rev().take(6).cloned().collect();
    let songs: Vec<_> = SAVED_SONGS.read().iter().rev().take(6).cloned().collect();

    rsx! {
        style { {LANDING_STYLES} }
        div {
            class: "landing",
            DotNav { active: active() }

            section {
                id: SectionId::Home.element_id(),
                class: "landing-section landing-hero",
                div { class: "landing-circle landing-circle--pink" }
                div { class: "landing-circle landing-circle--blue" }
                div {
                    class: "landing-hashtags",
                    h2 { "Popular Hashtags" }
                    if tags.is_empty() {
                        p { class: "landing-placeholder", "No popular hashtags available" }
                    } else {
                        div {
                            class: "landing-hashtag-list",
                            for tag in tags {
                                span { key: "{tag}", class: "landing-hashtag", "#{tag}" }
                            }
                        }
                    }
                    button {
                        class: "landing-cta",
                        onclick: move |_| navigate_guarded(Route::Write {}),
                        "Write today's story"
                    }
                }
            }

            section {
                id: SectionId::MusicRecommendation.element_id(),
                class: "landing-section",
                h2 { "Music recommendation" }
                if songs.is_empty() {
                    p { class: "landing-placeholder", "Songs you save will appear here." }
                } else {
                    ul {
                        class: "landing-song-list",
                        for song in songs {
                            li {
                                key: "{song.music_id}",
                                span { class: "landing-song-title", "{song.title}" }
                                span { class: "landing-song-emotions", "{song.emotion1} · {song.emotion2}" }
                            }
                        }
                    }
                }
            }

            section {
                id: SectionId::NewPosts.element_id(),
                class: "landing-section",
                h2 { "New posts" }
                if recent.is_empty() {
                    p { class: "landing-placeholder", "No posts yet." }
                } else {
                    div {
                        class: "landing-post-grid",
                        for post in recent {
                            PostCard { key: "{post.post_id}", post }
                        }
                    }
                }
            }
        }
    }
}
