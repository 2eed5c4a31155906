use dioxus::prelude::*;
use shared_types::{emotion_color, emotion_description, MediaResult, GENRES, MAX_GENRES};

use crate::api::HttpBlogApi;
use crate::auth::use_auth;
use crate::interop::set_media_playing;
use crate::notice::show_notices;
use crate::router::{navigate_guarded, navigate_to, Destination};
use crate::state::{record_song, SavedSong};

use super::logic::{save_metadata, save_to_playlist, ResultPhase, ResultState};
use super::styles::SONG_RESULT_STYLES;

const AUDIO_ID: &str = "song-result-audio";

#[component]
fn EmotionBadge(label: String) -> Element {
    let color = emotion_color(&label).unwrap_or("var(--text-secondary, #777)");
    let description = emotion_description(&label).unwrap_or_default();
    rsx! {
        div {
            class: "song-emotion",
            span { class: "song-emotion-dot", style: "background: {color};" }
            span { class: "song-emotion-label", "{label}" }
            if !description.is_empty() {
                span { class: "song-emotion-description", "{description}" }
            }
        }
    }
}

#[component]
pub fn SongResultView(media: MediaResult) -> Element {
    let auth = use_auth();
    let media_for_state = media.clone();
    let mut state = use_signal(move || ResultState::new(&media_for_state));
    let mut playing = use_signal(|| false);
    let mut busy = use_signal(|| false);

    let nickname = auth
        .read()
        .session()
        .map(|s| s.nickname.clone())
        .unwrap_or_default();
    let uid = auth.read().session().map(|s| s.user_id.clone());

    let playlist_media = media.clone();
    let on_save_to_playlist = move |_| {
        if *busy.peek() || state.peek().phase != ResultPhase::Initial {
            return;
        }
        let media = playlist_media.clone();
        busy.set(true);
        spawn(async move {
            let session = auth.peek().session().cloned();
            let api = HttpBlogApi::new(session.as_ref());
            let snapshot = state.peek().clone();
            let outcome = save_to_playlist(&api, session.as_ref(), &media, &snapshot).await;
            if outcome.saved {
                let mut state = state.write();
                state.phase = ResultPhase::SavedToPlaylist;
                state.music_id = outcome.music_id;
            }
            if let Some(music_id) = outcome.music_id {
                record_song(SavedSong {
                    music_id,
                    title: media.title.clone(),
                    emotion1: media.emotion1.clone(),
                    emotion2: media.emotion2.clone(),
                    music_url: media.music_url.clone(),
                });
            }
            busy.set(false);
            show_notices(&outcome.notices);
        });
    };

    let metadata_media = media.clone();
    let on_save_metadata = move |_| {
        if *busy.peek() {
            return;
        }
        let media = metadata_media.clone();
        busy.set(true);
        spawn(async move {
            let session = auth.peek().session().cloned();
            let api = HttpBlogApi::new(session.as_ref());
            let snapshot = state.peek().clone();
            let outcome = save_metadata(&api, session.as_ref(), &media, &snapshot).await;
            if let (Some(title), Some(music_id)) = (outcome.saved_title.clone(), snapshot.music_id) {
                record_song(SavedSong {
                    music_id,
                    title,
                    emotion1: media.emotion1.clone(),
                    emotion2: media.emotion2.clone(),
                    music_url: media.music_url.clone(),
                });
            }
            if outcome.navigate.is_some() {
                state.write().phase = ResultPhase::MetadataEdited;
            }
            busy.set(false);
            show_notices(&outcome.notices);
            if let Some(destination) = outcome.navigate.as_ref() {
                navigate_to(destination);
            }
        });
    };

    let toggle_playback = move |_| {
        let next = !playing();
        if set_media_playing(AUDIO_ID, next) {
            playing.set(next);
        }
    };

    let current = state.read().clone();
    let is_busy = busy();
    let playlist_saved = current.phase != ResultPhase::Initial;
    let genre_count = current.genres.len();

    rsx! {
        style { {SONG_RESULT_STYLES} }
        div {
            class: "song-result",

            div {
                class: "song-result-info",
                p { class: "song-result-lead", "A song was made from {nickname}'s feelings today." }
                p { class: "song-result-sub", "Sentiple also looked at the emotions in your day." }
                EmotionBadge { label: media.emotion1.clone() }
                EmotionBadge { label: media.emotion2.clone() }
            }

            div {
                class: "song-result-player",
                h2 { class: "song-result-title", "{media.title}" }
                audio {
                    id: AUDIO_ID,
                    src: "{media.music_url}",
                    preload: "auto",
                    onended: move |_| playing.set(false),
                }
                button {
                    class: "song-play-btn",
                    onclick: toggle_playback,
                    if playing() { "❚❚ Pause" } else { "▶ Play" }
                }
            }

            div {
                class: "song-result-actions",
                button {
                    class: "song-action-btn secondary",
                    onclick: move |_| navigator().go_back(),
                    "↻ Regenerate"
                }
                button {
                    class: "song-action-btn",
                    disabled: is_busy || playlist_saved,
                    onclick: on_save_to_playlist,
                    if playlist_saved { "Saved to playlist" } else { "Save to playlist" }
                }
                if let Some(uid) = uid.clone() {
                    button {
                        class: "song-action-btn secondary",
                        onclick: move |_| navigate_guarded(Destination::Blog(uid.clone()).route()),
                        "Go to my blog"
                    }
                }
            }

            if current.metadata_visible() {
                div {
                    class: "song-metadata",
                    label { class: "song-metadata-label", "Title" }
                    input {
                        class: "song-metadata-title",
                        value: "{current.edited_title}",
                        oninput: move |evt| state.write().edited_title = evt.value(),
                    }

                    label {
                        class: "song-metadata-label",
                        "Genres ({genre_count}/{MAX_GENRES})"
                    }
                    div {
                        class: "song-genre-grid",
                        for genre in GENRES {
                            button {
                                key: "{genre}",
                                class: if current.genres.contains(genre) { "song-genre selected" } else { "song-genre" },
                                disabled: !current.genres.contains(genre) && current.genres.is_full(),
                                onclick: move |_| {
                                    state.write().genres.toggle(genre);
                                },
                                "{genre}"
                            }
                        }
                    }

                    div {
                        class: "song-metadata-actions",
                        button {
                            class: "song-action-btn",
                            disabled: is_busy,
                            onclick: on_save_metadata,
                            "Save"
                        }
                        if let Some(uid) = uid {
                            button {
                                class: "song-action-btn secondary",
                                onclick: move |_| navigate_guarded(Destination::Playlist(uid.clone()).route()),
                                "Go to playlist"
                            }
                        }
                    }
                }
            }
        }
    }
}
