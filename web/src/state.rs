//! Process-global signals.
//!
//! Navigation payloads live here between the page that produces them and
//! the page that consumes them. Nothing here is persisted.

use dioxus::prelude::*;
use shared_types::{MediaResult, MusicId, PersistedPost};

/// Generated song handed to the result screen. The song creator lives
/// outside this client and fills it through [`stage_media_result`] (or
/// `router::open_song_result`, which also navigates).
pub static PENDING_MEDIA_RESULT: GlobalSignal<Option<MediaResult>> = GlobalSignal::new(|| None);

/// Post opened from the blog list for editing.
pub static PENDING_EDIT: GlobalSignal<Option<PersistedPost>> = GlobalSignal::new(|| None);

/// Posts created in this session, oldest first.
pub static RECENT_POSTS: GlobalSignal<Vec<PersistedPost>> = GlobalSignal::new(Vec::new);

#[derive(Debug, Clone, PartialEq)]
pub struct SavedSong {
    pub music_id: MusicId,
    pub title: String,
    pub emotion1: String,
    pub emotion2: String,
    pub music_url: String,
}

/// Songs saved to the playlist in this session, oldest first.
pub static SAVED_SONGS: GlobalSignal<Vec<SavedSong>> = GlobalSignal::new(Vec::new);

/// Set while an editor holds unsaved, not-in-flight changes.
pub static EDITOR_EXIT_GUARD: GlobalSignal<bool> = GlobalSignal::new(|| false);

pub fn stage_media_result(media: MediaResult) {
    *PENDING_MEDIA_RESULT.write() = Some(media);
}

/// Remember a created post, replacing an older entry with the same id.
pub fn record_post(post: PersistedPost) {
    let mut posts = RECENT_POSTS.write();
    posts.retain(|p| p.post_id != post.post_id);
    posts.push(post);
}

/// Replace a song entry with the same id, or append.
pub fn record_song(song: SavedSong) {
    let mut songs = SAVED_SONGS.write();
    match songs.iter_mut().find(|s| s.music_id == song.music_id) {
        Some(existing) => *existing = song,
        None => songs.push(song),
    }
}
