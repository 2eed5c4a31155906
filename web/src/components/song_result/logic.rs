//! Playlist save and metadata edit for a generated song.

use dioxus_logger::tracing::{error, info, warn};
use shared_types::{ErrorCode, GenreSelection, MediaResult, MusicId};

use crate::api::{ApiError, BlogApi};
use crate::auth::Session;
use crate::notice::Notice;
use crate::router::Destination;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultPhase {
    #[default]
    Initial,
    SavedToPlaylist,
    MetadataEdited,
}

/// Local state of the result screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultState {
    pub phase: ResultPhase,
    pub music_id: Option<MusicId>,
    pub edited_title: String,
    pub genres: GenreSelection,
}

impl ResultState {
    pub fn new(media: &MediaResult) -> Self {
        Self {
            phase: ResultPhase::Initial,
            music_id: None,
            edited_title: media.title.clone(),
            genres: GenreSelection::new(),
        }
    }

    pub fn metadata_visible(&self) -> bool {
        self.phase != ResultPhase::Initial
    }

    pub fn title_changed(&self, media: &MediaResult) -> bool {
        self.edited_title != media.title
    }
}

// ── Save to playlist ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaylistOutcome {
    pub notices: Vec<Notice>,
    /// The backend accepted the song.
    pub saved: bool,
    /// Present only when the backend returned one.
    pub music_id: Option<MusicId>,
}

fn playlist_failure(err: &ApiError) -> Notice {
    match (err, err.code()) {
        (ApiError::Unauthenticated, _) => Notice::LoginRequired,
        (ApiError::Transport(_), _) => Notice::PlaylistNetworkFailed,
        (_, Some(ErrorCode::SearchIndex)) => Notice::PlaylistSearchIndexFailed,
        (_, Some(ErrorCode::PostNotFound)) => Notice::PlaylistPostNotFound,
        (_, Some(ErrorCode::SessionMissing)) => Notice::PlaylistSessionMissing,
        _ => Notice::PlaylistSaveFailed,
    }
}

/// Post the song to the playlist. Only runs from [`ResultPhase::Initial`];
/// on success the caller moves `state` to `SavedToPlaylist`.
pub async fn save_to_playlist(
    api: &dyn BlogApi,
    session: Option<&Session>,
    media: &MediaResult,
    state: &ResultState,
) -> PlaylistOutcome {
    if state.phase != ResultPhase::Initial {
        return PlaylistOutcome::default();
    }
    if !session.is_some_and(Session::has_token) {
        return PlaylistOutcome {
            notices: vec![Notice::LoginRequired],
            ..PlaylistOutcome::default()
        };
    }
    let Some(post_id) = media.post_id else {
        return PlaylistOutcome {
            notices: vec![Notice::PostIdMissing],
            ..PlaylistOutcome::default()
        };
    };

    match api.save_music(post_id, &media.music_request(&media.title)).await {
        Ok(music_id) => {
            match music_id {
                Some(id) => info!("Song saved to playlist as music {}", id),
                None => info!("Song saved to playlist; no music id returned"),
            }
            PlaylistOutcome {
                notices: vec![Notice::SavedToPlaylist],
                saved: true,
                music_id,
            }
        }
        Err(e) => {
            match e.code() {
                Some(ErrorCode::SearchIndex) => warn!("Search indexing failed for song: {}", e),
                Some(code) if !code.is_known() => {
                    error!("Saving song to playlist failed with unmapped code {}: {}", code, e)
                }
                _ => error!("Saving song to playlist failed: {}", e),
            }
            PlaylistOutcome {
                notices: vec![playlist_failure(&e)],
                ..PlaylistOutcome::default()
            }
        }
    }
}

// ── Metadata ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataOutcome {
    pub notices: Vec<Notice>,
    pub navigate: Option<Destination>,
    /// Title stored by the backend when the title call succeeded.
    pub saved_title: Option<String>,
}

enum CallResult {
    Skipped,
    Done,
    Failed,
    /// Network-level failure; remaining calls are abandoned.
    Aborted,
}

/// Turn a failed metadata call into notices. Search-index failures are
/// logged without their own notice.
fn metadata_failure(err: &ApiError, generic: Notice, notices: &mut Vec<Notice>) -> CallResult {
    if let ApiError::Transport(_) = err {
        error!("Metadata request could not be sent: {}", err);
        notices.push(Notice::MetadataNetworkFailed);
        return CallResult::Aborted;
    }
    match err.code() {
        Some(ErrorCode::SearchIndex) => warn!("Search indexing failed: {}", err),
        Some(ErrorCode::PostNotFound) => notices.push(Notice::MetadataPostNotFound),
        Some(ErrorCode::SessionMissing) => notices.push(Notice::MetadataSessionMissing),
        Some(ErrorCode::MusicNotFound) => notices.push(Notice::MusicNotFound),
        Some(code) if !code.is_known() => {
            error!("Metadata request failed with unmapped code {}: {}", code, err)
        }
        _ => error!("Metadata request failed: {}", err),
    }
    notices.push(generic);
    CallResult::Failed
}

/// Save the edited title and selected genres, each only when there is
/// something to send.
pub async fn save_metadata(
    api: &dyn BlogApi,
    session: Option<&Session>,
    media: &MediaResult,
    state: &ResultState,
) -> MetadataOutcome {
    let Some(session) = session.filter(|s| s.has_token()) else {
        return MetadataOutcome {
            notices: vec![Notice::LoginRequired],
            ..MetadataOutcome::default()
        };
    };
    let Some(post_id) = media.post_id else {
        return MetadataOutcome {
            notices: vec![Notice::PostIdMissing],
            ..MetadataOutcome::default()
        };
    };

    let mut notices = Vec::new();

    let title = if state.title_changed(media) {
        let request = media.music_request(&state.edited_title);
        match api.update_music(post_id, &request).await {
            Ok(()) => CallResult::Done,
            Err(e) => metadata_failure(&e, Notice::TitleUpdateFailed, &mut notices),
        }
    } else {
        CallResult::Skipped
    };

    let hashtags = if matches!(title, CallResult::Aborted) || state.genres.is_empty() {
        CallResult::Skipped
    } else {
        match state.music_id {
            Some(music_id) => match api
                .attach_music_hashtags(music_id, &state.genres.as_hashtag())
                .await
            {
                Ok(()) => CallResult::Done,
                Err(e) => metadata_failure(&e, Notice::HashtagSaveFailed, &mut notices),
            },
            None => {
                warn!("Genres selected before the song was saved");
                notices.push(Notice::MusicNotFound);
                CallResult::Failed
            }
        }
    };

    let title_done = matches!(title, CallResult::Done);
    let hashtags_done = matches!(hashtags, CallResult::Done);
    let any_failed = [&title, &hashtags]
        .iter()
        .any(|r| matches!(r, CallResult::Failed | CallResult::Aborted));

    match (title_done, hashtags_done) {
        (true, true) => notices.push(Notice::MetadataSaved),
        (true, false) => notices.push(Notice::TitleSaved),
        (false, true) => notices.push(Notice::HashtagsSaved),
        (false, false) if !any_failed => notices.push(Notice::NoChanges),
        (false, false) => {}
    }

    MetadataOutcome {
        notices,
        navigate: (!any_failed).then(|| Destination::Playlist(session.user_id.clone())),
        saved_title: title_done.then(|| state.edited_title.clone()),
    }
}
