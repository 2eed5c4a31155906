//! User-facing messages produced by the workflows. Pages show them with a
//! blocking alert.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    // Editor
    DraftIncomplete,
    LoginRequired,
    PostSaved,
    PostSaveFailed,
    PostUpdated,
    PostUpdateFailed,
    TemporaryDraftMissing,

    // Playlist
    SavedToPlaylist,
    PlaylistSearchIndexFailed,
    PlaylistPostNotFound,
    PlaylistSessionMissing,
    PlaylistSaveFailed,
    PlaylistNetworkFailed,

    // Metadata
    PostIdMissing,
    MetadataPostNotFound,
    MetadataSessionMissing,
    MusicNotFound,
    TitleUpdateFailed,
    HashtagSaveFailed,
    MetadataNetworkFailed,
    MetadataSaved,
    TitleSaved,
    HashtagsSaved,
    NoChanges,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::DraftIncomplete => "Please enter both a title and some content.",
            Notice::LoginRequired => "You need to log in first.",
            Notice::PostSaved => "Your post has been saved.",
            Notice::PostSaveFailed => "Failed to save the post. Please try again.",
            Notice::PostUpdated => "Your post has been updated.",
            Notice::PostUpdateFailed => "Failed to update the post. Please try again.",
            Notice::TemporaryDraftMissing => "There is no temporarily saved post.",

            Notice::SavedToPlaylist => "Saved to your playlist.",
            Notice::PlaylistSearchIndexFailed => {
                "The song could not be saved because search indexing failed."
            }
            Notice::PlaylistPostNotFound => "The original post could not be found.",
            Notice::PlaylistSessionMissing => "Your session has expired. Please log in again.",
            Notice::PlaylistSaveFailed => "Failed to save to the playlist.",
            Notice::PlaylistNetworkFailed => {
                "A network error occurred while saving to the playlist."
            }

            Notice::PostIdMissing => "Cannot find the post ID.",
            Notice::MetadataPostNotFound => "The post for this song no longer exists.",
            Notice::MetadataSessionMissing => "User information is missing. Please log in again.",
            Notice::MusicNotFound => "The song could not be found.",
            Notice::TitleUpdateFailed => "Failed to update the song title.",
            Notice::HashtagSaveFailed => "Failed to save the genre hashtags.",
            Notice::MetadataNetworkFailed => "A network error occurred while saving.",
            Notice::MetadataSaved => "Title and genres have been saved.",
            Notice::TitleSaved => "The title has been saved.",
            Notice::HashtagsSaved => "The genres have been saved.",
            Notice::NoChanges => "Nothing to save.",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Show each notice in order.
pub fn show_notices(notices: &[Notice]) {
    for notice in notices {
        crate::interop::alert(notice.message());
    }
}
