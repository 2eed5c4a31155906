//! Shared types between the Sentiple web client and the backend
//!
//! These types describe:
//! - JSON bodies of the blog/music REST API (camelCase on the wire)
//! - artifacts written to object storage (temporary and final drafts)
//! - small domain rules the UI enforces locally (hashtags, genres, error codes)

use serde::{Deserialize, Serialize};

// ============================================================================
// Error Codes
// ============================================================================

/// Application error code carried in `{"errorCode": "..."}` bodies.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// CE1 - the backend failed to index the record for search
    SearchIndex,
    /// SP1 - post does not exist
    PostNotFound,
    /// SA9 - user/session information missing
    SessionMissing,
    /// SM1 - music record does not exist
    MusicNotFound,
    /// Anything the client has no mapping for
    Other(String),
}

impl ErrorCode {
    /// Codes compare case-insensitively; the backend sends both `SP1` and `sp1`.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_uppercase().as_str() {
            "CE1" => Self::SearchIndex,
            "SP1" => Self::PostNotFound,
            "SA9" => Self::SessionMissing,
            "SM1" => Self::MusicNotFound,
            _ => Self::Other(code.to_string()),
        }
    }

    pub fn as_code(&self) -> &str {
        match self {
            Self::SearchIndex => "CE1",
            Self::PostNotFound => "SP1",
            Self::SessionMissing => "SA9",
            Self::MusicNotFound => "SM1",
            Self::Other(code) => code,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_code())
    }
}

/// Error body returned alongside non-success statuses
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    #[serde(default)]
    pub error_code: Option<String>,
}

impl ErrorResponse {
    pub fn code(&self) -> Option<ErrorCode> {
        self.error_code.as_deref().map(ErrorCode::from_code)
    }
}

// ============================================================================
// Post API
// ============================================================================

/// Backend-assigned post identifier
pub type PostId = i64;

/// Backend-assigned music identifier
pub type MusicId = i64;

/// Body of `POST /post/{ownerId}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub title: String,
    pub post_url: String,
    pub thumbnail_url: String,
    pub hash_tag: String,
}

/// 201 body of `POST /post/{ownerId}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostResponse {
    pub post_id: PostId,
}

/// Body of `PUT /post/{postId}` issued by the modify page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    pub title: String,
    pub content: String,
    pub thumbnail_url: String,
    pub hash_tag: String,
}

/// Body of both hashtag attachment endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HashtagRequest {
    pub hash_tag: String,
}

/// Post as the backend stores it after a successful create
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PersistedPost {
    pub post_id: PostId,
    pub title: String,
    pub post_url: String,
    pub thumbnail_url: String,
    pub hash_tag: String,
}

// ============================================================================
// Storage Artifacts
// ============================================================================

/// JSON document written to object storage.
///
/// Temporary saves carry the structured editor document (serialized as a
/// string) in `content`; final saves carry rendered HTML.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DraftArtifact {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub thumbnail_url: String,
    #[serde(default)]
    pub hash_tag: String,
}

// ============================================================================
// Music API
// ============================================================================

/// Body of `POST /music/post/{postId}` and `PUT /music/post/{postId}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MusicRequest {
    pub music_url: String,
    pub title: String,
    pub emotion1: String,
    pub emotion2: String,
}

/// Success body of `POST /music/post/{postId}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SavedMusicResponse {
    pub id: MusicId,
}

/// Generated song handed to the result screen by the song creator
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MediaResult {
    pub title: String,
    pub emotion1: String,
    pub emotion2: String,
    pub music_url: String,
    #[serde(default)]
    pub post_id: Option<PostId>,
}

impl MediaResult {
    pub fn music_request(&self, title: &str) -> MusicRequest {
        MusicRequest {
            music_url: self.music_url.clone(),
            title: title.to_string(),
            emotion1: self.emotion1.clone(),
            emotion2: self.emotion2.clone(),
        }
    }
}

// ============================================================================
// Hashtags & Genres
// ============================================================================

/// Trim and collapse runs of whitespace to single spaces.
pub fn normalize_hashtags(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Drop blank entries from a trending-tags listing.
pub fn visible_hashtags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter().filter(|tag| !tag.trim().is_empty()).collect()
}

pub const MAX_GENRES: usize = 5;

pub const GENRES: [&str; 17] = [
    "재즈",
    "힙합",
    "차분한",
    "행복한",
    "사랑스러운",
    "클래식",
    "댄스",
    "우울한",
    "따뜻한",
    "로맨틱한",
    "블루스",
    "인디",
    "일렉트로닉",
    "슬픔",
    "고요한",
    "신나는",
    "평화로운",
];

/// Up to [`MAX_GENRES`] distinct genres, in click order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenreSelection {
    selected: Vec<String>,
}

impl GenreSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove the genre if selected, otherwise add it while below the cap.
    /// Returns whether the selection changed.
    pub fn toggle(&mut self, genre: &str) -> bool {
        if let Some(pos) = self.selected.iter().position(|g| g == genre) {
            self.selected.remove(pos);
            return true;
        }
        if self.selected.len() >= MAX_GENRES {
            return false;
        }
        self.selected.push(genre.to_string());
        true
    }

    pub fn contains(&self, genre: &str) -> bool {
        self.selected.iter().any(|g| g == genre)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.selected.len() >= MAX_GENRES
    }

    pub fn genres(&self) -> &[String] {
        &self.selected
    }

    /// Space-joined form sent as `hashTag`
    pub fn as_hashtag(&self) -> String {
        self.selected.join(" ").trim().to_string()
    }
}

// ============================================================================
// Emotions
// ============================================================================

/// Display colour for an emotion label produced by the song generator
pub fn emotion_color(label: &str) -> Option<&'static str> {
    match label {
        "행복" => Some("#FFD700"),
        "사랑" => Some("#FF1493"),
        "불안" => Some("#6A0DAD"),
        "분노" => Some("#8B0000"),
        "우울" => Some("#000080"),
        "슬픔" => Some("#4169E1"),
        "중립" => Some("#A9A9A9"),
        _ => None,
    }
}

pub fn emotion_description(label: &str) -> Option<&'static str> {
    match label {
        "행복" => Some("A bright field of yellow flowers covering the river"),
        "사랑" => Some("Huge fireworks blooming in the sky"),
        "불안" => Some("A still pond deep inside a dark forest"),
        "분노" => Some("Rough waves churning in the heart"),
        "우울" => Some("A flame fading in a shallow stream of light"),
        "슬픔" => Some("Moonlight on an empty, silent dawn"),
        "중립" => Some("A cool breeze under a cloudy sky"),
        _ => None,
    }
}
