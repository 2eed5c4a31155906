use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared_types::{
    CreatePostRequest, CreatePostResponse, ErrorCode, ErrorResponse, HashtagRequest, MusicId,
    MusicRequest, PostId, SavedMusicResponse, UpdatePostRequest,
};

use crate::auth::Session;
use crate::config::api_base;

const API_PREFIX: &str = "/api/v1";
const JSON_CONTENT_TYPE: &str = "application/json;charset=UTF-8";

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("login required")]
    Unauthenticated,

    #[error("request failed: {0}")]
    Transport(String),

    #[error("failed to parse JSON: {0}")]
    Decode(String),

    #[error("HTTP error: {status}{}", describe_code(.code))]
    Rejected { status: u16, code: Option<ErrorCode> },
}

fn describe_code(code: &Option<ErrorCode>) -> String {
    code.as_ref().map(|c| format!(" ({c})")).unwrap_or_default()
}

impl ApiError {
    pub fn rejected(status: u16, code: Option<&str>) -> Self {
        ApiError::Rejected {
            status,
            code: code.map(ErrorCode::from_code),
        }
    }

    /// Application error code, when the backend sent one.
    pub fn code(&self) -> Option<&ErrorCode> {
        match self {
            ApiError::Rejected { code, .. } => code.as_ref(),
            _ => None,
        }
    }

    pub fn is_search_index_failure(&self) -> bool {
        self.code() == Some(&ErrorCode::SearchIndex)
    }
}

// ============================================================================
// Backend contract
// ============================================================================

/// REST surface of the blog/music backend used by this client.
#[async_trait(?Send)]
pub trait BlogApi {
    /// `POST /post/{ownerId}`; succeeds only on 201.
    async fn create_post(
        &self,
        owner_id: &str,
        request: &CreatePostRequest,
    ) -> Result<CreatePostResponse, ApiError>;

    /// `PUT /post/{postId}`
    async fn update_post(&self, post_id: PostId, request: &UpdatePostRequest)
        -> Result<(), ApiError>;

    /// `POST /post/{postId}/hashtag`; succeeds only on 204.
    async fn attach_post_hashtags(&self, post_id: PostId, hash_tag: &str) -> Result<(), ApiError>;

    /// `POST /music/post/{postId}`; succeeds on 200 or 204. Only a 200
    /// carries the new music id.
    async fn save_music(
        &self,
        post_id: PostId,
        request: &MusicRequest,
    ) -> Result<Option<MusicId>, ApiError>;

    /// `PUT /music/post/{postId}`; succeeds only on 204.
    async fn update_music(&self, post_id: PostId, request: &MusicRequest) -> Result<(), ApiError>;

    /// `POST /music/{musicId}/hashtag`; succeeds only on 204.
    async fn attach_music_hashtags(&self, music_id: MusicId, hash_tag: &str)
        -> Result<(), ApiError>;

    /// `GET /post/search/hashtags`
    async fn trending_hashtags(&self) -> Result<Vec<String>, ApiError>;
}

// ============================================================================
// HTTP implementation
// ============================================================================

#[derive(Debug, Clone)]
pub struct HttpBlogApi {
    base: String,
    bearer: Option<String>,
}

impl HttpBlogApi {
    pub fn new(session: Option<&Session>) -> Self {
        Self {
            base: format!("{}{}", api_base(), API_PREFIX),
            bearer: session.and_then(Session::bearer),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    fn authorized(&self, builder: RequestBuilder) -> Result<RequestBuilder, ApiError> {
        let bearer = self.bearer.as_deref().ok_or(ApiError::Unauthenticated)?;
        Ok(builder
            .header("Authorization", bearer)
            .header("Content-Type", JSON_CONTENT_TYPE))
    }
}

fn encode_segment(segment: &str) -> String {
    js_sys::encode_uri_component(segment)
        .as_string()
        .unwrap_or_else(|| segment.to_string())
}

async fn send_json<B: Serialize>(builder: RequestBuilder, body: &B) -> Result<Response, ApiError> {
    let body = serde_json::to_string(body)
        .map_err(|e| ApiError::Transport(format!("failed to serialize request: {e}")))?;
    builder
        .body(body)
        .map_err(|e| ApiError::Transport(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))
}

/// Status line and body of a finished request.
async fn read_response(response: Response) -> (u16, String) {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    (status, body)
}

/// Decide a response: the body when `status` is accepted, otherwise
/// `ApiError::Rejected` with whatever `errorCode` the body carries.
pub fn classify<'a>(status: u16, body: &'a str, accepted: &[u16]) -> Result<&'a str, ApiError> {
    if accepted.contains(&status) {
        return Ok(body);
    }
    let code = serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .and_then(|body| body.code());
    Err(ApiError::Rejected { status, code })
}

pub fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Playlist save: a 204 has no body and so no music id.
pub fn saved_music(status: u16, body: &str) -> Result<Option<MusicId>, ApiError> {
    let body = classify(status, body, &[200, 204])?;
    if status == 204 || body.trim().is_empty() {
        return Ok(None);
    }
    decode::<SavedMusicResponse>(body).map(|saved| Some(saved.id))
}

async fn expect_status(response: Response, accepted: &[u16]) -> Result<(), ApiError> {
    let (status, body) = read_response(response).await;
    classify(status, &body, accepted).map(|_| ())
}

async fn expect_json<T: DeserializeOwned>(response: Response, accepted: &[u16]) -> Result<T, ApiError> {
    let (status, body) = read_response(response).await;
    decode(classify(status, &body, accepted)?)
}

#[async_trait(?Send)]
impl BlogApi for HttpBlogApi {
    async fn create_post(
        &self,
        owner_id: &str,
        request: &CreatePostRequest,
    ) -> Result<CreatePostResponse, ApiError> {
        let url = self.url(&format!("/post/{}", encode_segment(owner_id)));
        dioxus_logger::tracing::debug!("POST {}", url);

        let builder = self.authorized(Request::post(&url))?;
        let response = send_json(builder, request).await?;
        expect_json(response, &[201]).await
    }

    async fn update_post(
        &self,
        post_id: PostId,
        request: &UpdatePostRequest,
    ) -> Result<(), ApiError> {
        let url = self.url(&format!("/post/{post_id}"));
        dioxus_logger::tracing::debug!("PUT {}", url);

        let builder = self.authorized(Request::put(&url))?;
        let response = send_json(builder, request).await?;
        expect_status(response, &[200, 204]).await?;
        Ok(())
    }

    async fn attach_post_hashtags(&self, post_id: PostId, hash_tag: &str) -> Result<(), ApiError> {
        let url = self.url(&format!("/post/{post_id}/hashtag"));
        dioxus_logger::tracing::debug!("POST {}", url);

        let builder = self.authorized(Request::post(&url))?;
        let request = HashtagRequest {
            hash_tag: hash_tag.to_string(),
        };
        let response = send_json(builder, &request).await?;
        expect_status(response, &[204]).await?;
        Ok(())
    }

    async fn save_music(
        &self,
        post_id: PostId,
        request: &MusicRequest,
    ) -> Result<Option<MusicId>, ApiError> {
        let url = self.url(&format!("/music/post/{post_id}"));
        dioxus_logger::tracing::debug!("POST {}", url);

        let builder = self.authorized(Request::post(&url))?;
        let response = send_json(builder, request).await?;
        let (status, body) = read_response(response).await;
        saved_music(status, &body)
    }

    async fn update_music(&self, post_id: PostId, request: &MusicRequest) -> Result<(), ApiError> {
        let url = self.url(&format!("/music/post/{post_id}"));
        dioxus_logger::tracing::debug!("PUT {}", url);

        let builder = self.authorized(Request::put(&url))?;
        let response = send_json(builder, request).await?;
        expect_status(response, &[204]).await?;
        Ok(())
    }

    async fn attach_music_hashtags(
        &self,
        music_id: MusicId,
        hash_tag: &str,
    ) -> Result<(), ApiError> {
        let url = self.url(&format!("/music/{music_id}/hashtag"));
        dioxus_logger::tracing::debug!("POST {}", url);

        let builder = self.authorized(Request::post(&url))?;
        let request = HashtagRequest {
            hash_tag: hash_tag.to_string(),
        };
        let response = send_json(builder, &request).await?;
        expect_status(response, &[204]).await?;
        Ok(())
    }

    async fn trending_hashtags(&self) -> Result<Vec<String>, ApiError> {
        let url = self.url("/post/search/hashtags");
        dioxus_logger::tracing::debug!("GET {}", url);

        let mut builder = Request::get(&url);
        if let Some(bearer) = self.bearer.as_deref() {
            builder = builder.header("Authorization", bearer);
        }
        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        expect_json(response, &[200]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_error_mentions_code() {
        let err = ApiError::rejected(500, Some("CE1"));
        assert_eq!(err.to_string(), "HTTP error: 500 (CE1)");
        assert!(err.is_search_index_failure());

        let bare = ApiError::rejected(502, None);
        assert_eq!(bare.to_string(), "HTTP error: 502");
        assert_eq!(bare.code(), None);
    }

    #[test]
    fn playlist_save_accepts_empty_no_content() {
        assert_eq!(saved_music(204, ""), Ok(None));
        assert_eq!(saved_music(200, r#"{"id":77}"#), Ok(Some(77)));
        assert_eq!(saved_music(200, ""), Ok(None));
    }

    #[test]
    fn playlist_save_reads_error_code_from_body() {
        let err = saved_music(404, r#"{"errorCode":"sp1"}"#).unwrap_err();
        assert_eq!(err.code(), Some(&ErrorCode::PostNotFound));
        assert!(matches!(saved_music(200, "not json"), Err(ApiError::Decode(_))));
    }

    #[test]
    fn classify_only_passes_accepted_statuses() {
        assert_eq!(classify(201, r#"{"postId":42}"#, &[201]), Ok(r#"{"postId":42}"#));
        assert_eq!(
            classify(200, "", &[201]),
            Err(ApiError::Rejected { status: 200, code: None })
        );
        assert_eq!(
            classify(500, r#"{"errorCode":"CE1"}"#, &[204]),
            Err(ApiError::rejected(500, Some("CE1")))
        );
        assert_eq!(classify(502, "<html>bad gateway</html>", &[204]), Err(ApiError::rejected(502, None)));
    }

    #[test]
    fn created_post_body_decodes() {
        let body = classify(201, r#"{"postId":42}"#, &[201]).unwrap();
        let created: CreatePostResponse = decode(body).unwrap();
        assert_eq!(created.post_id, 42);
    }

    #[test]
    fn transport_errors_carry_no_code() {
        let err = ApiError::Transport("offline".to_string());
        assert!(err.code().is_none());
        assert!(!err.is_search_index_failure());
    }
}
