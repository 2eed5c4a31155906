//! Object storage collaborator.
//!
//! Objects live under `{storage_base}/{area}/{ownerId}/{name}` and are written
//! with a plain `PUT`. The object URL is the reference handed back to callers.

use async_trait::async_trait;
use gloo_net::http::Request;

use crate::config::storage_base;

pub const TEMP_DRAFT_NAME: &str = "draft.json";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("storage request failed: {0}")]
    Transport(String),

    #[error("storage rejected upload: HTTP {status}")]
    Rejected { status: u16 },
}

/// Bytes picked by the user or produced by a workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn json(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content_type: "application/json".to_string(),
            bytes: body.into().into_bytes(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageArea {
    Images,
    Temp,
    Posts,
}

impl StorageArea {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageArea::Images => "images",
            StorageArea::Temp => "temp",
            StorageArea::Posts => "posts",
        }
    }
}

/// Keep object names URL-safe; anything outside `[A-Za-z0-9._-]` becomes `_`.
pub fn sanitize_object_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned
    }
}

pub fn object_path(area: StorageArea, owner_id: &str, name: &str) -> String {
    format!(
        "{}/{}/{}",
        area.as_str(),
        sanitize_object_name(owner_id),
        sanitize_object_name(name)
    )
}

/// Unique name for an uploaded image so repeated uploads never collide.
pub fn image_object_name(original: &str) -> String {
    format!("{}_{}", uuid::Uuid::new_v4().simple(), sanitize_object_name(original))
}

#[async_trait(?Send)]
pub trait Storage {
    /// Upload a user file (editor image, thumbnail) and return its URL.
    async fn upload(&self, file: &UploadFile, owner_id: &str) -> Result<String, StorageError>;

    /// Overwrite the owner's single temporary draft.
    async fn upload_temporary(&self, blob: &str, owner_id: &str) -> Result<String, StorageError>;

    /// Upload a named final artifact.
    async fn upload_final(&self, artifact: &UploadFile, owner_id: &str)
        -> Result<String, StorageError>;

    /// Read back the owner's temporary draft, if one exists.
    async fn load_temporary(&self, owner_id: &str) -> Result<Option<String>, StorageError>;
}

#[derive(Debug, Clone)]
pub struct HttpStorage {
    base: String,
}

impl Default for HttpStorage {
    fn default() -> Self {
        Self::new(storage_base())
    }
}

impl HttpStorage {
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    fn object_url(&self, path: &str) -> String {
        format!("{}/{}", self.base, path)
    }

    async fn put(&self, path: &str, content_type: &str, bytes: &[u8]) -> Result<String, StorageError> {
        let url = self.object_url(path);
        dioxus_logger::tracing::debug!("PUT {} ({} bytes)", url, bytes.len());

        let body = js_sys::Uint8Array::from(bytes);
        let response = Request::put(&url)
            .header("Content-Type", content_type)
            .body(body)
            .map_err(|e| StorageError::Transport(e.to_string()))?
            .send()
            .await
            .map_err(|e| StorageError::Transport(e.to_string()))?;

        if !response.ok() {
            return Err(StorageError::Rejected {
                status: response.status(),
            });
        }
        Ok(url)
    }

    /// Read back an object by the URL an upload returned.
    pub async fn fetch(&self, url: &str) -> Result<String, StorageError> {
        dioxus_logger::tracing::debug!("GET {}", url);
        let response = Request::get(url)
            .send()
            .await
            .map_err(|e| StorageError::Transport(e.to_string()))?;
        if !response.ok() {
            return Err(StorageError::Rejected {
                status: response.status(),
            });
        }
        response
            .text()
            .await
            .map_err(|e| StorageError::Transport(e.to_string()))
    }
}

#[async_trait(?Send)]
impl Storage for HttpStorage {
    async fn upload(&self, file: &UploadFile, owner_id: &str) -> Result<String, StorageError> {
        let path = object_path(StorageArea::Images, owner_id, &image_object_name(&file.name));
        self.put(&path, &file.content_type, &file.bytes).await
    }

    async fn upload_temporary(&self, blob: &str, owner_id: &str) -> Result<String, StorageError> {
        let path = object_path(StorageArea::Temp, owner_id, TEMP_DRAFT_NAME);
        self.put(&path, "application/json", blob.as_bytes()).await
    }

    async fn upload_final(
        &self,
        artifact: &UploadFile,
        owner_id: &str,
    ) -> Result<String, StorageError> {
        let path = object_path(StorageArea::Posts, owner_id, &artifact.name);
        self.put(&path, &artifact.content_type, &artifact.bytes).await
    }

    async fn load_temporary(&self, owner_id: &str) -> Result<Option<String>, StorageError> {
        let url = self.object_url(&object_path(StorageArea::Temp, owner_id, TEMP_DRAFT_NAME));
        dioxus_logger::tracing::debug!("GET {}", url);

        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| StorageError::Transport(e.to_string()))?;

        match response.status() {
            404 => Ok(None),
            status if !response.ok() => Err(StorageError::Rejected { status }),
            _ => response
                .text()
                .await
                .map(Some)
                .map_err(|e| StorageError::Transport(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_paths_are_keyed_by_owner() {
        assert_eq!(
            object_path(StorageArea::Temp, "user-7", TEMP_DRAFT_NAME),
            "temp/user-7/draft.json"
        );
        assert_eq!(
            object_path(StorageArea::Posts, "a/b", "my day.json"),
            "posts/a_b/my_day.json"
        );
    }

    #[test]
    fn image_names_are_unique_and_keep_extension() {
        let first = image_object_name("cat photo.png");
        let second = image_object_name("cat photo.png");
        assert_ne!(first, second);
        assert!(first.ends_with("_cat_photo.png"));
    }

    #[test]
    fn empty_names_get_a_placeholder() {
        assert_eq!(sanitize_object_name(""), "file");
    }

    #[test]
    fn json_upload_file_sets_content_type() {
        let file = UploadFile::json("a.json", "{}");
        assert_eq!(file.content_type, "application/json");
        assert_eq!(file.bytes, b"{}".to_vec());
    }
}
