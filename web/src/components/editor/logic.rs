use std::sync::OnceLock;

use chrono::{DateTime, SecondsFormat, Utc};
use regex::Regex;
use shared_types::{normalize_hashtags, CreatePostRequest, DraftArtifact, UpdatePostRequest};

use super::document::Document;
use super::types::Draft;
use crate::storage::UploadFile;

fn slug_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)[^a-z0-9]").expect("slug pattern is valid"))
}

pub fn title_slug(title: &str) -> String {
    if title.is_empty() {
        return "untitled".to_string();
    }
    slug_regex().replace_all(title, "_").to_lowercase()
}

/// `<slug>_<timestamp>.json`, the timestamp being ISO-8601 UTC without
/// separators.
pub fn artifact_name(title: &str, now: DateTime<Utc>) -> String {
    let timestamp: String = now
        .to_rfc3339_opts(SecondsFormat::Millis, true)
        .chars()
        .filter(|c| !matches!(c, '-' | ':' | '.'))
        .collect();
    format!("{}_{}.json", title_slug(title), timestamp)
}

/// Blob written to the temporary area: the structured document, unrendered.
pub fn temporary_blob(draft: &Draft) -> String {
    let artifact = DraftArtifact {
        title: draft.title.clone(),
        content: draft.content.to_json(),
        thumbnail_url: draft.thumbnail().to_string(),
        hash_tag: draft.hash_tag.clone(),
    };
    serde_json::to_string(&artifact).unwrap_or_default()
}

/// Final artifact: pretty JSON with rendered markup.
pub fn final_artifact(draft: &Draft, now: DateTime<Utc>) -> UploadFile {
    let artifact = DraftArtifact {
        title: draft.title.clone(),
        content: draft.content.to_html(),
        thumbnail_url: draft.thumbnail().to_string(),
        hash_tag: draft.hash_tag.clone(),
    };
    UploadFile::json(
        artifact_name(&draft.title, now),
        serde_json::to_string_pretty(&artifact).unwrap_or_default(),
    )
}

pub fn create_request(draft: &Draft, post_url: &str) -> CreatePostRequest {
    CreatePostRequest {
        title: draft.title.clone(),
        post_url: post_url.to_string(),
        thumbnail_url: draft.thumbnail().to_string(),
        hash_tag: normalize_hashtags(&draft.hash_tag),
    }
}

pub fn update_request(
    title: &str,
    content_html: &str,
    thumbnail_url: &str,
    hash_tag: &str,
) -> UpdatePostRequest {
    UpdatePostRequest {
        title: title.to_string(),
        content: content_html.to_string(),
        thumbnail_url: thumbnail_url.to_string(),
        hash_tag: normalize_hashtags(hash_tag),
    }
}

/// Rebuild a draft from a temporary-save blob. The content field holds the
/// structured document; anything unparsable there falls back to markup.
pub fn draft_from_blob(blob: &str) -> Result<Draft, serde_json::Error> {
    let artifact: DraftArtifact = serde_json::from_str(blob)?;
    Ok(Draft {
        title: artifact.title,
        content: Document::load(&artifact.content),
        thumbnail_url: Some(artifact.thumbnail_url).filter(|url| !url.is_empty()),
        hash_tag: artifact.hash_tag,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_draft() -> Draft {
        let mut content = Document::new();
        content.insert_text(0, "Walked by the river.");
        Draft {
            title: "My Day".to_string(),
            content,
            thumbnail_url: Some("https://s/t.png".to_string()),
            hash_tag: "  jazz   calm ".to_string(),
        }
    }

    #[test]
    fn artifact_name_slugs_title_and_stamps_time() {
        let now = Utc.with_ymd_and_hms(2026, 3, 4, 5, 6, 7).unwrap();
        assert_eq!(artifact_name("My Day!", now), "my_day__20260304T050607000Z.json");
        assert_eq!(artifact_name("", now), "untitled_20260304T050607000Z.json");
        assert_eq!(artifact_name("재즈", now), "___20260304T050607000Z.json");
    }

    #[test]
    fn create_request_collapses_hashtags() {
        let request = create_request(&sample_draft(), "https://s/posts/a.json");
        assert_eq!(request.hash_tag, "jazz calm");
        assert_eq!(request.thumbnail_url, "https://s/t.png");
    }

    #[test]
    fn final_artifact_carries_rendered_markup() {
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let file = final_artifact(&sample_draft(), now);
        let artifact: DraftArtifact = serde_json::from_slice(&file.bytes).unwrap();
        assert_eq!(artifact.content, "<p>Walked by the river.</p>");
        assert!(file.name.starts_with("my_day_"));
    }

    #[test]
    fn temporary_blob_restores_draft() {
        let draft = sample_draft();
        let restored = draft_from_blob(&temporary_blob(&draft)).unwrap();
        assert_eq!(restored, draft);
    }

    #[test]
    fn blob_without_thumbnail_restores_none() {
        let restored =
            draft_from_blob(r#"{"title":"t","content":"<p>hi</p>"}"#).unwrap();
        assert_eq!(restored.thumbnail_url, None);
        assert_eq!(restored.content.plain_text(), "hi");
    }
}
