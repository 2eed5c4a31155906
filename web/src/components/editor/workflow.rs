//! Save workflows of the post editor.
//!
//! Temporary save, final save and modify share one entry point,
//! [`run_save`], dispatched over [`SaveMode`]. Calls run one after another;
//! the outcome carries the notices to show and where to go next, and the
//! page applies both.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dioxus_logger::tracing::{debug, error, info, warn};
use shared_types::{normalize_hashtags, PersistedPost, PostId};
use validator::Validate;

use super::logic::{create_request, draft_from_blob, final_artifact, temporary_blob, update_request};
use super::types::{Draft, FlagStore, SavingGuard};
use crate::api::{ApiError, BlogApi};
use crate::auth::Session;
use crate::notice::Notice;
use crate::router::Destination;
use crate::storage::{Storage, UploadFile};

/// Rendered post handed to the modify callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModifiedPost {
    pub title: String,
    pub content_html: String,
    pub thumbnail_url: String,
    pub hash_tag: String,
}

/// Caller-supplied update step of the modify page.
#[async_trait(?Send)]
pub trait PostUpdater {
    async fn update(&self, post: ModifiedPost) -> Result<(), ApiError>;
}

/// Updates an existing post through `PUT /post/{postId}`.
pub struct ApiPostUpdater<'a> {
    pub api: &'a dyn BlogApi,
    pub post_id: PostId,
}

#[async_trait(?Send)]
impl PostUpdater for ApiPostUpdater<'_> {
    async fn update(&self, post: ModifiedPost) -> Result<(), ApiError> {
        let request = update_request(
            &post.title,
            &post.content_html,
            &post.thumbnail_url,
            &post.hash_tag,
        );
        self.api.update_post(self.post_id, &request).await
    }
}

pub enum SaveMode<'a> {
    CreateDraft,
    CreateFinal,
    Modify(&'a dyn PostUpdater),
}

/// Collaborators and identity for one save.
pub struct SaveContext<'a> {
    pub session: Option<&'a Session>,
    pub api: &'a dyn BlogApi,
    pub storage: &'a dyn Storage,
    pub flags: &'a dyn FlagStore,
}

/// Hashtag attachment left to run after a post was created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashtagFollowUp {
    pub post_id: PostId,
    pub hash_tag: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SaveOutcome {
    pub notices: Vec<Notice>,
    pub navigate: Option<Destination>,
    pub created: Option<PersistedPost>,
    /// Run with [`attach_hashtags`] once notices and navigation are applied.
    pub follow_up: Option<HashtagFollowUp>,
}

impl SaveOutcome {
    fn notice(notice: Notice) -> Self {
        Self {
            notices: vec![notice],
            ..Self::default()
        }
    }

    fn silent() -> Self {
        Self::default()
    }
}

pub async fn run_save(
    ctx: &SaveContext<'_>,
    draft: &Draft,
    mode: SaveMode<'_>,
    now: DateTime<Utc>,
) -> SaveOutcome {
    if draft.validate().is_err() {
        return SaveOutcome::notice(Notice::DraftIncomplete);
    }

    match mode {
        SaveMode::CreateDraft => save_temporary(ctx, draft).await,
        SaveMode::CreateFinal => save_final(ctx, draft, now).await,
        SaveMode::Modify(updater) => modify(ctx, draft, updater).await,
    }
}

async fn save_temporary(ctx: &SaveContext<'_>, draft: &Draft) -> SaveOutcome {
    let Some(session) = ctx.session else {
        return SaveOutcome::notice(Notice::LoginRequired);
    };

    let mut guard = SavingGuard::begin(ctx.flags);
    match ctx
        .storage
        .upload_temporary(&temporary_blob(draft), &session.user_id)
        .await
    {
        Ok(url) => {
            info!("Temporary draft saved to {}", url);
            guard.commit();
            SaveOutcome {
                navigate: Some(Destination::Home),
                ..SaveOutcome::default()
            }
        }
        Err(e) => {
            error!("Temporary save failed: {}", e);
            SaveOutcome::silent()
        }
    }
}

async fn save_final(ctx: &SaveContext<'_>, draft: &Draft, now: DateTime<Utc>) -> SaveOutcome {
    let Some(session) = ctx.session.filter(|s| s.has_token()) else {
        return SaveOutcome::notice(Notice::LoginRequired);
    };
    let owner = session.user_id.as_str();

    let mut guard = SavingGuard::begin(ctx.flags);

    let post_url = match ctx.storage.upload_final(&final_artifact(draft, now), owner).await {
        Ok(url) => url,
        Err(e) => {
            error!("Post artifact upload failed: {}", e);
            return SaveOutcome::notice(Notice::PostSaveFailed);
        }
    };

    let request = create_request(draft, &post_url);
    let created = match ctx.api.create_post(owner, &request).await {
        Ok(created) => created,
        Err(e) if e.is_search_index_failure() => {
            warn!("Post was not indexed for search: {}", e);
            return SaveOutcome::notice(Notice::PostSaveFailed);
        }
        Err(e) => {
            error!("Post creation failed: {}", e);
            return SaveOutcome::notice(Notice::PostSaveFailed);
        }
    };

    info!("Post {} created", created.post_id);
    guard.commit();
    drop(guard);

    SaveOutcome {
        notices: vec![Notice::PostSaved],
        navigate: Some(Destination::Blog(owner.to_string())),
        follow_up: (!request.hash_tag.is_empty()).then(|| HashtagFollowUp {
            post_id: created.post_id,
            hash_tag: request.hash_tag.clone(),
        }),
        created: Some(PersistedPost {
            post_id: created.post_id,
            title: request.title,
            post_url: request.post_url,
            thumbnail_url: request.thumbnail_url,
            hash_tag: request.hash_tag,
        }),
    }
}

/// Best effort: the post exists either way, so failures are only logged.
pub async fn attach_hashtags(api: &dyn BlogApi, follow_up: &HashtagFollowUp) {
    match api
        .attach_post_hashtags(follow_up.post_id, &follow_up.hash_tag)
        .await
    {
        Ok(()) => debug!("Hashtags attached to post {}", follow_up.post_id),
        Err(e) => warn!("Hashtags for post {} not saved: {}", follow_up.post_id, e),
    }
}

async fn modify(
    ctx: &SaveContext<'_>,
    draft: &Draft,
    updater: &dyn PostUpdater,
) -> SaveOutcome {
    let mut guard = SavingGuard::begin(ctx.flags);
    guard.commit();

    let post = ModifiedPost {
        title: draft.title.clone(),
        content_html: draft.content.to_html(),
        thumbnail_url: draft.thumbnail().to_string(),
        hash_tag: normalize_hashtags(&draft.hash_tag),
    };
    let result = updater.update(post).await;
    drop(guard);

    match result {
        Ok(()) => SaveOutcome {
            notices: vec![Notice::PostUpdated],
            navigate: ctx
                .session
                .map(|session| Destination::Blog(session.user_id.clone())),
            ..SaveOutcome::default()
        },
        Err(e) => {
            error!("Post update failed: {}", e);
            SaveOutcome::notice(Notice::PostUpdateFailed)
        }
    }
}

/// Upload an image picked in the editor; `None` leaves the document as is.
pub async fn upload_image(
    storage: &dyn Storage,
    session: Option<&Session>,
    file: &UploadFile,
) -> Option<String> {
    let Some(session) = session else {
        warn!("Image upload skipped: no user session");
        return None;
    };
    match storage.upload(file, &session.user_id).await {
        Ok(url) => Some(url),
        Err(e) => {
            error!("Image upload failed for {}: {}", file.name, e);
            None
        }
    }
}

/// Read back the user's temporary draft.
pub async fn restore_temporary(storage: &dyn Storage, session: Option<&Session>) -> Option<Draft> {
    let session = session?;
    let blob = match storage.load_temporary(&session.user_id).await {
        Ok(Some(blob)) => blob,
        Ok(None) => {
            debug!("No temporary draft for {}", session.user_id);
            return None;
        }
        Err(e) => {
            error!("Loading temporary draft failed: {}", e);
            return None;
        }
    };
    match draft_from_blob(&blob) {
        Ok(draft) => Some(draft),
        Err(e) => {
            warn!("Temporary draft is unreadable: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use futures::executor::block_on;
    use futures::FutureExt;
    use shared_types::{
        CreatePostRequest, CreatePostResponse, MusicId, MusicRequest, UpdatePostRequest,
    };

    use super::*;
    use crate::components::editor::document::Document;
    use crate::components::editor::types::EditFlags;
    use crate::storage::StorageError;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        CreatePost(String, CreatePostRequest),
        UpdatePost(PostId, UpdatePostRequest),
        PostHashtags(PostId, String),
        UploadFinal(String, String),
        UploadTemporary(String),
    }

    #[derive(Default)]
    struct Fakes {
        calls: RefCell<Vec<Call>>,
        create_result: RefCell<Option<Result<CreatePostResponse, ApiError>>>,
        fail_uploads: Cell<bool>,
        /// Hashtag attachment never answers.
        hang_hashtags: Cell<bool>,
    }

    impl Fakes {
        fn created(post_id: PostId) -> Self {
            let fakes = Self::default();
            *fakes.create_result.borrow_mut() = Some(Ok(CreatePostResponse { post_id }));
            fakes
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }
    }

    #[async_trait(?Send)]
    impl BlogApi for Fakes {
        async fn create_post(
            &self,
            owner_id: &str,
            request: &CreatePostRequest,
        ) -> Result<CreatePostResponse, ApiError> {
            self.calls
                .borrow_mut()
                .push(Call::CreatePost(owner_id.to_string(), request.clone()));
            self.create_result
                .borrow()
                .clone()
                .unwrap_or(Err(ApiError::Transport("offline".to_string())))
        }

        async fn update_post(
            &self,
            post_id: PostId,
            request: &UpdatePostRequest,
        ) -> Result<(), ApiError> {
            self.calls
                .borrow_mut()
                .push(Call::UpdatePost(post_id, request.clone()));
            Ok(())
        }

        async fn attach_post_hashtags(&self, post_id: PostId, hash_tag: &str) -> Result<(), ApiError> {
            if self.hang_hashtags.get() {
                futures::future::pending::<()>().await;
            }
            self.calls
                .borrow_mut()
                .push(Call::PostHashtags(post_id, hash_tag.to_string()));
            Err(ApiError::rejected(500, None))
        }

        async fn save_music(
            &self,
            _post_id: PostId,
            _request: &MusicRequest,
        ) -> Result<Option<MusicId>, ApiError> {
            unreachable!("editor never saves music")
        }

        async fn update_music(&self, _post_id: PostId, _request: &MusicRequest) -> Result<(), ApiError> {
            unreachable!("editor never updates music")
        }

        async fn attach_music_hashtags(
            &self,
            _music_id: MusicId,
            _hash_tag: &str,
        ) -> Result<(), ApiError> {
            unreachable!("editor never tags music")
        }

        async fn trending_hashtags(&self) -> Result<Vec<String>, ApiError> {
            Ok(Vec::new())
        }
    }

    #[async_trait(?Send)]
    impl Storage for Fakes {
        async fn upload(&self, file: &UploadFile, owner_id: &str) -> Result<String, StorageError> {
            if self.fail_uploads.get() {
                return Err(StorageError::Rejected { status: 503 });
            }
            Ok(format!("https://s/images/{owner_id}/{}", file.name))
        }

        async fn upload_temporary(&self, blob: &str, owner_id: &str) -> Result<String, StorageError> {
            if self.fail_uploads.get() {
                return Err(StorageError::Transport("offline".to_string()));
            }
            self.calls
                .borrow_mut()
                .push(Call::UploadTemporary(blob.to_string()));
            Ok(format!("https://s/temp/{owner_id}/draft.json"))
        }

        async fn upload_final(
            &self,
            artifact: &UploadFile,
            owner_id: &str,
        ) -> Result<String, StorageError> {
            if self.fail_uploads.get() {
                return Err(StorageError::Rejected { status: 500 });
            }
            self.calls.borrow_mut().push(Call::UploadFinal(
                owner_id.to_string(),
                artifact.name.clone(),
            ));
            Ok(format!("https://s/posts/{owner_id}/{}", artifact.name))
        }

        async fn load_temporary(&self, _owner_id: &str) -> Result<Option<String>, StorageError> {
            Ok(self
                .calls
                .borrow()
                .iter()
                .rev()
                .find_map(|call| match call {
                    Call::UploadTemporary(blob) => Some(blob.clone()),
                    _ => None,
                }))
        }
    }

    struct FailingUpdater;

    #[async_trait(?Send)]
    impl PostUpdater for FailingUpdater {
        async fn update(&self, _post: ModifiedPost) -> Result<(), ApiError> {
            Err(ApiError::rejected(500, Some("SP1")))
        }
    }

    fn session() -> Session {
        Session::new("u1", Some("token".to_string()))
    }

    fn draft(title: &str, body: &str, tags: &str) -> Draft {
        let mut content = Document::new();
        content.insert_text(0, body);
        Draft {
            title: title.to_string(),
            content,
            thumbnail_url: None,
            hash_tag: tags.to_string(),
        }
    }

    fn dirty() -> Cell<EditFlags> {
        Cell::new(EditFlags {
            dirty: true,
            saving: false,
        })
    }

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-05-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn final_save_creates_post_and_attaches_hashtags() {
        let fakes = Fakes::created(42);
        let session = session();
        let flags = dirty();
        let ctx = SaveContext {
            session: Some(&session),
            api: &fakes,
            storage: &fakes,
            flags: &flags,
        };
        let body = "x".repeat(49);
        assert_eq!(draft("My Day", &body, "jazz calm").content.length(), 50);

        let outcome = block_on(run_save(
            &ctx,
            &draft("My Day", &body, "  jazz   calm "),
            SaveMode::CreateFinal,
            now(),
        ));

        assert_eq!(outcome.notices, vec![Notice::PostSaved]);
        assert_eq!(outcome.navigate, Some(Destination::Blog("u1".to_string())));
        assert_eq!(outcome.created.as_ref().map(|p| p.post_id), Some(42));
        assert_eq!(flags.get(), EditFlags::default());
        assert_eq!(fakes.calls().len(), 2);

        let follow_up = outcome.follow_up.expect("tags were given");
        block_on(attach_hashtags(&fakes, &follow_up));

        let calls = fakes.calls();
        assert_eq!(calls.len(), 3);
        assert!(matches!(&calls[0], Call::UploadFinal(owner, name)
            if owner == "u1" && name.starts_with("my_day_")));
        match &calls[1] {
            Call::CreatePost(owner, request) => {
                assert_eq!(owner, "u1");
                assert_eq!(request.hash_tag, "jazz calm");
                assert!(request.post_url.starts_with("https://s/posts/u1/my_day_"));
            }
            other => panic!("unexpected call {other:?}"),
        }
        assert_eq!(calls[2], Call::PostHashtags(42, "jazz calm".to_string()));
    }

    #[test]
    fn blank_tag_line_skips_hashtag_call() {
        let fakes = Fakes::created(7);
        let session = session();
        let flags = dirty();
        let ctx = SaveContext {
            session: Some(&session),
            api: &fakes,
            storage: &fakes,
            flags: &flags,
        };

        let outcome = block_on(run_save(&ctx, &draft("t", "body", "   "), SaveMode::CreateFinal, now()));

        assert_eq!(outcome.notices, vec![Notice::PostSaved]);
        assert_eq!(outcome.follow_up, None);
        assert!(!fakes
            .calls()
            .iter()
            .any(|call| matches!(call, Call::PostHashtags(..))));
    }

    #[test]
    fn slow_hashtag_call_does_not_hold_back_the_save() {
        let fakes = Fakes::created(42);
        fakes.hang_hashtags.set(true);
        let session = session();
        let flags = dirty();
        let ctx = SaveContext {
            session: Some(&session),
            api: &fakes,
            storage: &fakes,
            flags: &flags,
        };

        let outcome = run_save(&ctx, &draft("My Day", "body", "jazz"), SaveMode::CreateFinal, now())
            .now_or_never()
            .expect("save finishes without waiting on hashtags");

        assert_eq!(outcome.notices, vec![Notice::PostSaved]);
        assert_eq!(outcome.navigate, Some(Destination::Blog("u1".to_string())));
        assert_eq!(
            outcome.follow_up,
            Some(HashtagFollowUp {
                post_id: 42,
                hash_tag: "jazz".to_string()
            })
        );
        assert!(attach_hashtags(&fakes, &outcome.follow_up.unwrap())
            .now_or_never()
            .is_none());
    }

    #[test]
    fn search_index_failure_reports_and_stays() {
        let fakes = Fakes::default();
        *fakes.create_result.borrow_mut() = Some(Err(ApiError::rejected(500, Some("CE1"))));
        let session = session();
        let flags = dirty();
        let ctx = SaveContext {
            session: Some(&session),
            api: &fakes,
            storage: &fakes,
            flags: &flags,
        };

        let outcome = block_on(run_save(&ctx, &draft("t", "body", "jazz"), SaveMode::CreateFinal, now()));

        assert_eq!(outcome.notices, vec![Notice::PostSaveFailed]);
        assert_eq!(outcome.navigate, None);
        assert_eq!(
            flags.get(),
            EditFlags {
                dirty: true,
                saving: false
            }
        );
        assert!(!fakes
            .calls()
            .iter()
            .any(|call| matches!(call, Call::PostHashtags(..))));
    }

    #[test]
    fn incomplete_draft_makes_no_calls() {
        let fakes = Fakes::created(1);
        let session = session();
        let flags = dirty();
        let ctx = SaveContext {
            session: Some(&session),
            api: &fakes,
            storage: &fakes,
            flags: &flags,
        };

        for (title, body) in [("", "body"), ("title", "")] {
            for mode in [SaveMode::CreateDraft, SaveMode::CreateFinal, SaveMode::Modify(&FailingUpdater)] {
                let outcome = block_on(run_save(&ctx, &draft(title, body, ""), mode, now()));
                assert_eq!(outcome.notices, vec![Notice::DraftIncomplete]);
            }
        }
        assert!(fakes.calls().is_empty());
        assert!(flags.get().dirty);
    }

    #[test]
    fn final_save_without_token_asks_for_login() {
        let fakes = Fakes::created(1);
        let session = Session::new("u1", None);
        let flags = dirty();
        let ctx = SaveContext {
            session: Some(&session),
            api: &fakes,
            storage: &fakes,
            flags: &flags,
        };

        let outcome = block_on(run_save(&ctx, &draft("t", "body", ""), SaveMode::CreateFinal, now()));
        assert_eq!(outcome.notices, vec![Notice::LoginRequired]);
        assert!(fakes.calls().is_empty());
    }

    #[test]
    fn failed_artifact_upload_skips_create() {
        let fakes = Fakes::created(1);
        fakes.fail_uploads.set(true);
        let session = session();
        let flags = dirty();
        let ctx = SaveContext {
            session: Some(&session),
            api: &fakes,
            storage: &fakes,
            flags: &flags,
        };

        let outcome = block_on(run_save(&ctx, &draft("t", "body", ""), SaveMode::CreateFinal, now()));
        assert_eq!(outcome.notices, vec![Notice::PostSaveFailed]);
        assert!(fakes.calls().is_empty());
        assert!(!flags.get().saving);
    }

    #[test]
    fn modify_clears_flags_even_when_update_fails() {
        let fakes = Fakes::default();
        let session = session();
        let flags = dirty();
        let ctx = SaveContext {
            session: Some(&session),
            api: &fakes,
            storage: &fakes,
            flags: &flags,
        };

        let outcome = block_on(run_save(
            &ctx,
            &draft("t", "body", ""),
            SaveMode::Modify(&FailingUpdater),
            now(),
        ));

        assert_eq!(outcome.notices, vec![Notice::PostUpdateFailed]);
        assert_eq!(outcome.navigate, None);
        assert_eq!(flags.get(), EditFlags::default());
    }

    #[test]
    fn modify_through_api_puts_rendered_post() {
        let fakes = Fakes::default();
        let session = session();
        let flags = dirty();
        let ctx = SaveContext {
            session: Some(&session),
            api: &fakes,
            storage: &fakes,
            flags: &flags,
        };
        let updater = ApiPostUpdater {
            api: &fakes,
            post_id: 9,
        };

        let outcome = block_on(run_save(
            &ctx,
            &draft("New title", "edited", " a  b "),
            SaveMode::Modify(&updater),
            now(),
        ));

        assert_eq!(outcome.notices, vec![Notice::PostUpdated]);
        assert_eq!(outcome.navigate, Some(Destination::Blog("u1".to_string())));
        assert_eq!(
            fakes.calls(),
            vec![Call::UpdatePost(
                9,
                UpdatePostRequest {
                    title: "New title".to_string(),
                    content: "<p>edited</p>".to_string(),
                    thumbnail_url: String::new(),
                    hash_tag: "a b".to_string(),
                }
            )]
        );
    }

    #[test]
    fn temporary_save_goes_home_and_can_be_restored() {
        let fakes = Fakes::default();
        let session = session();
        let flags = dirty();
        let ctx = SaveContext {
            session: Some(&session),
            api: &fakes,
            storage: &fakes,
            flags: &flags,
        };
        let original = draft("Later", "half written", "indie");

        let outcome = block_on(run_save(&ctx, &original, SaveMode::CreateDraft, now()));
        assert_eq!(outcome.navigate, Some(Destination::Home));
        assert!(outcome.notices.is_empty());

        let restored = block_on(restore_temporary(&fakes, Some(&session)));
        assert_eq!(restored, Some(original));
    }

    #[test]
    fn failed_temporary_save_is_silent() {
        let fakes = Fakes::default();
        fakes.fail_uploads.set(true);
        let session = session();
        let flags = dirty();
        let ctx = SaveContext {
            session: Some(&session),
            api: &fakes,
            storage: &fakes,
            flags: &flags,
        };

        let outcome = block_on(run_save(&ctx, &draft("t", "body", ""), SaveMode::CreateDraft, now()));
        assert_eq!(outcome, SaveOutcome::default());
        assert!(flags.get().dirty);
    }

    #[test]
    fn failed_image_upload_returns_nothing() {
        let fakes = Fakes::default();
        let session = session();
        let file = UploadFile {
            name: "a.png".to_string(),
            content_type: "image/png".to_string(),
            bytes: vec![1, 2, 3],
        };

        assert_eq!(
            block_on(upload_image(&fakes, Some(&session), &file)).as_deref(),
            Some("https://s/images/u1/a.png")
        );
        fakes.fail_uploads.set(true);
        assert_eq!(block_on(upload_image(&fakes, Some(&session), &file)), None);
        assert_eq!(block_on(upload_image(&fakes, None, &file)), None);
    }
}
