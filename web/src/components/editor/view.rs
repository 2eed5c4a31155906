//! PostEditor component

use chrono::Utc;
use dioxus::core::spawn_forever;
use dioxus::prelude::*;
use dioxus_logger::tracing::info;
use gloo_timers::future::TimeoutFuture;
use shared_types::PostId;

use crate::api::HttpBlogApi;
use crate::auth::use_auth;
use crate::interop::{pick_file, textarea_selection, BeforeUnloadGuard, PopStateGuard};
use crate::notice::{show_notices, Notice};
use crate::router::{navigate_to, LEAVE_PROMPT};
use crate::state::{record_post, EDITOR_EXIT_GUARD};
use crate::storage::HttpStorage;

use super::styles::EDITOR_STYLES;
use super::types::{Draft, EditFlags, SaveStatus};
use super::workflow::{
    attach_hashtags, restore_temporary, run_save, upload_image, ApiPostUpdater, SaveContext,
    SaveMode,
};

const TEXTAREA_ID: &str = "post-editor-body";

#[derive(Debug, Clone, Copy, PartialEq)]
enum SaveKind {
    Temporary,
    Final,
    Modify,
}

/// Create page when `post_id` is `None`, modify page otherwise.
#[component]
pub fn PostEditor(
    #[props(!optional)] post_id: Option<PostId>,
    #[props(!optional)] initial: Option<Draft>,
) -> Element {
    let auth = use_auth();
    let mut draft = use_signal(|| initial.clone().unwrap_or_default());
    let mut flags = use_signal(EditFlags::default);
    let mut status = use_signal(|| SaveStatus::Idle);
    let mut previewing = use_signal(|| false);
    let mut unload_guard: Signal<Option<BeforeUnloadGuard>> = use_signal(|| None);
    let mut history_guard: Signal<Option<PopStateGuard>> = use_signal(|| None);

    let is_create_page = post_id.is_none();

    // Exit guard follows dirty && !saving.
    use_effect(move || {
        let guarding = flags().guards_exit();
        *EDITOR_EXIT_GUARD.write() = guarding;
        let installed = unload_guard.peek().is_some();
        if guarding && !installed {
            unload_guard.set(BeforeUnloadGuard::install());
            history_guard.set(PopStateGuard::install(LEAVE_PROMPT));
        } else if !guarding && installed {
            unload_guard.set(None);
            history_guard.set(None);
        }
    });
    use_drop(move || {
        *EDITOR_EXIT_GUARD.write() = false;
    });

    let save = move |kind: SaveKind| {
        if flags.peek().saving {
            return;
        }
        spawn(async move {
            let session = auth.peek().session().cloned();
            let api = HttpBlogApi::new(session.as_ref());
            let storage = HttpStorage::default();
            let ctx = SaveContext {
                session: session.as_ref(),
                api: &api,
                storage: &storage,
                flags: &flags,
            };
            let updater = post_id.map(|post_id| ApiPostUpdater { api: &api, post_id });
            let mode = match (kind, updater.as_ref()) {
                (SaveKind::Temporary, _) => SaveMode::CreateDraft,
                (SaveKind::Final, _) => SaveMode::CreateFinal,
                (SaveKind::Modify, Some(updater)) => SaveMode::Modify(updater),
                (SaveKind::Modify, None) => return,
            };

            status.set(SaveStatus::Saving);
            let snapshot = draft.peek().clone();
            let outcome = run_save(&ctx, &snapshot, mode, Utc::now()).await;

            if let Some(post) = outcome.created.clone() {
                record_post(post);
            }
            let failed = outcome
                .notices
                .iter()
                .any(|n| matches!(n, Notice::PostSaveFailed | Notice::PostUpdateFailed));
            status.set(if failed {
                SaveStatus::Failed("Save failed".to_string())
            } else if outcome.navigate.is_some() {
                SaveStatus::Saved
            } else {
                SaveStatus::Idle
            });

            show_notices(&outcome.notices);
            if let Some(destination) = outcome.navigate.as_ref() {
                *EDITOR_EXIT_GUARD.write() = false;
                navigate_to(destination);
                // Root scope: outlives this editor after the route change.
                if let Some(follow_up) = outcome.follow_up.clone() {
                    let session = session.clone();
                    spawn_forever(async move {
                        let api = HttpBlogApi::new(session.as_ref());
                        attach_hashtags(&api, &follow_up).await;
                    });
                }
                return;
            }

            TimeoutFuture::new(2_000).await;
            if matches!(*status.peek(), SaveStatus::Failed(_)) {
                status.set(SaveStatus::Idle);
            }
        });
    };

    let insert_image = move |_| {
        let selection = textarea_selection(TEXTAREA_ID);
        spawn(async move {
            let Some(file) = pick_file("image/*").await else {
                return;
            };
            let session = auth.peek().session().cloned();
            let storage = HttpStorage::default();
            let Some(url) = upload_image(&storage, session.as_ref(), &file).await else {
                return;
            };
            {
                let mut draft = draft.write();
                let index = selection
                    .map(|(start, _)| start)
                    .unwrap_or_else(|| draft.content.length() - 1);
                draft.content.insert_image(index, &url);
            }
            flags.write().dirty = true;
        });
    };

    let pick_thumbnail = move |_| {
        spawn(async move {
            let Some(file) = pick_file("image/*").await else {
                return;
            };
            let session = auth.peek().session().cloned();
            let storage = HttpStorage::default();
            if let Some(url) = upload_image(&storage, session.as_ref(), &file).await {
                draft.write().thumbnail_url = Some(url);
            }
        });
    };

    let load_temporary = move |_| {
        spawn(async move {
            let session = auth.peek().session().cloned();
            let storage = HttpStorage::default();
            match restore_temporary(&storage, session.as_ref()).await {
                Some(restored) => {
                    info!("Restored temporary draft '{}'", restored.title);
                    draft.set(restored);
                    flags.write().dirty = false;
                }
                None => show_notices(&[Notice::TemporaryDraftMissing]),
            }
        });
    };

    let mut toggle_inline = move |key: &'static str| {
        let Some((start, end)) = textarea_selection(TEXTAREA_ID) else {
            return;
        };
        if end > start && draft.write().content.toggle_inline(start, end - start, key) {
            flags.write().dirty = true;
        }
    };

    let mut set_header = move |level: Option<u8>| {
        let Some((start, _)) = textarea_selection(TEXTAREA_ID) else {
            return;
        };
        draft.write().content.set_line_header(start, level);
        flags.write().dirty = true;
    };

    let current = draft.read();
    let body_text = current.content.plain_text();
    let preview_html = current.content.to_html();
    let title = current.title.clone();
    let hash_tag = current.hash_tag.clone();
    let thumbnail = current.thumbnail_url.clone();
    drop(current);

    let saving = flags().saving;
    let (status_text, status_class) = match status() {
        SaveStatus::Idle => (String::new(), ""),
        SaveStatus::Saving => ("Saving...".to_string(), ""),
        SaveStatus::Saved => ("Saved".to_string(), ""),
        SaveStatus::Failed(msg) => (msg, "editor-status--failed"),
    };

    rsx! {
        style { {EDITOR_STYLES} }
        div {
            class: "editor-page",

            input {
                class: "editor-title-input",
                placeholder: "Title",
                value: "{title}",
                oninput: move |evt| draft.write().title = evt.value(),
            }

            div {
                class: "editor-toolbar",
                button { class: "editor-toolbar-btn", onclick: move |_| set_header(Some(2)), "H2" }
                button { class: "editor-toolbar-btn", onclick: move |_| set_header(Some(3)), "H3" }
                button { class: "editor-toolbar-btn", onclick: move |_| set_header(None), "¶" }
                button { class: "editor-toolbar-btn", onclick: move |_| toggle_inline("bold"), b { "B" } }
                button { class: "editor-toolbar-btn", onclick: move |_| toggle_inline("italic"), i { "I" } }
                button { class: "editor-toolbar-btn", onclick: move |_| toggle_inline("underline"), u { "U" } }
                button { class: "editor-toolbar-btn", onclick: move |_| toggle_inline("strike"), s { "S" } }
                button { class: "editor-toolbar-btn", onclick: insert_image, "Image" }
                span { class: "editor-toolbar-spacer" }
                button {
                    class: if previewing() { "editor-toolbar-btn active" } else { "editor-toolbar-btn" },
                    onclick: move |_| previewing.toggle(),
                    "Preview"
                }
            }

            if previewing() {
                div {
                    class: "editor-preview",
                    dangerous_inner_html: "{preview_html}",
                }
            } else {
                textarea {
                    id: TEXTAREA_ID,
                    class: "editor-textarea",
                    placeholder: "Write your story...",
                    value: "{body_text}",
                    oninput: move |evt| {
                        if draft.write().content.apply_text_edit(&evt.value()) {
                            flags.write().dirty = true;
                        }
                    },
                }
            }

            div {
                class: "editor-thumbnail",
                if let Some(url) = thumbnail {
                    img { src: "{url}", alt: "Thumbnail" }
                }
                button {
                    class: "editor-action-btn secondary",
                    onclick: pick_thumbnail,
                    "Choose thumbnail"
                }
            }

            input {
                class: "editor-hashtag-input",
                placeholder: "Hashtags, separated by spaces",
                value: "{hash_tag}",
                oninput: move |evt| draft.write().hash_tag = evt.value(),
            }

            div {
                class: "editor-actions",
                span { class: "editor-status {status_class}", "{status_text}" }
                if is_create_page {
                    button {
                        class: "editor-action-btn secondary",
                        disabled: saving,
                        onclick: load_temporary,
                        "Load temporary"
                    }
                    button {
                        class: "editor-action-btn secondary",
                        disabled: saving,
                        onclick: move |_| save(SaveKind::Temporary),
                        "Temporary save"
                    }
                    button {
                        class: "editor-action-btn",
                        disabled: saving,
                        onclick: move |_| save(SaveKind::Final),
                        "Save"
                    }
                } else {
                    button {
                        class: "editor-action-btn",
                        disabled: saving,
                        onclick: move |_| save(SaveKind::Modify),
                        "Modify"
                    }
                }
            }
        }
    }
}
