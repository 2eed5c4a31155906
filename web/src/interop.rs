use std::cell::RefCell;
use std::rc::Rc;

use futures::channel::oneshot;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    window, AddEventListenerOptions, BeforeUnloadEvent, Event, File, HtmlInputElement,
    HtmlTextAreaElement,
};

use crate::components::editor::document::char_index_from_utf16;
use crate::storage::UploadFile;

// ── Local storage ────────────────────────────────────────────────────────────

pub fn local_storage_get(key: &str) -> Option<String> {
    window()?.local_storage().ok()??.get_item(key).ok()?
}

pub fn local_storage_set(key: &str, value: &str) {
    if let Some(storage) = window().and_then(|w| w.local_storage().ok().flatten()) {
        let _ = storage.set_item(key, value);
    }
}

// ── Dialogs ──────────────────────────────────────────────────────────────────

pub fn alert(message: &str) {
    if let Some(window) = window() {
        let _ = window.alert_with_message(message);
    }
}

/// Blocking confirmation. Without a window there is nobody to ask, so the
/// answer is yes.
pub fn confirm(message: &str) -> bool {
    window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(true)
}

// ── Scrolling ────────────────────────────────────────────────────────────────

pub fn scroll_into_view_smooth(element_id: &str) {
    let Some(element) = window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(element_id))
    else {
        dioxus_logger::tracing::warn!("scroll target #{} not found", element_id);
        return;
    };
    let options = web_sys::ScrollIntoViewOptions::new();
    options.set_behavior(web_sys::ScrollBehavior::Smooth);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

// ── Textarea caret ───────────────────────────────────────────────────────────

/// Selection of the textarea with `id` as character indices `(start, end)`
/// into its value.
pub fn textarea_selection(id: &str) -> Option<(usize, usize)> {
    let textarea = window()?
        .document()?
        .get_element_by_id(id)?
        .dyn_into::<HtmlTextAreaElement>()
        .ok()?;
    let value = textarea.value();
    let start = textarea.selection_start().ok()??;
    let end = textarea.selection_end().ok()??;
    Some((
        char_index_from_utf16(&value, start as usize),
        char_index_from_utf16(&value, end as usize),
    ))
}

// ── File picker ──────────────────────────────────────────────────────────────

/// Open the browser file chooser and read the chosen file. Resolves to
/// `None` when the user cancels or the file cannot be read.
pub async fn pick_file(accept: &str) -> Option<UploadFile> {
    let document = window()?.document()?;
    let input = document
        .create_element("input")
        .ok()?
        .dyn_into::<HtmlInputElement>()
        .ok()?;
    input.set_type("file");
    input.set_accept(accept);

    let (tx, rx) = oneshot::channel::<Option<File>>();
    let tx = Rc::new(RefCell::new(Some(tx)));

    let on_change = {
        let tx = tx.clone();
        let input = input.clone();
        Closure::wrap(Box::new(move |_: Event| {
            let file = input.files().and_then(|files| files.get(0));
            if let Some(tx) = tx.borrow_mut().take() {
                let _ = tx.send(file);
            }
        }) as Box<dyn FnMut(Event)>)
    };
    let on_cancel = {
        let tx = tx.clone();
        Closure::wrap(Box::new(move |_: Event| {
            if let Some(tx) = tx.borrow_mut().take() {
                let _ = tx.send(None);
            }
        }) as Box<dyn FnMut(Event)>)
    };

    input
        .add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref())
        .ok()?;
    input
        .add_event_listener_with_callback("cancel", on_cancel.as_ref().unchecked_ref())
        .ok()?;
    input.click();

    let file = rx.await.ok().flatten();
    drop((on_change, on_cancel));
    read_file(file?).await
}

async fn read_file(file: File) -> Option<UploadFile> {
    let buffer = match JsFuture::from(file.array_buffer()).await {
        Ok(buffer) => buffer,
        Err(e) => {
            dioxus_logger::tracing::error!("Failed to read {}: {:?}", file.name(), e);
            return None;
        }
    };
    Some(UploadFile {
        name: file.name(),
        content_type: file.type_(),
        bytes: js_sys::Uint8Array::new(&buffer).to_vec(),
    })
}

// ── Unload guard ─────────────────────────────────────────────────────────────

/// Asks the browser to confirm leaving the page while alive.
pub struct BeforeUnloadGuard {
    window: web_sys::Window,
    _listener: Closure<dyn FnMut(BeforeUnloadEvent)>,
}

impl BeforeUnloadGuard {
    pub fn install() -> Option<Self> {
        let window = window()?;
        let listener = Closure::wrap(Box::new(|event: BeforeUnloadEvent| {
            event.prevent_default();
            event.set_return_value("");
        }) as Box<dyn FnMut(BeforeUnloadEvent)>);
        window
            .add_event_listener_with_callback("beforeunload", listener.as_ref().unchecked_ref())
            .ok()?;
        Some(Self {
            window,
            _listener: listener,
        })
    }
}

impl Drop for BeforeUnloadGuard {
    fn drop(&mut self) {
        let _ = self.window.remove_event_listener_with_callback(
            "beforeunload",
            self._listener.as_ref().unchecked_ref(),
        );
    }
}

// ── History guard ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryMove {
    /// Let the router follow the browser.
    Follow,
    /// Hide the move from the router and put the page URL back.
    Restore,
}

pub fn history_move(confirmed: bool) -> HistoryMove {
    if confirmed {
        HistoryMove::Follow
    } else {
        HistoryMove::Restore
    }
}

/// Asks before browser back/forward leaves the page while alive. Listens in
/// the capture phase so it runs ahead of the router's own `popstate`
/// listener and can stop a declined move from reaching it.
pub struct PopStateGuard {
    window: web_sys::Window,
    _listener: Closure<dyn FnMut(Event)>,
}

impl PopStateGuard {
    pub fn install(message: &'static str) -> Option<Self> {
        let window = window()?;
        let page_url = window.location().href().ok()?;
        let history = window.history().ok()?;

        let listener = Closure::wrap(Box::new(move |event: Event| {
            if history_move(confirm(message)) == HistoryMove::Follow {
                return;
            }
            event.stop_immediate_propagation();
            if let Err(e) = history.push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&page_url)) {
                dioxus_logger::tracing::warn!("Could not restore {}: {:?}", page_url, e);
            }
        }) as Box<dyn FnMut(Event)>);

        let options = AddEventListenerOptions::new();
        options.set_capture(true);
        window
            .add_event_listener_with_callback_and_add_event_listener_options(
                "popstate",
                listener.as_ref().unchecked_ref(),
                &options,
            )
            .ok()?;
        Some(Self {
            window,
            _listener: listener,
        })
    }
}

impl Drop for PopStateGuard {
    fn drop(&mut self) {
        let _ = self.window.remove_event_listener_with_callback_and_bool(
            "popstate",
            self._listener.as_ref().unchecked_ref(),
            true,
        );
    }
}

// ── Media ────────────────────────────────────────────────────────────────────

/// Play or pause the media element with `id`. Returns whether it exists.
pub fn set_media_playing(id: &str, playing: bool) -> bool {
    let Some(media) = window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(id))
        .and_then(|e| e.dyn_into::<web_sys::HtmlMediaElement>().ok())
    else {
        return false;
    };
    if playing {
        if let Err(e) = media.play() {
            dioxus_logger::tracing::warn!("Playback of #{} refused: {:?}", id, e);
        }
    } else {
        let _ = media.pause();
    }
    true
}
