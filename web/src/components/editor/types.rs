//! Editor data types

use std::cell::Cell;

use dioxus::prelude::*;
use validator::{Validate, ValidationError};

use super::document::Document;

/// Form state of the post being written.
#[derive(Debug, Clone, PartialEq, Default, Validate)]
pub struct Draft {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(custom(function = "validate_document"))]
    pub content: Document,
    pub thumbnail_url: Option<String>,
    pub hash_tag: String,
}

/// An empty document is a single empty line of length 1.
fn validate_document(document: &Document) -> Result<(), ValidationError> {
    if document.length() > 1 {
        Ok(())
    } else {
        Err(ValidationError::new("empty_document"))
    }
}

impl Draft {
    pub fn thumbnail(&self) -> &str {
        self.thumbnail_url.as_deref().unwrap_or_default()
    }
}

/// Unsaved-changes and in-flight flags of one editor instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EditFlags {
    pub dirty: bool,
    pub saving: bool,
}

impl EditFlags {
    /// Leaving the page should be confirmed.
    pub fn guards_exit(&self) -> bool {
        self.dirty && !self.saving
    }
}

/// Where the save workflow reads and writes the editor's flags.
pub trait FlagStore {
    fn get(&self) -> EditFlags;
    fn put(&self, flags: EditFlags);
}

impl FlagStore for Cell<EditFlags> {
    fn get(&self) -> EditFlags {
        Cell::get(self)
    }

    fn put(&self, flags: EditFlags) {
        self.set(flags);
    }
}

impl FlagStore for Signal<EditFlags> {
    fn get(&self) -> EditFlags {
        *self.peek()
    }

    fn put(&self, flags: EditFlags) {
        let mut signal = *self;
        signal.set(flags);
    }
}

/// Holds `saving` up for its lifetime. Dropping it always clears `saving`,
/// and clears `dirty` too once [`SavingGuard::commit`] was called.
pub struct SavingGuard<'a> {
    store: &'a dyn FlagStore,
    clear_dirty: bool,
}

impl<'a> SavingGuard<'a> {
    pub fn begin(store: &'a dyn FlagStore) -> Self {
        let mut flags = store.get();
        flags.saving = true;
        store.put(flags);
        Self {
            store,
            clear_dirty: false,
        }
    }

    pub fn commit(&mut self) {
        self.clear_dirty = true;
    }
}

impl Drop for SavingGuard<'_> {
    fn drop(&mut self) {
        let mut flags = self.store.get();
        flags.saving = false;
        if self.clear_dirty {
            flags.dirty = false;
        }
        self.store.put(flags);
    }
}

/// Transient status line under the editor toolbar.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveStatus {
    Idle,
    Saving,
    /// Recently saved (show success briefly)
    Saved,
    Failed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str, body: &str) -> Draft {
        let mut content = Document::new();
        content.insert_text(0, body);
        Draft {
            title: title.to_string(),
            content,
            ..Draft::default()
        }
    }

    #[test]
    fn draft_needs_title_and_content() {
        assert!(draft("My Day", "hello").validate().is_ok());
        assert!(draft("", "hello").validate().is_err());
        assert!(draft("My Day", "").validate().is_err());
    }

    #[test]
    fn empty_content_reports_its_own_code() {
        let errors = draft("My Day", "").validate().unwrap_err();
        let fields = errors.field_errors();
        let content = fields["content"];
        assert_eq!(content[0].code, "empty_document");
    }

    #[test]
    fn guard_clears_saving_but_keeps_dirty_without_commit() {
        let store = Cell::new(EditFlags {
            dirty: true,
            saving: false,
        });
        {
            let _guard = SavingGuard::begin(&store);
            assert!(store.get().saving);
            assert!(!store.get().guards_exit());
        }
        assert_eq!(
            store.get(),
            EditFlags {
                dirty: true,
                saving: false
            }
        );
    }

    #[test]
    fn committed_guard_clears_both_flags() {
        let store = Cell::new(EditFlags {
            dirty: true,
            saving: false,
        });
        {
            let mut guard = SavingGuard::begin(&store);
            guard.commit();
        }
        assert_eq!(store.get(), EditFlags::default());
    }
}
