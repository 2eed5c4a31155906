//! Post editor
//!
//! Rich-text post writing with image upload, temporary save, final save
//! and modify. The document model lives in [`document`]; the network steps
//! in [`workflow`].

pub mod document;
pub mod logic;
pub mod styles;
pub mod types;
pub mod view;
pub mod workflow;

pub use types::Draft;
pub use view::PostEditor;
