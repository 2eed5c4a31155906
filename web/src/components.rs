pub mod blog;
pub mod editor;
pub mod landing;
pub mod song_result;

pub use blog::{MyBlogView, PlaylistView, PostCard, UserPanel};
pub use editor::PostEditor;
pub use landing::Landing;
pub use song_result::SongResultView;
