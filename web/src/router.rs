use dioxus::prelude::*;
use shared_types::{MediaResult, PostId};

use crate::pages::{EditPost, Home, MyBlog, Playlist, SongResult, Write};
use crate::state::{stage_media_result, EDITOR_EXIT_GUARD};

pub const LEAVE_PROMPT: &str = "Leave this page? You have unsaved writing.";

#[derive(Routable, Clone, PartialEq, Debug)]
#[rustfmt::skip]
pub enum Route {
    #[route("/")]
    Home {},
    #[route("/write")]
    Write {},
    #[route("/post/:post_id/edit")]
    EditPost { post_id: PostId },
    #[route("/song/result")]
    SongResult {},
    #[route("/user/:uid/blog")]
    MyBlog { uid: String },
    #[route("/user/:uid/playlist")]
    Playlist { uid: String },
}

/// Where a finished workflow sends the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Home,
    Blog(String),
    Playlist(String),
}

impl Destination {
    pub fn route(&self) -> Route {
        match self {
            Destination::Home => Route::Home {},
            Destination::Blog(uid) => Route::MyBlog { uid: uid.clone() },
            Destination::Playlist(uid) => Route::Playlist { uid: uid.clone() },
        }
    }
}

/// Whether in-app navigation may leave the current page.
pub fn leave_confirmed() -> bool {
    !*EDITOR_EXIT_GUARD.read() || crate::interop::confirm(LEAVE_PROMPT)
}

/// Navigation started by the user; asks first while an editor is dirty.
pub fn navigate_guarded(route: Route) {
    if leave_confirmed() {
        navigator().push(route);
    }
}

/// Hand a generated song to the result screen and open it.
pub fn open_song_result(media: MediaResult) {
    stage_media_result(media);
    navigator().push(Route::SongResult {});
}

/// Navigation decided by a finished workflow.
pub fn navigate_to(destination: &Destination) {
    navigator().push(destination.route());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destinations_map_to_user_routes() {
        assert_eq!(
            Destination::Blog("u1".to_string()).route().to_string(),
            "/user/u1/blog"
        );
        assert_eq!(
            Destination::Playlist("u1".to_string()).route().to_string(),
            "/user/u1/playlist"
        );
        assert_eq!(Destination::Home.route().to_string(), "/");
    }

    #[test]
    fn edit_route_parses_post_id() {
        let route: Route = "/post/42/edit".parse().unwrap();
        assert_eq!(route, Route::EditPost { post_id: 42 });
    }
}
