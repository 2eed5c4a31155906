use dioxus_logger::tracing::error;
use js_sys::Array;
use shared_types::visible_hashtags;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::api::BlogApi;

/// Visible share of a section at which it becomes active.
pub const ACTIVE_RATIO: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SectionId {
    #[default]
    Home,
    MusicRecommendation,
    NewPosts,
}

impl SectionId {
    pub const ALL: [SectionId; 3] = [
        SectionId::Home,
        SectionId::MusicRecommendation,
        SectionId::NewPosts,
    ];

    pub fn element_id(&self) -> &'static str {
        match self {
            SectionId::Home => "landing-home",
            SectionId::MusicRecommendation => "landing-music",
            SectionId::NewPosts => "landing-new-posts",
        }
    }

    pub fn from_element_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.element_id() == id)
    }

    pub fn label(&self) -> &'static str {
        match self {
            SectionId::Home => "Home",
            SectionId::MusicRecommendation => "Music recommendation",
            SectionId::NewPosts => "New posts",
        }
    }
}

/// One intersection entry, reduced to what the dot nav needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionReading {
    pub section: SectionId,
    pub ratio: f64,
    pub intersecting: bool,
}

/// Apply a batch of readings in delivery order; the last qualifying
/// reading wins and nothing qualifying keeps `current`.
pub fn next_active(current: SectionId, readings: &[SectionReading]) -> SectionId {
    readings
        .iter()
        .filter(|r| r.intersecting && r.ratio >= ACTIVE_RATIO)
        .last()
        .map(|r| r.section)
        .unwrap_or(current)
}

// ── Observer runtime ─────────────────────────────────────────────────────────

/// Watches the landing sections while alive.
pub struct SectionObserver {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl SectionObserver {
    pub fn observe(mut on_readings: impl FnMut(Vec<SectionReading>) + 'static) -> Option<Self> {
        let document = web_sys::window()?.document()?;

        let callback = Closure::wrap(Box::new(move |entries: Array, _: IntersectionObserver| {
            let readings = entries
                .iter()
                .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                .filter_map(|entry| {
                    SectionId::from_element_id(&entry.target().id()).map(|section| SectionReading {
                        section,
                        ratio: entry.intersection_ratio(),
                        intersecting: entry.is_intersecting(),
                    })
                })
                .collect();
            on_readings(readings);
        }) as Box<dyn FnMut(Array, IntersectionObserver)>);

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(ACTIVE_RATIO));
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
                .ok()?;

        for section in SectionId::ALL {
            if let Some(element) = document.get_element_by_id(section.element_id()) {
                observer.observe(&element);
            }
        }

        Some(Self {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for SectionObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

// ── Trending hashtags ────────────────────────────────────────────────────────

/// Trending tags with blank entries removed; failures leave the list empty.
pub async fn load_trending(api: &dyn BlogApi) -> Vec<String> {
    match api.trending_hashtags().await {
        Ok(tags) => visible_hashtags(tags),
        Err(e) => {
            error!("Failed to fetch popular hashtags: {}", e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use futures::executor::block_on;
    use shared_types::{
        CreatePostRequest, CreatePostResponse, MusicId, MusicRequest, PostId, UpdatePostRequest,
    };

    use super::*;
    use crate::api::ApiError;

    struct Trending(Result<Vec<String>, ApiError>);

    #[async_trait(?Send)]
    impl BlogApi for Trending {
        async fn create_post(&self, _: &str, _: &CreatePostRequest) -> Result<CreatePostResponse, ApiError> {
            unreachable!()
        }
        async fn update_post(&self, _: PostId, _: &UpdatePostRequest) -> Result<(), ApiError> {
            unreachable!()
        }
        async fn attach_post_hashtags(&self, _: PostId, _: &str) -> Result<(), ApiError> {
            unreachable!()
        }
        async fn save_music(&self, _: PostId, _: &MusicRequest) -> Result<Option<MusicId>, ApiError> {
            unreachable!()
        }
        async fn update_music(&self, _: PostId, _: &MusicRequest) -> Result<(), ApiError> {
            unreachable!()
        }
        async fn attach_music_hashtags(&self, _: MusicId, _: &str) -> Result<(), ApiError> {
            unreachable!()
        }
        async fn trending_hashtags(&self) -> Result<Vec<String>, ApiError> {
            self.0.clone()
        }
    }

    fn reading(section: SectionId, ratio: f64) -> SectionReading {
        SectionReading {
            section,
            ratio,
            intersecting: ratio > 0.0,
        }
    }

    #[test]
    fn last_qualifying_reading_wins() {
        let readings = [
            reading(SectionId::MusicRecommendation, 0.7),
            reading(SectionId::Home, 0.3),
            reading(SectionId::NewPosts, 0.65),
        ];
        assert_eq!(next_active(SectionId::Home, &readings), SectionId::NewPosts);
    }

    #[test]
    fn partial_visibility_keeps_current() {
        let readings = [reading(SectionId::NewPosts, 0.59), reading(SectionId::Home, 0.0)];
        assert_eq!(
            next_active(SectionId::MusicRecommendation, &readings),
            SectionId::MusicRecommendation
        );
    }

    #[test]
    fn element_ids_round_trip() {
        for section in SectionId::ALL {
            assert_eq!(SectionId::from_element_id(section.element_id()), Some(section));
        }
        assert_eq!(SectionId::from_element_id("footer"), None);
    }

    #[test]
    fn blank_trending_tags_are_dropped() {
        let api = Trending(Ok(vec!["".to_string(), "music".to_string(), " ".to_string()]));
        assert_eq!(block_on(load_trending(&api)), vec!["music".to_string()]);
    }

    #[test]
    fn failed_trending_fetch_is_empty() {
        let api = Trending(Err(ApiError::Transport("offline".to_string())));
        assert!(block_on(load_trending(&api)).is_empty());
    }
}
