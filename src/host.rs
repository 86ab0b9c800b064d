//! Capability traits the host calls into.
//!
//! An extension implements the subset it supports; the host only asks for
//! what each trait declares.

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{PlayableSource, QuickSearchItem, Shelf, Tab, Track};

/// Lifecycle hooks common to every extension.
#[async_trait]
pub trait ExtensionClient: Send + Sync {
    /// Short lowercase extension name (e.g., `"kisskh"`).
    fn name(&self) -> &'static str;

    /// Called when the user switches to this extension.
    async fn on_extension_selected(&self) -> Result<()> {
        Ok(())
    }
}

/// Home page shelves, one page per tab.
#[async_trait]
pub trait HomeFeedClient: ExtensionClient {
    async fn home_tabs(&self) -> Result<Vec<Tab>>;

    async fn home_feed(&self, tab: Option<&Tab>) -> Result<Vec<Shelf>>;
}

/// Full and as-you-type search.
#[async_trait]
pub trait SearchFeedClient: ExtensionClient {
    async fn search_tabs(&self, query: &str) -> Result<Vec<Tab>>;

    /// Blank queries yield no shelves.
    async fn search_feed(&self, query: &str, tab: Option<&Tab>) -> Result<Vec<Shelf>>;

    async fn quick_search(&self, query: &str) -> Result<Vec<QuickSearchItem>>;

    /// Forget a history entry. Returns `Ok(())` by default.
    async fn delete_quick_search(&self, _item: &QuickSearchItem) -> Result<()> {
        Ok(())
    }
}

/// Track details and playback.
#[async_trait]
pub trait TrackClient: ExtensionClient {
    async fn load_track(&self, track: &Track) -> Result<Track>;

    /// Ordered, non-empty playable sources for an episode.
    async fn load_streamable_media(&self, episode_id: &str) -> Result<Vec<PlayableSource>>;

    /// Shelves shown under a track. Returns an empty vec by default.
    async fn related_shelves(&self, _track: &Track) -> Result<Vec<Shelf>> {
        Ok(vec![])
    }
}
