//! Catalog browsing, search and track details.
//!
//! Listing responses are mapped field by field (`id`, `title`, `thumbnail`);
//! everything else the site returns is ignored.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::api::Endpoints;
use crate::config::ExtensionConfig;
use crate::error::{Error, Result};
use crate::http::HttpTransport;
use crate::model::{json_text, MediaItem, QuickSearchItem, Shelf, Tab, Track};

pub const POPULAR_SHELF: &str = "Popular Dramas";
pub const SEARCH_SHELF: &str = "Search Results";

pub fn home_tabs() -> Vec<Tab> {
    vec![Tab::new("popular", "Popular"), Tab::new("latest", "Latest")]
}

pub fn search_tabs() -> Vec<Tab> {
    vec![
        Tab::new("all", "All"),
        Tab::new("drama", "Drama"),
        Tab::new("movie", "Movie"),
    ]
}

/// Page number encoded in a tab id; anything else means the first page.
pub fn page_for_tab(tab: Option<&Tab>) -> u32 {
    tab.and_then(|t| t.id.parse::<u32>().ok())
        .filter(|&page| page > 0)
        .unwrap_or(1)
}

/// Parse a `{"data": [...]}` listing page into the popular shelf.
pub fn parse_catalog_page(body: &str) -> Result<Shelf> {
    let json: Value = serde_json::from_str(body).map_err(|e| Error::api("catalog", e))?;
    let items: Vec<MediaItem> = json
        .get("data")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(MediaItem::from_json).collect())
        .unwrap_or_default();

    Ok(Shelf {
        title: POPULAR_SHELF.to_string(),
        items,
    })
}

/// Parse the top-level array returned by the search endpoint.
pub fn parse_search_results(body: &str) -> Result<Vec<MediaItem>> {
    let json: Value = serde_json::from_str(body).map_err(|e| Error::api("search", e))?;
    let items = json
        .as_array()
        .ok_or_else(|| Error::api("search", "expected a JSON array"))?;
    Ok(items.iter().filter_map(MediaItem::from_json).collect())
}

/// Overlay drama details onto `track`, keeping existing values where the
/// response is silent.
pub fn merge_track_details(body: &str, track: &Track) -> Result<Track> {
    let json: Value = serde_json::from_str(body).map_err(|e| Error::api("track", e))?;
    let text = |field: &str| json.get(field).and_then(json_text);

    Ok(Track {
        id: track.id.clone(),
        title: text("title").unwrap_or_else(|| track.title.clone()),
        thumbnail: text("thumbnail").or_else(|| track.thumbnail.clone()),
        description: text("description").or_else(|| track.description.clone()),
    })
}

/// Remote catalog for one configured site.
pub struct Catalog {
    transport: Arc<dyn HttpTransport>,
    endpoints: Endpoints,
}

impl Catalog {
    pub fn new(transport: Arc<dyn HttpTransport>, config: &ExtensionConfig) -> Self {
        Self {
            transport,
            endpoints: Endpoints::new(config),
        }
    }

    pub async fn home_feed(&self, tab: Option<&Tab>) -> Result<Vec<Shelf>> {
        let url = self.endpoints.catalog(page_for_tab(tab));
        let body = self.fetch("catalog", &url).await?;
        let shelf = parse_catalog_page(&body)?;
        debug!(items = shelf.items.len(), "Catalog page loaded");
        Ok(vec![shelf])
    }

    pub async fn search(&self, query: &str) -> Result<Vec<Shelf>> {
        if query.trim().is_empty() {
            return Ok(vec![]);
        }
        let items = self.search_items(query).await?;
        Ok(vec![Shelf {
            title: SEARCH_SHELF.to_string(),
            items,
        }])
    }

    pub async fn quick_search(&self, query: &str) -> Result<Vec<QuickSearchItem>> {
        if query.trim().is_empty() {
            return Ok(vec![]);
        }
        let items = self.search_items(query).await?;
        Ok(items
            .into_iter()
            .map(|item| QuickSearchItem {
                item,
                searched: false,
            })
            .collect())
    }

    pub async fn load_track(&self, track: &Track) -> Result<Track> {
        let url = self.endpoints.drama(&track.id);
        let response = self
            .transport
            .get(&url)
            .await
            .map_err(|e| Error::api("track", format!("{e:#}")))?;

        if !response.is_success() || response.body.trim().is_empty() {
            warn!(
                id = %track.id,
                status = response.status,
                "No drama details; keeping track as-is"
            );
            return Ok(track.clone());
        }
        merge_track_details(&response.body, track)
    }

    async fn search_items(&self, query: &str) -> Result<Vec<MediaItem>> {
        let url = self.endpoints.search(query.trim());
        let body = self.fetch("search", &url).await?;
        parse_search_results(&body)
    }

    async fn fetch(&self, endpoint: &'static str, url: &str) -> Result<String> {
        let response = self
            .transport
            .get(url)
            .await
            .map_err(|e| Error::api(endpoint, format!("{e:#}")))?;
        if !response.is_success() {
            return Err(Error::api(endpoint, format!("HTTP {}", response.status)));
        }
        Ok(response.body)
    }
}
