//! The KissKH extension object handed to the host.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::api::Endpoints;
use crate::catalog::{self, Catalog};
use crate::config::ExtensionConfig;
use crate::error::Result;
use crate::host::{ExtensionClient, HomeFeedClient, SearchFeedClient, TrackClient};
use crate::http::{HttpTransport, ReqwestTransport};
use crate::model::{PlayableSource, QuickSearchItem, Shelf, Tab, Track};
use crate::stream::key::{fetch_key, AccessKey};
use crate::stream::StreamResolver;

/// Stateless between calls: every operation is its own request chain.
pub struct KissKhExtension {
    config: ExtensionConfig,
    transport: Arc<dyn HttpTransport>,
    catalog: Catalog,
    resolver: StreamResolver,
}

impl KissKhExtension {
    /// Build with the production `reqwest` transport.
    pub fn new(config: ExtensionConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let transport = Arc::new(ReqwestTransport::new(&config)?);
        Ok(Self::with_transport(config, transport)?)
    }

    /// Build around any transport.
    pub fn with_transport(
        config: ExtensionConfig,
        transport: Arc<dyn HttpTransport>,
    ) -> Result<Self> {
        config.validate()?;
        info!(base = %config.base(), "KissKH extension ready");
        Ok(Self {
            catalog: Catalog::new(transport.clone(), &config),
            resolver: StreamResolver::new(transport.clone(), &config),
            transport,
            config,
        })
    }

    pub fn config(&self) -> &ExtensionConfig {
        &self.config
    }

    /// Resolve an episode to playable sources.
    pub async fn resolve_streamable(&self, episode_id: &str) -> Result<Vec<PlayableSource>> {
        self.resolver.resolve(episode_id).await
    }

    /// Key for the episode's subtitle endpoint. Same rules as the video key.
    pub async fn subtitle_key(&self, episode_id: &str) -> Result<AccessKey> {
        let url = Endpoints::new(&self.config).subtitle_key(episode_id);
        fetch_key(self.transport.as_ref(), &url, episode_id).await
    }
}

#[async_trait]
impl ExtensionClient for KissKhExtension {
    fn name(&self) -> &'static str {
        "kisskh"
    }
}

#[async_trait]
impl HomeFeedClient for KissKhExtension {
    async fn home_tabs(&self) -> Result<Vec<Tab>> {
        Ok(catalog::home_tabs())
    }

    async fn home_feed(&self, tab: Option<&Tab>) -> Result<Vec<Shelf>> {
        self.catalog.home_feed(tab).await
    }
}

#[async_trait]
impl SearchFeedClient for KissKhExtension {
    async fn search_tabs(&self, _query: &str) -> Result<Vec<Tab>> {
        Ok(catalog::search_tabs())
    }

    // The site has no per-tab search; every tab shows the same results.
    async fn search_feed(&self, query: &str, _tab: Option<&Tab>) -> Result<Vec<Shelf>> {
        self.catalog.search(query).await
    }

    async fn quick_search(&self, query: &str) -> Result<Vec<QuickSearchItem>> {
        self.catalog.quick_search(query).await
    }
}

#[async_trait]
impl TrackClient for KissKhExtension {
    async fn load_track(&self, track: &Track) -> Result<Track> {
        self.catalog.load_track(track).await
    }

    async fn load_streamable_media(&self, episode_id: &str) -> Result<Vec<PlayableSource>> {
        self.resolve_streamable(episode_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::http::testing::ScriptedTransport;

    fn extension(transport: ScriptedTransport) -> KissKhExtension {
        KissKhExtension::with_transport(ExtensionConfig::default(), Arc::new(transport)).unwrap()
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = ExtensionConfig {
            base_url: "kisskh.ovh".to_string(),
            ..ExtensionConfig::default()
        };
        let result = KissKhExtension::with_transport(config, Arc::new(ScriptedTransport::new()));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn test_tabs() {
        let ext = extension(ScriptedTransport::new());
        assert_eq!(ext.name(), "kisskh");
        let home: Vec<_> = ext.home_tabs().await.unwrap().into_iter().map(|t| t.id).collect();
        assert_eq!(home, ["popular", "latest"]);
        let search: Vec<_> = ext
            .search_tabs("x")
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(search, ["all", "drama", "movie"]);
    }

    #[tokio::test]
    async fn test_defaults() {
        let ext = extension(ScriptedTransport::new());
        let track = Track {
            id: "1".to_string(),
            title: "One".to_string(),
            thumbnail: None,
            description: None,
        };
        assert!(ext.related_shelves(&track).await.unwrap().is_empty());
        ext.on_extension_selected().await.unwrap();
        let item = QuickSearchItem {
            item: crate::model::MediaItem {
                id: "1".to_string(),
                title: "One".to_string(),
                thumbnail: None,
            },
            searched: false,
        };
        ext.delete_quick_search(&item).await.unwrap();
    }

    #[tokio::test]
    async fn test_subtitle_key() {
        let ext = extension(ScriptedTransport::new().route(
            "https://kisskh.ovh/api/subkey/42&version=2.8.10",
            200,
            r#"{"id":"42","version":"2.8.10","key":"SUB"}"#,
        ));
        assert_eq!(ext.subtitle_key("42").await.unwrap().as_str(), "SUB");
    }
}
