//! Stream resolution: episode id → playable sources.
//!
//! ```text
//! Start → KeyAcquired → EndpointFound → Direct ───────────────────────┐
//!                                     └→ ManifestFetched → Variants ──┴→ Resolved
//! ```
//!
//! Failures before `EndpointFound` are returned to the caller. From the
//! manifest fetch onwards every failure degrades to a single source pointing
//! at the manifest itself.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};
use url::Url;

use super::classify::is_manifest_url;
use super::hls::parse_master_playlist;
use super::key::{fetch_key, AccessKey};
use crate::api::Endpoints;
use crate::config::ExtensionConfig;
use crate::error::{Error, Result};
use crate::http::HttpTransport;
use crate::model::PlayableSource;

/// Field names the episode endpoint has used for the video locator, in
/// lookup order.
pub const LOCATOR_FIELDS: [&str; 3] = ["Video", "videoUrl", "url"];

/// Resolves episode ids to playable sources. Holds no per-call state.
pub struct StreamResolver {
    transport: Arc<dyn HttpTransport>,
    endpoints: Endpoints,
    playback_headers: BTreeMap<String, String>,
}

impl StreamResolver {
    pub fn new(transport: Arc<dyn HttpTransport>, config: &ExtensionConfig) -> Self {
        let endpoints = Endpoints::new(config);
        let mut playback_headers = BTreeMap::new();
        if config.playback_headers {
            playback_headers.insert("Referer".to_string(), format!("{}/", endpoints.base()));
            playback_headers.insert("Origin".to_string(), endpoints.base().to_string());
        }

        Self {
            transport,
            endpoints,
            playback_headers,
        }
    }

    /// Resolve `episode_id` to a non-empty, ordered list of sources.
    #[instrument(skip(self))]
    pub async fn resolve(&self, episode_id: &str) -> Result<Vec<PlayableSource>> {
        let key = self.acquire_key(episode_id).await?;
        let locator = self.probe_endpoints(episode_id, &key).await?;

        let sources = if is_manifest_url(&locator) {
            self.expand_manifest(&locator).await
        } else {
            debug!(%locator, "Direct source");
            vec![PlayableSource::direct(locator)]
        };

        let sources: Vec<_> = sources
            .into_iter()
            .map(|s| s.with_headers(&self.playback_headers))
            .collect();
        info!(count = sources.len(), "Resolved episode {episode_id}");
        Ok(sources)
    }

    async fn acquire_key(&self, episode_id: &str) -> Result<AccessKey> {
        if episode_id.trim().is_empty() {
            return Err(Error::KeyUnavailable {
                episode_id: episode_id.to_string(),
                reason: "empty episode id".to_string(),
            });
        }
        let url = self.endpoints.video_key(episode_id);
        fetch_key(self.transport.as_ref(), &url, episode_id).await
    }

    /// Try each candidate once, in order, stopping at the first locator.
    async fn probe_endpoints(&self, episode_id: &str, key: &AccessKey) -> Result<String> {
        let candidates = self.endpoints.episode_candidates(episode_id, key.as_str());
        let attempts = candidates.len();

        for (index, url) in candidates.iter().enumerate() {
            match self.probe(url).await {
                Ok(locator) => {
                    debug!(candidate = index, %locator, "Endpoint yielded locator");
                    return Ok(locator);
                }
                Err(reason) => warn!(candidate = index, "Endpoint probe failed: {reason}"),
            }
        }

        Err(Error::NoPlayableSource {
            episode_id: episode_id.to_string(),
            attempts,
        })
    }

    async fn probe(&self, url: &str) -> std::result::Result<String, String> {
        let response = self
            .transport
            .get(url)
            .await
            .map_err(|e| format!("request failed: {e:#}"))?;
        if !response.is_success() {
            return Err(format!("HTTP {}", response.status));
        }
        let json = response
            .json()
            .map_err(|e| format!("malformed JSON: {e}"))?;
        let locator = extract_locator(&json).ok_or("no video locator field")?;
        self.absolutize(locator)
            .ok_or_else(|| format!("unusable locator `{locator}`"))
    }

    /// Locators are normally absolute; protocol-relative and site-relative
    /// ones are resolved against the site root.
    fn absolutize(&self, locator: &str) -> Option<String> {
        if let Ok(url) = Url::parse(locator) {
            return matches!(url.scheme(), "http" | "https").then(|| url.into());
        }
        Url::parse(self.endpoints.base())
            .and_then(|base| base.join(locator))
            .ok()
            .map(String::from)
    }

    /// Expand a manifest into variant sources, or fall back to the manifest
    /// itself.
    async fn expand_manifest(&self, manifest_url: &str) -> Vec<PlayableSource> {
        let fallback = || vec![PlayableSource::direct(manifest_url)];

        let body = match self.fetch_manifest(manifest_url).await {
            Ok(body) => body,
            Err(e) => {
                warn!("{e}; using manifest as direct source");
                return fallback();
            }
        };
        let Ok(base) = Url::parse(manifest_url) else {
            return fallback();
        };

        let variants = parse_master_playlist(&body, &base);
        if variants.is_empty() {
            warn!(%manifest_url, "Not a master playlist or no variants; using it as direct source");
            return fallback();
        }

        debug!("Found {} manifest variants", variants.len());
        variants.into_iter().map(PlayableSource::from).collect()
    }

    async fn fetch_manifest(&self, url: &str) -> Result<String> {
        let unavailable = |reason: String| Error::ManifestUnavailable {
            url: url.to_string(),
            reason,
        };

        let response = self
            .transport
            .get(url)
            .await
            .map_err(|e| unavailable(format!("request failed: {e:#}")))?;
        if !response.is_success() {
            return Err(unavailable(format!("HTTP {}", response.status)));
        }
        if response.body.trim().is_empty() {
            return Err(unavailable("empty body".to_string()));
        }
        Ok(response.body)
    }
}

/// First non-blank string under one of [`LOCATOR_FIELDS`].
pub fn extract_locator(json: &serde_json::Value) -> Option<&str> {
    LOCATOR_FIELDS
        .iter()
        .filter_map(|field| json.get(field).and_then(serde_json::Value::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())
}
