//! End-to-end resolution through the public API with a scripted transport.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use kisskh::{
    Error, ExtensionConfig, HttpResponse, HttpTransport, KissKhExtension, SourceKind,
    TrackClient,
};

#[derive(Default)]
struct FakeSite {
    routes: HashMap<String, HttpResponse>,
    hits: Mutex<Vec<String>>,
}

impl FakeSite {
    fn route(mut self, url: &str, status: u16, body: &str) -> Self {
        self.routes.insert(url.to_string(), HttpResponse::new(status, body));
        self
    }

    fn hits(&self) -> Vec<String> {
        self.hits.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpTransport for FakeSite {
    async fn get(&self, url: &str) -> Result<HttpResponse> {
        self.hits.lock().unwrap().push(url.to_string());
        self.routes
            .get(url)
            .cloned()
            .ok_or_else(|| anyhow!("no route for {url}"))
    }
}

const BASE: &str = "https://drama.test";

fn episode(suffix: &str) -> String {
    format!("{BASE}/api/DramaList/Episode/501{suffix}?err=false&ts=&time=&kkey=abc")
}

fn key_url() -> String {
    format!("{BASE}/api/key/501&version=2.8.10")
}

fn extension(site: FakeSite, playback_headers: bool) -> (KissKhExtension, Arc<FakeSite>) {
    let site = Arc::new(site);
    let config = ExtensionConfig {
        base_url: BASE.to_string(),
        playback_headers,
        ..ExtensionConfig::default()
    };
    let ext = KissKhExtension::with_transport(config, site.clone()).unwrap();
    (ext, site)
}

#[tokio::test]
async fn manifest_episode_resolves_to_variants_with_headers() {
    let manifest_url = "https://cdn.test/v/501/master.m3u8?sig=1";
    let manifest = "#EXTM3U\n\
                    #EXT-X-STREAM-INF:BANDWIDTH=640000,RESOLUTION=640x360\n\
                    360/index.m3u8\n\
                    #EXT-X-STREAM-INF:BANDWIDTH=1400000,RESOLUTION=1280x720\n\
                    720/index.m3u8\n";
    let site = FakeSite::default()
        .route(&key_url(), 200, r#"{"id":"501","version":"2.8.10","key":"abc"}"#)
        .route(&episode(".png"), 200, r#"{"Video":null,"ThirdParty":null}"#)
        .route(&episode(".mp4"), 200, &format!(r#"{{"videoUrl":"{manifest_url}"}}"#))
        .route(manifest_url, 200, manifest);
    let (ext, site) = extension(site, true);

    let sources = ext.load_streamable_media("501").await.unwrap();

    assert_eq!(sources.len(), 2);
    assert_eq!(sources[0].url, "https://cdn.test/v/360/index.m3u8");
    assert_eq!(sources[1].url, "https://cdn.test/v/720/index.m3u8");
    assert!(matches!(
        sources[1].kind,
        SourceKind::Variant { bandwidth: 1_400_000, .. }
    ));
    for source in &sources {
        assert_eq!(source.headers["Referer"], "https://drama.test/");
        assert_eq!(source.headers["Origin"], "https://drama.test");
    }
    assert_eq!(
        site.hits(),
        vec![key_url(), episode(".png"), episode(".mp4"), manifest_url.to_string()]
    );
}

#[tokio::test]
async fn unreachable_key_endpoint_is_terminal() {
    let (ext, site) = extension(FakeSite::default(), false);

    let err = ext.resolve_streamable("501").await.unwrap_err();

    assert!(matches!(err, Error::KeyUnavailable { .. }));
    assert!(err.to_string().contains("episode 501"));
    assert_eq!(site.hits(), vec![key_url()]);
}

#[tokio::test]
async fn exhausted_candidates_fail_loudly() {
    let site = FakeSite::default()
        .route(&key_url(), 200, r#"{"key":"abc"}"#)
        .route(&episode(".png"), 404, "")
        .route(&episode(".mp4"), 200, "[]")
        .route(&episode(".m3u8"), 200, r#"{"Video":"   "}"#)
        .route(&episode(""), 200, r#"{"message":"expired"}"#);
    let (ext, site) = extension(site, false);

    let err = ext.resolve_streamable("501").await.unwrap_err();

    assert!(matches!(err, Error::NoPlayableSource { attempts: 4, .. }));
    assert_eq!(site.hits().len(), 5);
}

#[tokio::test]
async fn last_candidate_direct_file() {
    let site = FakeSite::default()
        .route(&key_url(), 200, r#"{"key":"abc"}"#)
        .route(&episode(""), 200, r#"{"url":"https://cdn.test/501.mp4"}"#);
    let (ext, _) = extension(site, false);

    let sources = ext.resolve_streamable("501").await.unwrap();

    assert_eq!(sources.len(), 1);
    assert_eq!(sources[0].url, "https://cdn.test/501.mp4");
    assert_eq!(sources[0].kind, SourceKind::Direct);
    assert!(sources[0].headers.is_empty());
}
