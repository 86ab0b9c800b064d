//! Host-facing data types.
//!
//! These are the minimal shapes the host needs to render shelves and start
//! playback. They serialize to JSON for the CLI.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// A catalog, search or quick-search entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaItem {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl MediaItem {
    /// Build from one upstream listing object. Entries without `id` or
    /// `title` are not displayable and yield `None`.
    pub fn from_json(item: &serde_json::Value) -> Option<Self> {
        let id = json_text(item.get("id")?)?;
        let title = json_text(item.get("title")?)?;
        let thumbnail = item.get("thumbnail").and_then(json_text);
        Some(Self {
            id,
            title,
            thumbnail,
        })
    }
}

/// Upstream ids are numbers, titles are strings; the host wants text for both.
pub(crate) fn json_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// A titled row of items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Shelf {
    pub title: String,
    pub items: Vec<MediaItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tab {
    pub id: String,
    pub title: String,
}

impl Tab {
    pub fn new(id: &str, title: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuickSearchItem {
    pub item: MediaItem,
    /// Whether this came from search history. The site keeps none.
    pub searched: bool,
}

/// A drama as the host tracks it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Track {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One variant stream from an adaptive manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestVariant {
    /// Bits per second, 0 when the manifest omits it.
    pub bandwidth: u64,
    /// `WxH`, empty when the manifest omits it.
    pub resolution: String,
    /// Absolute URL.
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SourceKind {
    /// A file or manifest the player opens as-is.
    Direct,
    /// One entry of a parsed manifest.
    Variant { bandwidth: u64, resolution: String },
}

/// Final output of stream resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayableSource {
    /// Absolute HTTP(S) URL.
    pub url: String,
    /// Headers the player must send.
    pub headers: BTreeMap<String, String>,
    pub kind: SourceKind,
}

impl PlayableSource {
    pub fn direct(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: BTreeMap::new(),
            kind: SourceKind::Direct,
        }
    }

    pub fn with_headers(mut self, headers: &BTreeMap<String, String>) -> Self {
        self.headers.extend(headers.iter().map(|(k, v)| (k.clone(), v.clone())));
        self
    }
}

impl From<ManifestVariant> for PlayableSource {
    fn from(variant: ManifestVariant) -> Self {
        Self {
            url: variant.url,
            headers: BTreeMap::new(),
            kind: SourceKind::Variant {
                bandwidth: variant.bandwidth,
                resolution: variant.resolution,
            },
        }
    }
}

impl fmt::Display for PlayableSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            SourceKind::Direct => write!(f, "direct  {}", self.url),
            SourceKind::Variant {
                bandwidth,
                resolution,
            } => {
                let resolution = if resolution.is_empty() { "?" } else { resolution.as_str() };
                write!(f, "{resolution:>9} @ {bandwidth} bps  {}", self.url)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_media_item_from_json() {
        let item = MediaItem::from_json(&json!({
            "id": 8231,
            "title": "Hometown Cha-Cha-Cha",
            "thumbnail": "https://img.example/8231.png",
            "episodesCount": 16
        }))
        .unwrap();
        assert_eq!(item.id, "8231");
        assert_eq!(item.title, "Hometown Cha-Cha-Cha");
        assert_eq!(item.thumbnail.as_deref(), Some("https://img.example/8231.png"));
    }

    #[test]
    fn test_media_item_requires_id_and_title() {
        assert!(MediaItem::from_json(&json!({"title": "No id"})).is_none());
        assert!(MediaItem::from_json(&json!({"id": 1})).is_none());
        assert!(MediaItem::from_json(&json!({"id": 1, "title": null})).is_none());

        let item = MediaItem::from_json(&json!({"id": "1", "title": "t", "thumbnail": null}));
        assert_eq!(item.unwrap().thumbnail, None);
    }

    #[test]
    fn test_variant_into_source() {
        let source: PlayableSource = ManifestVariant {
            bandwidth: 800_000,
            resolution: "854x480".to_string(),
            url: "https://h/480.m3u8".to_string(),
        }
        .into();
        assert_eq!(source.url, "https://h/480.m3u8");
        assert_eq!(
            source.kind,
            SourceKind::Variant {
                bandwidth: 800_000,
                resolution: "854x480".to_string()
            }
        );
        assert_eq!(source.to_string(), "  854x480 @ 800000 bps  https://h/480.m3u8");
    }

    #[test]
    fn test_source_serializes_kind_tag() {
        let value = serde_json::to_value(PlayableSource::direct("https://h/v.mp4")).unwrap();
        assert_eq!(value["kind"]["type"], "direct");
        assert_eq!(value["url"], "https://h/v.mp4");
    }
}
