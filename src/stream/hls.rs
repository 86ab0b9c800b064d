//! HLS master playlist parsing
//!
//! Turns an extended M3U body into [`ManifestVariant`]s with absolute URLs.
//! Bodies that do not open with `#EXTM3U` yield nothing. Otherwise every
//! non-empty, non-tag line becomes one variant, carrying the
//! `BANDWIDTH`/`RESOLUTION` of the `#EXT-X-STREAM-INF` line before it (if any).

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;
use url::Url;

use crate::model::ManifestVariant;

pub const PLAYLIST_HEADER: &str = "#EXTM3U";
pub const STREAM_INF_TAG: &str = "#EXT-X-STREAM-INF";
const TAG_PREFIX: char = '#';

// Anchored on `:` or `,` so AVERAGE-BANDWIDTH does not match.
static BANDWIDTH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[:,]\s*BANDWIDTH=(\d+)").expect("valid BANDWIDTH pattern"));
static RESOLUTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[:,]\s*RESOLUTION=(\d+x\d+)").expect("valid RESOLUTION pattern"));

/// Attributes accumulated from the last stream-info line.
#[derive(Debug, Default)]
struct PendingInfo {
    bandwidth: u64,
    resolution: String,
}

impl PendingInfo {
    fn from_stream_inf(line: &str) -> Self {
        let bandwidth = BANDWIDTH
            .captures(line)
            .and_then(|c| c[1].parse().ok())
            .unwrap_or(0);
        let resolution = RESOLUTION
            .captures(line)
            .map(|c| c[1].to_string())
            .unwrap_or_default();
        Self {
            bandwidth,
            resolution,
        }
    }
}

/// Parse a master playlist fetched from `manifest_url`.
///
/// Never fails: malformed attributes default, unresolvable lines are
/// skipped. An empty result means the caller should fall back to the
/// manifest itself.
pub fn parse_master_playlist(body: &str, manifest_url: &Url) -> Vec<ManifestVariant> {
    if !is_extended_m3u(body) {
        debug!("Body does not start with {PLAYLIST_HEADER}");
        return Vec::new();
    }

    let mut variants = Vec::new();
    let mut pending = PendingInfo::default();

    for line in body.lines().map(str::trim) {
        if line.is_empty() {
            continue;
        }
        if line.starts_with(STREAM_INF_TAG) {
            pending = PendingInfo::from_stream_inf(line);
        } else if line.starts_with(TAG_PREFIX) {
            continue;
        } else {
            let info = std::mem::take(&mut pending);
            match resolve_url(manifest_url, line) {
                Some(url) => variants.push(ManifestVariant {
                    bandwidth: info.bandwidth,
                    resolution: info.resolution,
                    url,
                }),
                None => debug!(line, "Skipping unresolvable variant line"),
            }
        }
    }

    variants
}

/// First non-empty line is the `#EXTM3U` header (a leading BOM is ignored).
pub fn is_extended_m3u(body: &str) -> bool {
    body.trim_start_matches('\u{feff}')
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .is_some_and(|line| line.starts_with(PLAYLIST_HEADER))
}

/// Resolve a variant line against the manifest locator.
///
/// - `scheme://...` is kept as-is
/// - `/path` keeps the manifest's scheme and authority, replaces the path
/// - anything else is resolved against the manifest's directory locator
pub fn resolve_url(manifest_url: &Url, line: &str) -> Option<String> {
    if has_scheme(line) {
        return Some(line.to_string());
    }
    if line.starts_with('/') {
        return manifest_url.join(line).ok().map(String::from);
    }
    directory_locator(manifest_url)
        .join(line)
        .ok()
        .map(String::from)
}

fn has_scheme(line: &str) -> bool {
    line.starts_with("http://") || line.starts_with("https://") || Url::parse(line).is_ok()
}

/// The manifest URL with its file name, query and fragment removed, and no
/// trailing slash: `https://h/a/b/master.m3u8` → `https://h/a/b`.
fn directory_locator(manifest_url: &Url) -> Url {
    let mut dir = manifest_url.clone();
    let parent = manifest_url
        .path()
        .rsplit_once('/')
        .map_or("", |(parent, _)| parent)
        .to_string();
    dir.set_path(&parent);
    dir.set_query(None);
    dir.set_fragment(None);
    dir
}
