//! Manifest vs. direct-file classification.

/// Substrings that mark a locator as an HLS manifest.
const MANIFEST_MARKERS: [&str; 5] = [".m3u8", ".m3u", "master.m3u8", "playlist.m3u8", "hls"];

/// Returns `true` if the locator looks like an HLS manifest.
///
/// Substring test over the lower-cased URL, not a content-type probe. A
/// direct file whose path happens to contain `hls` is misclassified; its
/// body lacks the `#EXTM3U` header, so the manifest fallback hands it back
/// as a single direct source.
pub fn is_manifest_url(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    MANIFEST_MARKERS.iter().any(|marker| lower.contains(marker))
}
