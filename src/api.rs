//! Remote endpoint URLs.
//!
//! The site's API is undocumented; the paths and fixed query strings below
//! are what the web client sends. The key endpoints really do use `&` where a
//! `?` would be expected.

use crate::config::ExtensionConfig;

/// Suffixes appended to `Episode/<id>` in probe order. The server dispatches
/// on this suffix.
pub const EPISODE_SUFFIXES: [&str; 4] = [".png", ".mp4", ".m3u8", ""];

/// Builds URLs for one configured site.
#[derive(Debug, Clone)]
pub struct Endpoints {
    base: String,
    key_base: String,
    key_version: String,
    page_size: u32,
}

impl Endpoints {
    pub fn new(config: &ExtensionConfig) -> Self {
        Self {
            base: config.base().to_string(),
            key_base: config.key_base().to_string(),
            key_version: config.key_version.clone(),
            page_size: config.page_size,
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// One page of the popular listing.
    pub fn catalog(&self, page: u32) -> String {
        format!(
            "{}/api/DramaList/List?page={page}&type=0&sub=0&country=0&status=0&order=1&pageSize={}",
            self.base, self.page_size
        )
    }

    pub fn search(&self, query: &str) -> String {
        format!(
            "{}/api/DramaList/Search?q={}&type=0",
            self.base,
            urlencoding::encode(query)
        )
    }

    /// Drama details for a track id.
    pub fn drama(&self, id: &str) -> String {
        format!("{}/api/DramaList/Drama/{id}?isq=false", self.base)
    }

    pub fn video_key(&self, episode_id: &str) -> String {
        format!(
            "{}/api/key/{episode_id}&version={}",
            self.key_base, self.key_version
        )
    }

    pub fn subtitle_key(&self, episode_id: &str) -> String {
        format!(
            "{}/api/subkey/{episode_id}&version={}",
            self.key_base, self.key_version
        )
    }

    /// Media endpoint candidates in probe order.
    pub fn episode_candidates(&self, episode_id: &str, key: &str) -> Vec<String> {
        EPISODE_SUFFIXES
            .iter()
            .map(|suffix| {
                format!(
                    "{}/api/DramaList/Episode/{episode_id}{suffix}?err=false&ts=&time=&kkey={}",
                    self.base,
                    urlencoding::encode(key)
                )
            })
            .collect()
    }
}
