//! Access key acquisition.

use std::fmt;

use tracing::debug;

use crate::error::{Error, Result};
use crate::http::HttpTransport;

/// Short-lived token authorizing media requests for one episode.
///
/// Obtained fresh for every resolution and never stored.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessKey(String);

impl AccessKey {
    /// Rejects blank tokens; an empty key is a failed acquisition, not a key.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            None
        } else {
            Some(Self(value))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Keys are credentials; keep them out of logs.
impl fmt::Debug for AccessKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccessKey(<{} chars>)", self.0.len())
    }
}

/// Fetch `url` and read the `key` field of its JSON body.
///
/// Any failure maps to [`Error::KeyUnavailable`] for `episode_id`.
pub async fn fetch_key(
    transport: &dyn HttpTransport,
    url: &str,
    episode_id: &str,
) -> Result<AccessKey> {
    let unavailable = |reason: String| Error::KeyUnavailable {
        episode_id: episode_id.to_string(),
        reason,
    };

    let response = transport
        .get(url)
        .await
        .map_err(|e| unavailable(format!("request failed: {e:#}")))?;

    if !response.is_success() {
        return Err(unavailable(format!("HTTP {}", response.status)));
    }
    if response.body.trim().is_empty() {
        return Err(unavailable("empty response body".to_string()));
    }

    let json = response
        .json()
        .map_err(|e| unavailable(format!("malformed JSON: {e}")))?;
    let key = json
        .get("key")
        .and_then(serde_json::Value::as_str)
        .ok_or_else(|| unavailable("response has no `key` field".to_string()))?;

    let key = AccessKey::new(key).ok_or_else(|| unavailable("blank key".to_string()))?;
    debug!(episode_id, ?key, "Access key acquired");
    Ok(key)
}
