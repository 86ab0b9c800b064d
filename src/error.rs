//! Error kinds surfaced to the host.

use thiserror::Error;

/// Extension errors
///
/// Per-candidate probe failures and manifest problems never show up here:
/// the resolver logs and skips the former and degrades the latter to a
/// single-source fallback.
#[derive(Error, Debug)]
pub enum Error {
    #[error("access key unavailable for episode {episode_id}: {reason}")]
    KeyUnavailable { episode_id: String, reason: String },

    #[error("no playable source for episode {episode_id} after {attempts} endpoint(s)")]
    NoPlayableSource { episode_id: String, attempts: usize },

    #[error("manifest unavailable at {url}: {reason}")]
    ManifestUnavailable { url: String, reason: String },

    #[error("{endpoint} request failed: {reason}")]
    Api { endpoint: &'static str, reason: String },

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn api(endpoint: &'static str, reason: impl std::fmt::Display) -> Self {
        Self::Api {
            endpoint,
            reason: reason.to_string(),
        }
    }
}
