//! Streamable media resolution
//!
//! Episode id → access key → media endpoint → direct file or HLS manifest
//! → playable sources.

pub mod classify;
pub mod hls;
pub mod key;
pub mod resolver;

pub use classify::is_manifest_url;
pub use hls::parse_master_playlist;
pub use key::AccessKey;
pub use resolver::StreamResolver;
