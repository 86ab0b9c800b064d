//! `kisskh` - KissKH drama extension
//!
//! # Features
//!
//! - **Catalog**: paginated popular listing, search, quick search, drama details
//! - **Stream resolution**: access key → media endpoint fallback → HLS variants
//! - **Host traits**: [`HomeFeedClient`], [`SearchFeedClient`], [`TrackClient`]
//!
//! # Example
//!
//! ```rust,no_run
//! use kisskh::{ExtensionConfig, KissKhExtension};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let ext = KissKhExtension::new(ExtensionConfig::default())?;
//!     for source in ext.resolve_streamable("123456").await? {
//!         println!("{source}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod extension;
pub mod host;
pub mod http;
pub mod model;
pub mod stream;

pub use config::{load_config, ExtensionConfig};
pub use error::{Error, Result};
pub use extension::KissKhExtension;
pub use host::{ExtensionClient, HomeFeedClient, SearchFeedClient, TrackClient};
pub use http::{HttpResponse, HttpTransport, ReqwestTransport};
pub use model::{
    ManifestVariant, MediaItem, PlayableSource, QuickSearchItem, Shelf, SourceKind, Tab, Track,
};
pub use stream::{is_manifest_url, AccessKey, StreamResolver};

/// Version of kisskh
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
