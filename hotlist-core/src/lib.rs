pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod normalize;
pub mod refresh;
pub mod service;
pub mod store;

pub use client::TrendingClient;
pub use config::{AppConfig, CacheConfig, ServerConfig, SourceConfig};
pub use error::{CacheError, ParseError, RefreshError, TransportError};
pub use model::{search_link, CacheSnapshot, TrendingItem, SOURCE_TYPE};
pub use normalize::normalize;
pub use refresh::{RefreshOutcome, Refresher};
pub use service::TrendingService;
pub use store::CacheStore;
