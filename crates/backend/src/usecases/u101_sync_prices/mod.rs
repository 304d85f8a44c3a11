//! UseCase u101: синхронизация цен вариантов Shopify по таблице надбавок.

pub mod executor;
pub mod price_computer;
pub mod progress;
pub mod shopify_api_client;

pub use executor::SyncExecutor;
pub use progress::ProgressSink;
pub use shopify_api_client::{CatalogApi, ShopifyApiClient};
