pub mod common;
pub mod u101_sync_prices;
