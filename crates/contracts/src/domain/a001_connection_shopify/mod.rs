pub mod aggregate;

pub use aggregate::ShopifyConnection;
