pub mod aggregate;

pub use aggregate::{CatalogProduct, Metafield, ProductVariant};
