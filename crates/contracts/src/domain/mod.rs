pub mod a001_connection_shopify;
pub mod a002_catalog_product;
pub mod a003_surcharge_table;
