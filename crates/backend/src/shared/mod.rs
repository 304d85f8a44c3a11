pub mod config;
pub mod surcharges;
