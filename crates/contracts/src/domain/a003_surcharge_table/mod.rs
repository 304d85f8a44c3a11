pub mod aggregate;

pub use aggregate::{Category, SurchargeTable};
