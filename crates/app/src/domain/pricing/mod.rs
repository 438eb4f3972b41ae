//! Cart Pricing

pub mod errors;
pub mod models;
pub mod money;
pub mod service;

pub use errors::PricingError;
pub use service::*;
