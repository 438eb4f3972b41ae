//! Checkout
//!
//! Sequences cart pricing and order creation for a single request.

pub mod errors;
pub mod service;

pub use errors::CheckoutError;
pub use service::*;
