//! Audioshelf order pipeline: catalog lookup, cart pricing, order creation
//! and the checkout flow tying them together.

pub mod context;
pub mod database;
pub mod domain;

#[cfg(test)]
mod test;

mod uuids;

pub use uuids::TypedUuid;
