//! Cart Handlers

pub(crate) mod calculate;
