//! Order Handlers

pub(crate) mod create;
pub(crate) mod get;
pub(crate) mod get_by_number;
pub(crate) mod index;
pub(crate) mod update_status;
