//! Order Repositories

mod items;
mod orders;

pub(crate) use items::{NewOrderLineItem, PgOrderItemsRepository};
pub(crate) use orders::PgOrdersRepository;
