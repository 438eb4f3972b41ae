//! Checkout service.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use mockall::automock;
use tracing::{info, warn};

use crate::domain::{
    checkout::errors::CheckoutError,
    orders::{OrdersService, models::Order},
    pricing::{CartPricingService, models::CartLineRequest},
};

#[derive(Clone)]
pub struct PricedCheckoutService {
    pricing: Arc<dyn CartPricingService>,
    orders: Arc<dyn OrdersService>,
}

impl PricedCheckoutService {
    #[must_use]
    pub fn new(pricing: Arc<dyn CartPricingService>, orders: Arc<dyn OrdersService>) -> Self {
        Self { pricing, orders }
    }
}

impl fmt::Debug for PricedCheckoutService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PricedCheckoutService").finish_non_exhaustive()
    }
}

#[async_trait]
impl CheckoutService for PricedCheckoutService {
    async fn place_order(&self, lines: &[CartLineRequest]) -> Result<Order, CheckoutError> {
        let snapshot = match self.pricing.price_cart(lines).await {
            Ok(snapshot) => snapshot,
            Err(error) => {
                let error = CheckoutError::from(error);
                warn!(kind = error.kind(), error = %error, "cart pricing failed");
                return Err(error);
            }
        };

        if snapshot.is_empty() {
            info!(requested_lines = lines.len(), "rejecting cart without purchasable items");
            return Err(CheckoutError::EmptyCart);
        }

        let order = self.orders.create_order(&snapshot).await.map_err(|error| {
            warn!(error = %error, "order creation failed");
            CheckoutError::from(error)
        })?;

        info!(
            order_uuid = %order.uuid,
            order_number = %order.order_number,
            requested_lines = lines.len(),
            resolved_lines = order.items_count(),
            "order placed"
        );

        Ok(order)
    }
}

#[automock]
#[async_trait]
pub trait CheckoutService: Send + Sync {
    /// Price the requested lines and persist the result as a new order.
    ///
    /// Fails with [`CheckoutError::EmptyCart`] when no line resolves to a
    /// purchasable item; nothing is written in that case.
    async fn place_order(&self, lines: &[CartLineRequest]) -> Result<Order, CheckoutError>;
}
