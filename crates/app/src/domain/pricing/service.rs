//! Cart pricing service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use rustc_hash::FxHashSet;
use tracing::{debug, warn};

use crate::domain::{
    catalog::{CatalogLookup, models::AudiobookId},
    pricing::{
        errors::PricingError,
        models::{CartLineRequest, CartPricingSnapshot, ResolvedCartLine},
        money::{MAX_ORDER_TOTAL, MAX_UNIT_PRICE},
    },
};

/// Largest quantity an order line can store.
const MAX_QUANTITY: i64 = i32::MAX as i64;

#[derive(Clone)]
pub struct CatalogCartPricingService {
    catalog: Arc<dyn CatalogLookup>,
}

impl CatalogCartPricingService {
    #[must_use]
    pub fn new(catalog: Arc<dyn CatalogLookup>) -> Self {
        Self { catalog }
    }
}

impl std::fmt::Debug for CatalogCartPricingService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogCartPricingService")
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl CartPricingService for CatalogCartPricingService {
    async fn price_cart(
        &self,
        lines: &[CartLineRequest],
    ) -> Result<CartPricingSnapshot, PricingError> {
        if lines.is_empty() {
            return Ok(CartPricingSnapshot::empty(Timestamp::now()));
        }

        let quantities = validate_lines(lines)?;

        let mut seen = FxHashSet::default();
        let ids: Vec<AudiobookId> = lines
            .iter()
            .map(|line| line.item_id)
            .filter(|id| seen.insert(*id))
            .collect();

        let entries = self.catalog.resolve(&ids).await?;

        let mut resolved = Vec::with_capacity(lines.len());

        for (line, quantity) in lines.iter().zip(quantities) {
            let Some(entry) = entries.get(&line.item_id) else {
                debug!(audiobook_id = %line.item_id, "dropping unresolved cart line");
                continue;
            };

            if !entry.available {
                debug!(audiobook_id = %line.item_id, "dropping unavailable cart line");
                continue;
            }

            if entry.unit_price.is_sign_negative() || entry.unit_price > MAX_UNIT_PRICE {
                warn!(
                    audiobook_id = %line.item_id,
                    price = %entry.unit_price,
                    "catalog returned an out-of-range price, dropping cart line"
                );
                continue;
            }

            resolved.push(ResolvedCartLine::new(
                line.item_id,
                entry.title.clone(),
                entry.unit_price,
                quantity,
            ));
        }

        let snapshot = CartPricingSnapshot::new(resolved, Timestamp::now());
        let total = snapshot.grand_total();

        if total > MAX_ORDER_TOTAL {
            return Err(PricingError::TotalOutOfRange { total });
        }

        Ok(snapshot)
    }
}

/// Check every line before any I/O, returning the quantities as stored.
fn validate_lines(lines: &[CartLineRequest]) -> Result<Vec<u32>, PricingError> {
    lines
        .iter()
        .enumerate()
        .map(|(position, line)| {
            if line.quantity <= 0 || line.quantity > MAX_QUANTITY {
                return Err(PricingError::InvalidCartLine {
                    position,
                    item_id: line.item_id,
                    quantity: line.quantity,
                });
            }

            u32::try_from(line.quantity).map_err(|_overflow| PricingError::InvalidCartLine {
                position,
                item_id: line.item_id,
                quantity: line.quantity,
            })
        })
        .collect()
}

#[automock]
#[async_trait]
pub trait CartPricingService: Send + Sync {
    /// Price a cart against the catalog in a single batch lookup.
    ///
    /// Lines whose item can't be resolved are dropped; a cart where nothing
    /// resolves yields an empty snapshot rather than an error. A grand total
    /// beyond [`MAX_ORDER_TOTAL`] is rejected.
    async fn price_cart(
        &self,
        lines: &[CartLineRequest],
    ) -> Result<CartPricingSnapshot, PricingError>;
}
