//! Pricing Models

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::domain::{catalog::models::AudiobookId, pricing::money::round_money};

/// One requested cart line, as received from the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartLineRequest {
    pub item_id: AudiobookId,
    pub quantity: i64,
}

impl CartLineRequest {
    #[must_use]
    pub fn new(item_id: impl Into<AudiobookId>, quantity: i64) -> Self {
        Self {
            item_id: item_id.into(),
            quantity,
        }
    }
}

/// A cart line priced against the catalog.
///
/// The line total is computed once at construction and the line can't be
/// modified afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCartLine {
    item_id: AudiobookId,
    title: String,
    unit_price: Decimal,
    quantity: u32,
    line_total: Decimal,
}

impl ResolvedCartLine {
    #[must_use]
    pub fn new(item_id: AudiobookId, title: String, unit_price: Decimal, quantity: u32) -> Self {
        let line_total = round_money(unit_price * Decimal::from(quantity));

        Self {
            item_id,
            title,
            unit_price,
            quantity,
            line_total,
        }
    }

    #[must_use]
    pub fn item_id(&self) -> AudiobookId {
        self.item_id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.line_total
    }
}

/// The priced cart at a point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct CartPricingSnapshot {
    lines: Vec<ResolvedCartLine>,
    computed_at: Timestamp,
}

impl CartPricingSnapshot {
    #[must_use]
    pub fn new(lines: Vec<ResolvedCartLine>, computed_at: Timestamp) -> Self {
        Self { lines, computed_at }
    }

    #[must_use]
    pub fn empty(computed_at: Timestamp) -> Self {
        Self::new(Vec::new(), computed_at)
    }

    #[must_use]
    pub fn lines(&self) -> &[ResolvedCartLine] {
        &self.lines
    }

    #[must_use]
    pub fn computed_at(&self) -> Timestamp {
        self.computed_at
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of the line totals. Always derived from the lines.
    #[must_use]
    pub fn grand_total(&self) -> Decimal {
        round_money(self.lines.iter().map(ResolvedCartLine::line_total).sum())
    }
}
