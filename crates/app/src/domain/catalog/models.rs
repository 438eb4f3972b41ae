//! Catalog Models

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use rust_decimal::Decimal;

/// Identifier of an audiobook in the external catalog.
///
/// Order lines keep this as a plain reference; nothing here enforces that the
/// audiobook still exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AudiobookId(i64);

impl AudiobookId {
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl Display for AudiobookId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

impl From<i64> for AudiobookId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl FromStr for AudiobookId {
    type Err = std::num::ParseIntError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        value.parse().map(Self)
    }
}

/// Current catalog data for one audiobook.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub id: AudiobookId,
    pub title: String,
    pub unit_price: Decimal,
    pub available: bool,
}
