//! In-process catalog lookup backed by the shared database.

use async_trait::async_trait;
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use sqlx::{FromRow, Postgres, Row, postgres::PgRow, query_as};

use crate::{
    database::Db,
    domain::catalog::{
        errors::CatalogError,
        lookup::{CatalogEntries, CatalogLookup},
        models::{AudiobookId, CatalogEntry},
    },
};

const RESOLVE_AUDIOBOOKS_SQL: &str = include_str!("sql/resolve_audiobooks.sql");
const UPSERT_AUDIOBOOK_SQL: &str = include_str!("sql/upsert_audiobook.sql");

#[derive(Debug, Clone)]
pub struct PgCatalogLookup {
    db: Db,
}

impl PgCatalogLookup {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// Insert an audiobook or overwrite its title and price.
    ///
    /// # Errors
    ///
    /// Returns an error when the write fails, including a negative price
    /// rejected by the table's check constraint.
    pub async fn upsert_audiobook(
        &self,
        id: AudiobookId,
        title: &str,
        price: Decimal,
    ) -> Result<CatalogEntry, CatalogError> {
        query_as::<Postgres, CatalogEntry>(UPSERT_AUDIOBOOK_SQL)
            .bind(id.get())
            .bind(title)
            .bind(price)
            .fetch_one(self.db.pool())
            .await
            .map_err(CatalogError::Sql)
    }
}

#[async_trait]
impl CatalogLookup for PgCatalogLookup {
    async fn resolve(&self, ids: &[AudiobookId]) -> Result<CatalogEntries, CatalogError> {
        if ids.is_empty() {
            return Ok(FxHashMap::default());
        }

        let ids: Vec<i64> = ids.iter().map(|id| id.get()).collect();

        let rows = query_as::<Postgres, CatalogEntry>(RESOLVE_AUDIOBOOKS_SQL)
            .bind(ids)
            .fetch_all(self.db.pool())
            .await
            .map_err(CatalogError::Sql)?;

        Ok(rows.into_iter().map(|entry| (entry.id, entry)).collect())
    }
}

impl<'r> FromRow<'r, PgRow> for CatalogEntry {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: AudiobookId::new(row.try_get("id")?),
            title: row.try_get("title")?,
            unit_price: row.try_get("price")?,
            available: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    #[tokio::test]
    async fn resolve_returns_known_ids_only() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.catalog
            .upsert_audiobook(AudiobookId::new(1), "Dune", Decimal::new(10000, 2))
            .await?;

        ctx.catalog
            .upsert_audiobook(AudiobookId::new(2), "Emma", Decimal::new(5000, 2))
            .await?;

        let entries = ctx
            .catalog
            .resolve(&[AudiobookId::new(1), AudiobookId::new(2), AudiobookId::new(999)])
            .await?;

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[&AudiobookId::new(1)].title, "Dune");
        assert_eq!(entries[&AudiobookId::new(2)].unit_price, Decimal::new(5000, 2));
        assert!(entries[&AudiobookId::new(2)].available);

        Ok(())
    }

    #[tokio::test]
    async fn upsert_overwrites_price() -> TestResult {
        let ctx = TestContext::new().await;
        let id = AudiobookId::new(42);

        ctx.catalog
            .upsert_audiobook(id, "Middlemarch", Decimal::new(1999, 2))
            .await?;

        let updated = ctx
            .catalog
            .upsert_audiobook(id, "Middlemarch", Decimal::new(2499, 2))
            .await?;

        assert_eq!(updated.unit_price, Decimal::new(2499, 2));

        let entries = ctx.catalog.resolve(&[id]).await?;
        assert_eq!(entries[&id].unit_price, Decimal::new(2499, 2));

        Ok(())
    }

    #[tokio::test]
    async fn negative_price_is_rejected_by_storage() {
        let ctx = TestContext::new().await;

        let result = ctx
            .catalog
            .upsert_audiobook(AudiobookId::new(3), "Free Money", Decimal::new(-1, 0))
            .await;

        assert!(
            matches!(result, Err(CatalogError::Sql(_))),
            "expected Sql error, got {result:?}"
        );
    }
}
