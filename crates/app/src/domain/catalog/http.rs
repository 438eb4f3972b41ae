//! HTTP catalog client.
//!
//! The catalog service only exposes single-item reads, so a batch is fanned
//! out as concurrent `GET /api/v1/audiobooks/{id}` requests and fanned back in.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use rust_decimal::Decimal;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Deserialize;
use tokio::{
    sync::Semaphore,
    task::JoinSet,
    time::{Instant, timeout, timeout_at},
};
use tracing::{debug, warn};

use crate::domain::catalog::{
    errors::CatalogError,
    lookup::{CatalogEntries, CatalogLookup},
    models::{AudiobookId, CatalogEntry},
};

/// Default bound on a single item request.
pub const DEFAULT_ITEM_TIMEOUT: Duration = Duration::from_secs(5);

/// Default bound on the whole fan-out.
pub const DEFAULT_BATCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Default number of in-flight item requests per batch.
pub const DEFAULT_MAX_CONCURRENCY: usize = 8;

/// Connection settings for the remote catalog service.
#[derive(Debug, Clone)]
pub struct HttpCatalogConfig {
    /// Catalog base URL, e.g. `"http://catalog:8000"`.
    pub base_url: String,

    /// Upper bound on one item request. An item that takes longer is
    /// unresolved.
    pub item_timeout: Duration,

    /// Upper bound on the whole batch lookup. Items still pending when it
    /// fires are unresolved.
    pub batch_timeout: Duration,

    /// Maximum concurrent item requests.
    pub max_concurrency: usize,
}

impl HttpCatalogConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            item_timeout: DEFAULT_ITEM_TIMEOUT,
            batch_timeout: DEFAULT_BATCH_TIMEOUT,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    config: HttpCatalogConfig,
    http: Client,
}

impl HttpCatalogClient {
    #[must_use]
    pub fn new(mut config: HttpCatalogConfig) -> Self {
        let trimmed = config.base_url.trim_end_matches('/').len();
        config.base_url.truncate(trimmed);

        Self {
            config,
            http: Client::new(),
        }
    }

    fn item_url(&self, id: AudiobookId) -> String {
        format!("{}/api/v1/audiobooks/{id}", self.config.base_url)
    }
}

#[async_trait]
impl CatalogLookup for HttpCatalogClient {
    async fn resolve(&self, ids: &[AudiobookId]) -> Result<CatalogEntries, CatalogError> {
        if ids.is_empty() {
            return Ok(FxHashMap::default());
        }

        let deadline = Instant::now() + self.config.batch_timeout;
        let item_timeout = self.config.item_timeout;
        let permits = Arc::new(Semaphore::new(self.config.max_concurrency.max(1)));
        let mut seen = FxHashSet::default();
        let mut tasks = JoinSet::new();

        for &id in ids {
            if !seen.insert(id) {
                continue;
            }

            let http = self.http.clone();
            let url = self.item_url(id);
            let permits = Arc::clone(&permits);

            tasks.spawn(async move {
                let _permit = permits.acquire_owned().await;

                let outcome = timeout(item_timeout, fetch_entry(&http, &url, id))
                    .await
                    .unwrap_or_else(|_elapsed| Err(CatalogError::Timeout(item_timeout)));

                (id, outcome)
            });
        }

        let mut entries = FxHashMap::default();
        let mut not_found = 0_usize;
        let mut failed = 0_usize;

        loop {
            let joined = match timeout_at(deadline, tasks.join_next()).await {
                Ok(Some(joined)) => joined,
                Ok(None) => break,
                Err(_elapsed) => {
                    let pending = tasks.len();
                    warn!(
                        pending,
                        timeout = ?self.config.batch_timeout,
                        "catalog batch deadline reached, treating pending items as unresolved"
                    );
                    tasks.abort_all();

                    if entries.is_empty() && not_found == 0 {
                        return Err(CatalogError::Timeout(self.config.batch_timeout));
                    }

                    break;
                }
            };

            match joined {
                Ok((id, Ok(Some(entry)))) => {
                    entries.insert(id, entry);
                }
                Ok((id, Ok(None))) => {
                    debug!(audiobook_id = %id, "audiobook not found in catalog");
                    not_found += 1;
                }
                Ok((id, Err(error))) => {
                    warn!(audiobook_id = %id, error = %error, "catalog lookup failed, treating item as unresolved");
                    failed += 1;
                }
                Err(error) => {
                    warn!(error = %error, "catalog lookup task did not complete");
                    failed += 1;
                }
            }
        }

        if entries.is_empty() && not_found == 0 && failed > 0 {
            return Err(CatalogError::AllLookupsFailed { attempted: failed });
        }

        Ok(entries)
    }
}

async fn fetch_entry(
    http: &Client,
    url: &str,
    id: AudiobookId,
) -> Result<Option<CatalogEntry>, CatalogError> {
    let response = http.get(url).send().await.map_err(CatalogError::Transport)?;

    match response.status() {
        StatusCode::NOT_FOUND => Ok(None),
        status if status.is_success() => {
            let payload: AudiobookPayload = response.json().await.map_err(CatalogError::Decode)?;

            Ok(Some(CatalogEntry {
                id,
                title: payload.title,
                unit_price: payload.price,
                available: payload.available,
            }))
        }
        status => Err(CatalogError::UnexpectedStatus(status.as_u16())),
    }
}

/// Subset of the catalog's audiobook representation this client relies on.
/// `price` may arrive as a JSON number or a decimal string.
#[derive(Debug, Deserialize)]
struct AudiobookPayload {
    title: String,
    price: Decimal,
    #[serde(default = "available_by_default")]
    available: bool,
}

const fn available_by_default() -> bool {
    true
}
