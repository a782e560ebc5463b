use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::Result;
use crate::model::{Continent, Country};
use crate::storage;

use super::CountryProvider;

/// Caching decorator over a [`CountryProvider`].
///
/// Keeps a continent-keyed map of country lists, loaded from a snapshot file
/// at construction and rewritten wholesale on every addition. Entries are
/// only ever added; nothing is updated or evicted.
#[derive(Debug)]
pub struct CachingCountryProvider {
    inner: Box<dyn CountryProvider>,
    snapshot_path: PathBuf,
    cached: Mutex<HashMap<Continent, Vec<Country>>>,
}

impl CachingCountryProvider {
    /// A missing or unreadable snapshot degrades silently to a cold cache;
    /// construction never fails.
    pub fn new(inner: Box<dyn CountryProvider>, snapshot_path: PathBuf) -> Self {
        let cached = storage::load_snapshot(&snapshot_path);
        if !cached.is_empty() {
            info!(
                continents = cached.len(),
                path = %snapshot_path.display(),
                "loaded country cache snapshot"
            );
        }

        Self { inner, snapshot_path, cached: Mutex::new(cached) }
    }
}

#[async_trait]
impl CountryProvider for CachingCountryProvider {
    async fn countries_by_continent(&self, continent: Continent) -> Result<Vec<Country>> {
        // The lock spans the whole check-then-fetch-then-insert sequence, so
        // concurrent callers cannot trigger duplicate upstream fetches.
        let mut cached = self.cached.lock().await;

        if let Some(countries) = cached.get(&continent) {
            debug!(%continent, count = countries.len(), "country cache hit");
            return Ok(countries.clone());
        }

        let countries = self.inner.countries_by_continent(continent).await?;

        cached.insert(continent, countries.clone());
        storage::store_snapshot(&self.snapshot_path, &cached)?;
        debug!(%continent, count = countries.len(), "country cache miss resolved and persisted");

        Ok(countries)
    }
}
