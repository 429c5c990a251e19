use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use super::error::LoadError;
use super::loader::{self, DataSource};
use super::model::Dataset;

/// Process-wide memo of loaded datasets, keyed by source.
///
/// A source is fetched at most once until [`DatasetCache::invalidate`] or
/// [`DatasetCache::clear`] is called. Failed loads are not remembered.
/// Cached datasets are handed out as shared, read-only snapshots.
#[derive(Debug, Default)]
pub struct DatasetCache {
    entries: Mutex<HashMap<DataSource, Arc<Dataset>>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<DataSource, Arc<Dataset>>> {
        // Entries are only ever inserted whole, so a poisoned map is still consistent.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Return the cached dataset for `source`, loading it on first access.
    pub fn get_or_load(
        &self,
        source: &DataSource,
        timeout: Duration,
    ) -> Result<Arc<Dataset>, LoadError> {
        self.get_or_load_with(source, |s| loader::load(s, timeout))
    }

    /// As [`get_or_load`](Self::get_or_load) with a caller-supplied loader.
    pub fn get_or_load_with<F>(&self, source: &DataSource, load: F) -> Result<Arc<Dataset>, LoadError>
    where
        F: FnOnce(&DataSource) -> Result<Dataset, LoadError>,
    {
        let mut entries = self.entries();
        if let Some(hit) = entries.get(source) {
            log::debug!("Dataset cache hit for {source}");
            return Ok(Arc::clone(hit));
        }
        let dataset = Arc::new(load(source)?);
        entries.insert(source.clone(), Arc::clone(&dataset));
        Ok(dataset)
    }

    /// Forget one source. Returns whether it was cached.
    pub fn invalidate(&self, source: &DataSource) -> bool {
        let removed = self.entries().remove(source).is_some();
        if removed {
            log::info!("Invalidated cached dataset for {source}");
        }
        removed
    }

    /// Forget every source.
    pub fn clear(&self) {
        let mut entries = self.entries();
        log::info!("Clearing {} cached dataset(s)", entries.len());
        entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
