use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;

use crate::color::ColorMap;
use crate::data::cache::DatasetCache;
use crate::data::error::LoadError;
use crate::data::filter::{filtered_indices, FilterCriteria};
use crate::data::loader::DataSource;
use crate::data::model::Dataset;
use crate::views::DashboardViews;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Overview,
    Ratings,
    Activity,
    Map,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Overview, Tab::Ratings, Tab::Activity, Tab::Map];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Overview => "🏢 Brand Overview",
            Tab::Ratings => "⭐ Ratings",
            Tab::Activity => "📅 Inspection Activity",
            Tab::Map => "🗺 Map View",
        }
    }
}

/// Status line content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The filters match nothing; the views are empty but valid.
    Warning(String),
    /// Loading or exporting failed.
    Error(String),
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Where the dataset comes from.
    pub source: DataSource,
    pub timeout: Duration,
    pub cache: DatasetCache,

    /// Loaded dataset (None until a load succeeds).
    pub dataset: Option<Arc<Dataset>>,

    /// Current sidebar selection.
    pub criteria: FilterCriteria,

    /// Indices of records passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    /// The four views for `visible_indices` (cached).
    pub views: Option<DashboardViews>,

    /// Marker colours by rating.
    pub color_map: Option<ColorMap>,

    pub tab: Tab,

    pub notice: Option<Notice>,
}

impl AppState {
    pub fn new(source: DataSource, timeout: Duration) -> Self {
        Self {
            source,
            timeout,
            cache: DatasetCache::new(),
            dataset: None,
            criteria: FilterCriteria::default(),
            visible_indices: Vec::new(),
            views: None,
            color_map: None,
            tab: Tab::default(),
            notice: None,
        }
    }

    /// Load the current source through the cache.
    pub fn load(&mut self) {
        match self.cache.get_or_load(&self.source, self.timeout) {
            Ok(dataset) => self.set_dataset(dataset),
            Err(e) => {
                let source = self.source.clone();
                self.load_failed(&source, &e);
            }
        }
    }

    fn load_failed(&mut self, source: &DataSource, e: &LoadError) {
        log::error!("Failed to load {source}: {e}");
        let detail = std::error::Error::source(e)
            .map(|s| format!(": {s}"))
            .unwrap_or_default();
        self.notice = Some(Notice::Error(format!("Load failed: {e}{detail}")));
    }

    /// Drop the cached copy of the current source and fetch it again.
    pub fn reload(&mut self) {
        self.cache.invalidate(&self.source);
        self.load();
    }

    /// Forget every cached source. The loaded dataset stays on screen.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Switch to another source (e.g. a local snapshot) and load it.
    /// The current source is kept when the new one fails to load.
    pub fn open_source(&mut self, source: DataSource) {
        match self.cache.get_or_load(&source, self.timeout) {
            Ok(dataset) => {
                self.source = source;
                self.set_dataset(dataset);
            }
            Err(e) => self.load_failed(&source, &e),
        }
    }

    /// Ingest a newly loaded dataset and reset the filters to show everything.
    fn set_dataset(&mut self, dataset: Arc<Dataset>) {
        self.criteria = FilterCriteria::for_dataset(&dataset);
        self.color_map = Some(ColorMap::new(&dataset.ratings));
        self.dataset = Some(dataset);
        self.notice = None;
        self.refilter();
    }

    /// Recompute `visible_indices` and every view after a filter change.
    pub fn refilter(&mut self) {
        let Some(ds) = &self.dataset else {
            return;
        };
        self.visible_indices = filtered_indices(ds, &self.criteria);
        self.views = Some(DashboardViews::build(ds, &self.visible_indices));

        let empty = self.visible_indices.is_empty() && !ds.is_empty();
        let warned = matches!(self.notice, Some(Notice::Warning(_)));
        if empty && (warned || self.notice.is_none()) {
            log::warn!("No locations match the current filters: {:?}", self.criteria);
            self.notice = Some(Notice::Warning(
                "No locations match the current filters".to_string(),
            ));
        } else if !empty && warned {
            self.notice = None;
        }
    }

    pub fn set_brand(&mut self, brand: Option<String>) {
        self.criteria.brand = brand;
        self.refilter();
    }

    pub fn set_local_authority(&mut self, local_authority: Option<String>) {
        self.criteria.local_authority = local_authority;
        self.refilter();
    }

    pub fn set_bed_range(&mut self, min: i64, max: i64) {
        self.criteria.bed_range = (min, max);
        self.refilter();
    }

    /// Toggle a single rating in the multi-select.
    pub fn toggle_rating(&mut self, rating: &str) {
        if !self.criteria.ratings.remove(rating) {
            self.criteria.ratings.insert(rating.to_string());
        }
        self.refilter();
    }

    /// Select every rating in the dataset.
    pub fn select_all_ratings(&mut self) {
        if let Some(ds) = &self.dataset {
            self.criteria.ratings = ds.ratings.iter().cloned().collect();
            self.refilter();
        }
    }

    /// Deselect all ratings.
    pub fn select_no_ratings(&mut self) {
        self.criteria.ratings.clear();
        self.refilter();
    }

    /// Back to the load-time selection.
    pub fn reset_filters(&mut self) {
        if let Some(ds) = &self.dataset {
            self.criteria = FilterCriteria::for_dataset(ds);
            self.refilter();
        }
    }

    /// Write the current views as pretty JSON.
    pub fn export_views(&self, path: &Path) -> anyhow::Result<()> {
        let views = self.views.as_ref().context("no dataset loaded")?;
        let json = serde_json::to_string_pretty(views).context("serializing views")?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        log::info!("Exported views to {}", path.display());
        Ok(())
    }
}
