use std::collections::BTreeSet;

use super::model::{Dataset, Record};

// ---------------------------------------------------------------------------
// Filter criteria: what the sidebar controls currently select
// ---------------------------------------------------------------------------

/// The user's filter selection.
///
/// `None` for brand or local authority means "All". The bed range is
/// inclusive on both ends; a range with `min > max` matches nothing.
/// An empty rating set matches nothing, and a record without a rating
/// never matches.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterCriteria {
    pub brand: Option<String>,
    pub local_authority: Option<String>,
    pub bed_range: (i64, i64),
    pub ratings: BTreeSet<String>,
}

impl FilterCriteria {
    /// Show everything: no brand or authority constraint, the dataset's full
    /// bed range and every rating it contains.
    pub fn for_dataset(dataset: &Dataset) -> Self {
        FilterCriteria {
            brand: None,
            local_authority: None,
            bed_range: dataset.bed_bounds.unwrap_or((0, 0)),
            ratings: dataset.ratings.iter().cloned().collect(),
        }
    }

    /// Whether a single record passes every predicate.
    pub fn matches(&self, rec: &Record) -> bool {
        if let Some(brand) = &self.brand {
            if rec.brand != *brand {
                return false;
            }
        }
        if let Some(la) = &self.local_authority {
            if rec.local_authority.as_ref() != Some(la) {
                return false;
            }
        }
        let (min, max) = self.bed_range;
        if rec.beds < min as f64 || rec.beds > max as f64 {
            return false;
        }
        match &rec.rating {
            Some(rating) => self.ratings.contains(rating),
            None => false,
        }
    }
}

/// Return indices of records that pass the criteria, in dataset order.
pub fn filtered_indices(dataset: &Dataset, criteria: &FilterCriteria) -> Vec<usize> {
    let (min, max) = criteria.bed_range;
    if criteria.ratings.is_empty() || min > max {
        return Vec::new();
    }
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| criteria.matches(rec))
        .map(|(i, _)| i)
        .collect()
}
