//! View builders: pure transforms from a filtered view to display data.
//!
//! ```text
//!   Dataset ──filter──▶ filtered view (Vec<&Record>)
//!                              │
//!        ┌──────────────┬──────┴───────┬──────────────┐
//!        ▼              ▼              ▼              ▼
//!    overview        ratings        activity         map
//!  (+ whole dataset
//!   for the brand
//!   ranking)
//! ```

pub mod activity;
pub mod map;
pub mod overview;
pub mod ratings;

use serde::Serialize;

use crate::data::model::Dataset;

/// All four views for one filter selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardViews {
    pub records: usize,
    pub overview: overview::Overview,
    pub ratings: ratings::RatingsSummary,
    pub activity: Vec<activity::MonthlyCount>,
    pub map: Vec<map::MapPoint>,
}

impl DashboardViews {
    /// Run every builder over the records at `indices`.
    pub fn build(dataset: &Dataset, indices: &[usize]) -> Self {
        let view = dataset.view(indices);
        let all = dataset.all();
        DashboardViews {
            records: view.len(),
            overview: overview::build(&view, &all),
            ratings: ratings::build(&view),
            activity: activity::build(&view),
            map: map::build(&view),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{filtered_indices, FilterCriteria};
    use crate::data::model::record;

    #[test]
    fn empty_selection_builds_empty_views() {
        let ds = Dataset::from_records(vec![
            record("A", 30.0, Some("Good")),
            record("B", 10.0, Some("Outstanding")),
        ]);
        let mut criteria = FilterCriteria::for_dataset(&ds);
        criteria.ratings.clear();

        let views = DashboardViews::build(&ds, &filtered_indices(&ds, &criteria));
        assert_eq!(views.records, 0);
        assert_eq!(views.overview.total_beds, 0);
        assert_eq!(views.overview.segments.total(), 0);
        // the brand ranking still covers the whole dataset
        assert_eq!(views.overview.top_brands.len(), 2);
        assert!(views.ratings.rows.is_empty());
        assert!(views.activity.is_empty());
        assert!(views.map.is_empty());
    }

    #[test]
    fn serializes_to_json() {
        let ds = Dataset::from_records(vec![record("A", 30.0, Some("Good"))]);
        let views = DashboardViews::build(&ds, &[0]);
        let json = serde_json::to_value(&views).expect("json");
        assert_eq!(json["overview"]["total_beds"], 30);
        assert_eq!(json["ratings"]["rows"][0]["rating"], "Good");
    }
}
