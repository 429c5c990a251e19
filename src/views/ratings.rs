use std::collections::HashMap;

use serde::Serialize;

use crate::data::model::Record;

pub const GOOD: &str = "Good";
pub const OUTSTANDING: &str = "Outstanding";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingCount {
    pub rating: String,
    pub count: usize,
    pub pct: f64,
}

/// Frequency table of overall ratings, most common first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RatingsSummary {
    pub rows: Vec<RatingCount>,
    /// Number of rated records the percentages are taken over.
    pub total: usize,
}

impl RatingsSummary {
    /// Percentage for one rating, `None` when it does not occur.
    pub fn pct_of(&self, rating: &str) -> Option<f64> {
        self.rows.iter().find(|r| r.rating == rating).map(|r| r.pct)
    }

    pub fn good_pct(&self) -> Option<f64> {
        self.pct_of(GOOD)
    }

    pub fn outstanding_pct(&self) -> Option<f64> {
        self.pct_of(OUTSTANDING)
    }
}

/// Display a looked-up percentage, `N/A` when the rating is absent.
pub fn format_pct(pct: Option<f64>) -> String {
    match pct {
        Some(p) => format!("{p:.1}%"),
        None => "N/A".to_string(),
    }
}

/// Records without a rating are not counted. Equal counts keep the order in
/// which the ratings first appear in the view.
pub fn build(view: &[&Record]) -> RatingsSummary {
    let mut position: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for rating in view.iter().filter_map(|r| r.rating.as_deref()) {
        match position.get(rating) {
            Some(&i) => counts[i].1 += 1,
            None => {
                position.insert(rating, counts.len());
                counts.push((rating, 1));
            }
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    let total: usize = counts.iter().map(|(_, n)| n).sum();
    let rows = counts
        .into_iter()
        .map(|(rating, count)| RatingCount {
            rating: rating.to_string(),
            count,
            pct: 100.0 * count as f64 / total as f64,
        })
        .collect();
    RatingsSummary { rows, total }
}
