use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::data::model::Record;

/// Providers with at most this many beds in total are "small".
pub const SMALL_PROVIDER_MAX_BEDS: f64 = 20.0;
/// Providers above the small bound and up to this many beds are "medium".
pub const MEDIUM_PROVIDER_MAX_BEDS: f64 = 100.0;
/// Length of the brand ranking.
pub const TOP_BRANDS: usize = 10;

/// Headline numbers for the brand overview tab.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    /// Sum of beds, fractional part truncated.
    pub total_beds: i64,
    pub providers: usize,
    pub locations: usize,
    pub segments: ProviderSegments,
    /// Ranked over the whole dataset, not the filtered view.
    pub top_brands: Vec<BrandShare>,
}

/// Provider counts by the provider's own total beds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProviderSegments {
    /// ≤ 20 beds
    pub small: usize,
    /// 21–100 beds
    pub medium: usize,
    /// > 100 beds
    pub large: usize,
}

impl ProviderSegments {
    pub fn total(&self) -> usize {
        self.small + self.medium + self.large
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrandShare {
    pub brand: String,
    pub beds: f64,
    /// Percentage of the dataset's total beds.
    pub market_share_pct: f64,
}

pub fn build(view: &[&Record], all: &[&Record]) -> Overview {
    let total_beds: f64 = view.iter().map(|r| r.beds).sum();

    let locations: HashSet<&str> = view
        .iter()
        .filter_map(|r| r.location_id.as_deref())
        .collect();

    let mut provider_beds: BTreeMap<&str, f64> = BTreeMap::new();
    for rec in view {
        if let Some(provider) = rec.provider.as_deref() {
            *provider_beds.entry(provider).or_default() += rec.beds;
        }
    }

    let mut segments = ProviderSegments::default();
    for &beds in provider_beds.values() {
        if beds <= SMALL_PROVIDER_MAX_BEDS {
            segments.small += 1;
        } else if beds <= MEDIUM_PROVIDER_MAX_BEDS {
            segments.medium += 1;
        } else {
            segments.large += 1;
        }
    }

    let mut top_brands = brand_shares(all);
    top_brands.truncate(TOP_BRANDS);

    Overview {
        total_beds: total_beds as i64,
        providers: provider_beds.len(),
        locations: locations.len(),
        segments,
        top_brands,
    }
}

/// Every brand's beds and market share, largest first. Brands are grouped
/// in name order and then stably sorted, so equal totals stay alphabetical.
pub fn brand_shares(records: &[&Record]) -> Vec<BrandShare> {
    let mut by_brand: BTreeMap<&str, f64> = BTreeMap::new();
    for rec in records {
        *by_brand.entry(rec.brand.as_str()).or_default() += rec.beds;
    }
    let grand_total: f64 = by_brand.values().sum();

    let mut shares: Vec<BrandShare> = by_brand
        .into_iter()
        .map(|(brand, beds)| BrandShare {
            brand: brand.to_string(),
            beds,
            market_share_pct: if grand_total > 0.0 {
                100.0 * beds / grand_total
            } else {
                0.0
            },
        })
        .collect();
    shares.sort_by(|a, b| b.beds.total_cmp(&a.beds));
    shares
}
