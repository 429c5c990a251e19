use std::collections::BTreeSet;

use chrono::NaiveDate;

// ---------------------------------------------------------------------------
// Source columns
// ---------------------------------------------------------------------------

pub const COL_BRAND: &str = "Brand Name";
pub const COL_PROVIDER: &str = "Provider Name";
pub const COL_LOCATION_ID: &str = "Location ID";
pub const COL_LOCATION_NAME: &str = "Location Name";
pub const COL_LOCAL_AUTHORITY: &str = "Location Local Authority";
pub const COL_DIRECTORATE: &str = "Location Inspection Directorate";
pub const COL_BEDS: &str = "Care homes beds";
pub const COL_RATING: &str = "Location Latest Overall Rating";
pub const COL_PUBLICATION_DATE: &str = "Publication Date";
pub const COL_LATITUDE: &str = "Location Latitude";
pub const COL_LONGITUDE: &str = "Location Longitude";

/// Every column the loader requires, in source order.
pub const REQUIRED_COLUMNS: [&str; 11] = [
    COL_BRAND,
    COL_PROVIDER,
    COL_LOCATION_ID,
    COL_LOCATION_NAME,
    COL_LOCAL_AUTHORITY,
    COL_DIRECTORATE,
    COL_BEDS,
    COL_RATING,
    COL_PUBLICATION_DATE,
    COL_LATITUDE,
    COL_LONGITUDE,
];

/// The only directorate kept after load.
pub const ADULT_SOCIAL_CARE: &str = "Adult social care";

// ---------------------------------------------------------------------------
// Record – one row of the source sheet
// ---------------------------------------------------------------------------

/// A single care-home location as published by the regulator.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub brand: String,
    pub provider: Option<String>,
    pub location_id: Option<String>,
    pub location_name: Option<String>,
    pub local_authority: Option<String>,
    /// Always [`ADULT_SOCIAL_CARE`] once the loader has run.
    pub directorate: String,
    pub beds: f64,
    pub rating: Option<String>,
    pub publication_date: Option<NaiveDate>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Record {
    /// Both coordinates, if the row carries them.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.latitude?, self.longitude?))
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded sheet
// ---------------------------------------------------------------------------

/// The loaded, cleaned dataset with pre-computed option lists for the
/// filter controls. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub records: Vec<Record>,
    /// Sorted distinct brand names.
    pub brands: Vec<String>,
    /// Sorted distinct local authorities (nulls excluded).
    pub local_authorities: Vec<String>,
    /// Sorted distinct overall ratings (nulls excluded).
    pub ratings: Vec<String>,
    /// Integer bed bounds `(floor(min), ceil(max))`, `None` for an empty dataset.
    pub bed_bounds: Option<(i64, i64)>,
}

impl Dataset {
    /// Build the option lists from the cleaned records.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut brands = BTreeSet::new();
        let mut local_authorities = BTreeSet::new();
        let mut ratings = BTreeSet::new();
        let mut bed_bounds: Option<(f64, f64)> = None;

        for rec in &records {
            brands.insert(rec.brand.clone());
            if let Some(la) = &rec.local_authority {
                local_authorities.insert(la.clone());
            }
            if let Some(r) = &rec.rating {
                ratings.insert(r.clone());
            }
            bed_bounds = Some(match bed_bounds {
                None => (rec.beds, rec.beds),
                Some((lo, hi)) => (lo.min(rec.beds), hi.max(rec.beds)),
            });
        }

        Dataset {
            records,
            brands: brands.into_iter().collect(),
            local_authorities: local_authorities.into_iter().collect(),
            ratings: ratings.into_iter().collect(),
            bed_bounds: bed_bounds.map(|(lo, hi)| (lo.floor() as i64, hi.ceil() as i64)),
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Resolve filter indices back into records, preserving order.
    pub fn view<'a>(&'a self, indices: &[usize]) -> Vec<&'a Record> {
        indices.iter().filter_map(|&i| self.records.get(i)).collect()
    }

    /// Every record, in dataset order.
    pub fn all(&self) -> Vec<&Record> {
        self.records.iter().collect()
    }
}

#[cfg(test)]
pub(crate) fn record(brand: &str, beds: f64, rating: Option<&str>) -> Record {
    Record {
        brand: brand.to_string(),
        provider: Some(format!("{brand} Care Ltd")),
        location_id: Some(format!("1-{brand}-{beds}")),
        location_name: Some(format!("{brand} House")),
        local_authority: Some("Leeds".to_string()),
        directorate: ADULT_SOCIAL_CARE.to_string(),
        beds,
        rating: rating.map(str::to_string),
        publication_date: None,
        latitude: None,
        longitude: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_lists_are_sorted_and_distinct() {
        let mut a = record("Zeta", 12.0, Some("Good"));
        a.local_authority = Some("York".into());
        let b = record("Alpha", 40.7, Some("Outstanding"));
        let c = record("Alpha", 3.0, None);

        let ds = Dataset::from_records(vec![a, b, c]);
        assert_eq!(ds.brands, vec!["Alpha", "Zeta"]);
        assert_eq!(ds.local_authorities, vec!["Leeds", "York"]);
        assert_eq!(ds.ratings, vec!["Good", "Outstanding"]);
        assert_eq!(ds.bed_bounds, Some((3, 41)));
    }

    #[test]
    fn empty_dataset_has_no_bounds() {
        let ds = Dataset::from_records(Vec::new());
        assert!(ds.is_empty());
        assert_eq!(ds.bed_bounds, None);
    }

    #[test]
    fn view_preserves_index_order() {
        let ds = Dataset::from_records(vec![
            record("A", 1.0, None),
            record("B", 2.0, None),
            record("C", 3.0, None),
        ]);
        let picked: Vec<&str> = ds.view(&[0, 2]).iter().map(|r| r.brand.as_str()).collect();
        assert_eq!(picked, vec!["A", "C"]);
    }
}
