use serde::Serialize;

use crate::data::model::Record;

/// Marker radius cap, in screen points.
pub const MAX_RADIUS: f64 = 10.0;
/// Initial map centre `(lat, lon)`: the middle of England.
pub const DEFAULT_CENTER: (f64, f64) = (52.5, -1.5);
/// Initial extent `(lat, lon)` in degrees, about what a zoom-6 web map shows.
pub const DEFAULT_SPAN: (f64, f64) = (8.0, 20.0);

/// One location marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPoint {
    pub lat: f64,
    pub lon: f64,
    pub radius: f64,
    pub label: String,
    /// Carried so markers can be coloured by rating.
    pub rating: Option<String>,
}

/// Larger homes get larger markers, up to [`MAX_RADIUS`].
pub fn marker_radius(beds: f64) -> f64 {
    (beds / 10.0).min(MAX_RADIUS)
}

fn label(rec: &Record) -> String {
    let name = rec
        .location_name
        .as_deref()
        .or(rec.location_id.as_deref())
        .unwrap_or("Unnamed location");
    if rec.beds.fract() == 0.0 {
        format!("{name} ({:.0} beds)", rec.beds)
    } else {
        format!("{name} ({} beds)", rec.beds)
    }
}

/// Records without both coordinates are skipped.
pub fn build(view: &[&Record]) -> Vec<MapPoint> {
    view.iter()
        .filter_map(|rec| {
            let (lat, lon) = rec.coordinates()?;
            Some(MapPoint {
                lat,
                lon,
                radius: marker_radius(rec.beds),
                label: label(rec),
                rating: rec.rating.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::record;

    fn located(beds: f64, lat: Option<f64>, lon: Option<f64>) -> Record {
        let mut rec = record("A", beds, Some("Good"));
        rec.location_name = Some("Oak House".into());
        rec.latitude = lat;
        rec.longitude = lon;
        rec
    }

    #[test]
    fn half_located_records_are_skipped() {
        let recs = vec![
            located(40.0, None, Some(51.5)),
            located(40.0, Some(51.5), None),
            located(40.0, Some(53.8), Some(-1.55)),
        ];
        let view: Vec<&Record> = recs.iter().collect();
        let points = build(&view);
        assert_eq!(points.len(), 1);
        assert_eq!((points[0].lat, points[0].lon), (53.8, -1.55));
        assert_eq!(points[0].label, "Oak House (40 beds)");
        assert_eq!(points[0].rating.as_deref(), Some("Good"));
    }

    #[test]
    fn radius_is_capped() {
        assert_eq!(marker_radius(0.0), 0.0);
        assert_eq!(marker_radius(45.0), 4.5);
        assert_eq!(marker_radius(100.0), 10.0);
        assert_eq!(marker_radius(250.0), MAX_RADIUS);
    }

    #[test]
    fn label_falls_back_to_location_id() {
        let mut rec = located(12.5, Some(1.0), Some(1.0));
        rec.location_name = None;
        rec.location_id = Some("1-123".into());
        assert_eq!(label(&rec), "1-123 (12.5 beds)");
        rec.location_id = None;
        assert_eq!(label(&rec), "Unnamed location (12.5 beds)");
    }

    #[test]
    fn empty_view_has_no_points() {
        assert!(build(&[]).is_empty());
    }
}
