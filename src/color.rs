use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

/// Conventional colours for the regulator's four overall ratings.
fn standard_color(rating: &str) -> Option<Color32> {
    match rating {
        "Outstanding" => Some(Color32::from_rgb(0x1f, 0x77, 0xb4)),
        "Good" => Some(Color32::from_rgb(0x2c, 0xa0, 0x2c)),
        "Requires improvement" => Some(Color32::from_rgb(0xff, 0x99, 0x00)),
        "Inadequate" => Some(Color32::from_rgb(0xd6, 0x27, 0x28)),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Color mapping: rating → Color32
// ---------------------------------------------------------------------------

/// Maps overall ratings to marker colours. The four standard ratings keep
/// fixed colours; anything else gets a generated hue.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map from the dataset's distinct ratings.
    pub fn new(ratings: &[String]) -> Self {
        let others: Vec<&String> = ratings
            .iter()
            .filter(|r| standard_color(r).is_none())
            .collect();
        let palette = generate_palette(others.len());
        let mut mapping: BTreeMap<String, Color32> = others
            .into_iter()
            .zip(palette)
            .map(|(r, c)| (r.clone(), c))
            .collect();
        for rating in ratings {
            if let Some(c) = standard_color(rating) {
                mapping.insert(rating.clone(), c);
            }
        }

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a rating; unrated locations are grey.
    pub fn color_for(&self, rating: Option<&str>) -> Color32 {
        rating
            .and_then(|r| self.mapping.get(r))
            .copied()
            .unwrap_or(self.default_color)
    }

    /// Return the legend entries (rating → colour) for the UI.
    pub fn legend_entries(&self) -> Vec<(String, Color32)> {
        self.mapping
            .iter()
            .map(|(r, c): (&String, &Color32)| (r.clone(), *c))
            .collect()
    }
}
