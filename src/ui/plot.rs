use std::collections::BTreeMap;

use eframe::egui::{Color32, RichText, Ui};
use egui_plot::{Legend, Line, Plot, PlotPoint, PlotPoints, Points};

use crate::state::AppState;
use crate::views::activity::Month;
use crate::views::map::{MapPoint, DEFAULT_CENTER, DEFAULT_SPAN};

fn no_data(ui: &mut Ui, message: &str) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.heading(message);
    });
}

// ---------------------------------------------------------------------------
// Inspection activity (line chart)
// ---------------------------------------------------------------------------

/// Monthly publication counts as a line chart.
pub fn activity_chart(ui: &mut Ui, state: &AppState) {
    let Some(views) = &state.views else {
        no_data(ui, "No dataset loaded");
        return;
    };
    ui.heading("📅 Recent Inspection Activity");

    if views.activity.is_empty() {
        no_data(ui, "No dated inspections in the current selection");
        return;
    }

    let points: PlotPoints = views
        .activity
        .iter()
        .map(|m| [m.month.ordinal() as f64, m.count as f64])
        .collect();

    Plot::new("activity_plot")
        .legend(Legend::default())
        .x_axis_label("Month")
        .y_axis_label("Publications")
        .x_axis_formatter(|mark, _range| {
            if mark.value.fract() == 0.0 {
                Month::from_ordinal(mark.value as i64).to_string()
            } else {
                String::new()
            }
        })
        .label_formatter(|_name, value: &PlotPoint| {
            let month = Month::from_ordinal(value.x.round() as i64);
            format!("{month}: {:.0}", value.y)
        })
        .include_y(0.0)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(points)
                    .name("Inspections")
                    .color(Color32::LIGHT_BLUE)
                    .width(2.0),
            );
        });
}

// ---------------------------------------------------------------------------
// Location map (marker scatter)
// ---------------------------------------------------------------------------

/// One marker per located home, sized by beds and coloured by rating.
/// Longitude is x, latitude is y.
pub fn location_map(ui: &mut Ui, state: &AppState) {
    let Some(views) = &state.views else {
        no_data(ui, "No dataset loaded");
        return;
    };
    ui.heading("🗺 Map of Locations");
    ui.horizontal_wrapped(|ui: &mut Ui| {
        ui.label(
            RichText::new(format!("{} located homes", views.map.len())).weak(),
        );
        if let Some(cm) = &state.color_map {
            for (rating, color) in cm.legend_entries() {
                ui.label(RichText::new(format!("● {rating}")).color(color));
            }
        }
    });

    // Hover shows the nearest marker's label.
    let markers: &[MapPoint] = &views.map;
    let (lat0, lon0) = DEFAULT_CENTER;
    let (lat_span, lon_span) = DEFAULT_SPAN;

    Plot::new("location_map")
        .legend(Legend::default())
        .data_aspect(lat0.to_radians().cos() as f32)
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .include_x(lon0 - lon_span / 2.0)
        .include_x(lon0 + lon_span / 2.0)
        .include_y(lat0 - lat_span / 2.0)
        .include_y(lat0 + lat_span / 2.0)
        .label_formatter(move |_name, value: &PlotPoint| nearest_label(markers, value))
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for group in marker_groups(markers) {
                let color = state
                    .color_map
                    .as_ref()
                    .map(|cm| cm.color_for(group.rating))
                    .unwrap_or(Color32::LIGHT_BLUE);
                // Groups sharing a rating share one legend entry.
                plot_ui.points(
                    Points::new(group.positions)
                        .name(group.rating.unwrap_or(NOT_RATED))
                        .color(color.gamma_multiply(0.6))
                        .filled(true)
                        .radius(group.radius as f32),
                );
            }
        });
}

const NOT_RATED: &str = "Not rated";

/// Markers drawn as one plot series: same rating, same whole-point radius.
#[derive(Debug, PartialEq)]
struct MarkerGroup<'a> {
    rating: Option<&'a str>,
    radius: u32,
    /// `[lon, lat]` pairs.
    positions: Vec<[f64; 2]>,
}

fn marker_groups(markers: &[MapPoint]) -> Vec<MarkerGroup<'_>> {
    let mut groups: BTreeMap<(Option<&str>, u32), Vec<[f64; 2]>> = BTreeMap::new();
    for m in markers {
        let radius = m.radius.max(1.0).round() as u32;
        groups
            .entry((m.rating.as_deref(), radius))
            .or_default()
            .push([m.lon, m.lat]);
    }
    groups
        .into_iter()
        .map(|((rating, radius), positions)| MarkerGroup {
            rating,
            radius,
            positions,
        })
        .collect()
}

fn nearest_label(markers: &[MapPoint], value: &PlotPoint) -> String {
    let nearest = markers.iter().min_by(|a, b| {
        let da = (a.lon - value.x).powi(2) + (a.lat - value.y).powi(2);
        let db = (b.lon - value.x).powi(2) + (b.lat - value.y).powi(2);
        da.total_cmp(&db)
    });
    match nearest {
        Some(m) => format!(
            "{}\n{}",
            m.label,
            m.rating.as_deref().unwrap_or(NOT_RATED)
        ),
        None => format!("{:.3}, {:.3}", value.y, value.x),
    }
}
