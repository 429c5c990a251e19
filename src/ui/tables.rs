use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;
use crate::views::ratings::format_pct;
use crate::views::DashboardViews;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// `1234567` → `"1,234,567"`.
pub fn thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn metric(ui: &mut Ui, label: &str, value: &str) {
    ui.vertical(|ui: &mut Ui| {
        ui.label(RichText::new(label).weak());
        ui.label(RichText::new(value).size(28.0).strong());
    });
}

fn with_views(ui: &mut Ui, state: &AppState, body: impl FnOnce(&mut Ui, &DashboardViews)) {
    match &state.views {
        Some(views) => body(ui, views),
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("No dataset loaded  (File → Reload or Open local snapshot…)");
            });
        }
    }
}

// ---------------------------------------------------------------------------
// Brand overview tab
// ---------------------------------------------------------------------------

pub fn overview_tab(ui: &mut Ui, state: &AppState) {
    with_views(ui, state, |ui, views| {
        let o = &views.overview;
        ui.heading("🏢 Brand & Provider Overview");
        ui.add_space(8.0);

        ui.horizontal(|ui: &mut Ui| {
            metric(ui, "Total Beds", &thousands(o.total_beds));
            ui.add_space(32.0);
            metric(ui, "Total Providers", &thousands(o.providers as i64));
            ui.add_space(32.0);
            metric(ui, "Total Locations", &thousands(o.locations as i64));
        });
        ui.add_space(12.0);

        ui.strong(format!(
            "Provider Segmentation by Bed Count ({} providers)",
            o.segments.total()
        ));
        ui.label(format!("🔹 ≤20 beds: {}", o.segments.small));
        ui.label(format!("🔹 21–100 beds: {}", o.segments.medium));
        ui.label(format!("🔹 >100 beds: {}", o.segments.large));
        ui.add_space(12.0);

        ui.strong("Top 10 Brands by Bed Share");
        ui.push_id("top_brands", |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .column(Column::auto().at_least(40.0))
                .column(Column::auto().at_least(220.0))
                .column(Column::auto().at_least(100.0))
                .column(Column::remainder())
                .header(22.0, |mut header| {
                    for title in ["#", "Brand Name", "Care homes beds", "Market Share (%)"] {
                        header.col(|ui| {
                            ui.strong(title);
                        });
                    }
                })
                .body(|mut body| {
                    for (rank, brand) in o.top_brands.iter().enumerate() {
                        body.row(20.0, |mut row| {
                            row.col(|ui| {
                                ui.label((rank + 1).to_string());
                            });
                            row.col(|ui| {
                                ui.label(&brand.brand);
                            });
                            row.col(|ui| {
                                ui.label(thousands(brand.beds as i64));
                            });
                            row.col(|ui| {
                                ui.label(format!("{:.2}", brand.market_share_pct));
                            });
                        });
                    }
                });
        });
    });
}

// ---------------------------------------------------------------------------
// Ratings tab
// ---------------------------------------------------------------------------

pub fn ratings_tab(ui: &mut Ui, state: &AppState) {
    with_views(ui, state, |ui, views| {
        let r = &views.ratings;
        ui.heading("⭐ Rating Overview");
        ui.add_space(8.0);

        ui.horizontal(|ui: &mut Ui| {
            metric(ui, "% Good", &format_pct(r.good_pct()));
            ui.add_space(32.0);
            metric(ui, "% Outstanding", &format_pct(r.outstanding_pct()));
        });
        ui.add_space(12.0);

        if r.rows.is_empty() {
            ui.label("No rated locations in the current selection.");
            return;
        }

        ui.push_id("ratings_table", |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .column(Column::auto().at_least(200.0))
                .column(Column::auto().at_least(80.0))
                .column(Column::remainder())
                .header(22.0, |mut header| {
                    for title in ["Rating", "Count", "%"] {
                        header.col(|ui| {
                            ui.strong(title);
                        });
                    }
                })
                .body(|mut body| {
                    for row_data in &r.rows {
                        body.row(20.0, |mut row| {
                            let color = state
                                .color_map
                                .as_ref()
                                .map(|cm| cm.color_for(Some(row_data.rating.as_str())));
                            row.col(|ui| {
                                let mut text = RichText::new(&row_data.rating);
                                if let Some(c) = color {
                                    text = text.color(c);
                                }
                                ui.label(text);
                            });
                            row.col(|ui| {
                                ui.label(row_data.count.to_string());
                            });
                            row.col(|ui| {
                                ui.label(format!("{:.1}", row_data.pct));
                            });
                        });
                    }
                });
        });
        ui.label(
            RichText::new(format!("{} rated locations", thousands(r.total as i64))).weak(),
        );
    });
}
