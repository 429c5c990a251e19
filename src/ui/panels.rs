use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::loader::DataSource;
use crate::state::{AppState, Notice, Tab};

const ALL: &str = "All";

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    // ---- Banner ----
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(RichText::new("LFA").size(40.0).strong().color(Color32::RED));
        ui.label(RichText::new("❤").size(28.0).color(Color32::RED));
    });
    ui.add_space(4.0);

    ui.heading("🔍 Filters");
    ui.separator();

    let dataset = match &state.dataset {
        Some(ds) => ds.clone(),
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Brand ----
            ui.strong("Brand (optional)");
            if let Some(choice) =
                optional_combo(ui, "brand", state.criteria.brand.as_deref(), &dataset.brands)
            {
                state.set_brand(choice);
            }
            ui.add_space(6.0);

            // ---- Local authority ----
            ui.strong("Local Authority (optional)");
            if let Some(choice) = optional_combo(
                ui,
                "local_authority",
                state.criteria.local_authority.as_deref(),
                &dataset.local_authorities,
            ) {
                state.set_local_authority(choice);
            }
            ui.add_space(6.0);

            // ---- Bed count ----
            ui.strong("Bed Count");
            let (lo, hi) = dataset.bed_bounds.unwrap_or((0, 0));
            let (mut min, mut max) = state.criteria.bed_range;
            let mut changed = false;
            ui.horizontal(|ui: &mut Ui| {
                ui.label("from");
                changed |= ui.add(egui::DragValue::new(&mut min).range(lo..=hi)).changed();
                ui.label("to");
                changed |= ui.add(egui::DragValue::new(&mut max).range(lo..=hi)).changed();
            });
            if changed {
                state.set_bed_range(min, max);
            }
            ui.add_space(6.0);

            // ---- Ratings (multi-select) ----
            let n_selected = state.criteria.ratings.len();
            let n_total = dataset.ratings.len();
            egui::CollapsingHeader::new(
                RichText::new(format!("Rating  ({n_selected}/{n_total})")).strong(),
            )
            .id_salt("ratings")
            .default_open(true)
            .show(ui, |ui: &mut Ui| {
                ui.horizontal(|ui: &mut Ui| {
                    if ui.small_button("All").clicked() {
                        state.select_all_ratings();
                    }
                    if ui.small_button("None").clicked() {
                        state.select_no_ratings();
                    }
                });

                for rating in &dataset.ratings {
                    let mut checked = state.criteria.ratings.contains(rating);
                    let mut text = RichText::new(rating);
                    if let Some(cm) = &state.color_map {
                        text = text.color(cm.color_for(Some(rating.as_str())));
                    }
                    if ui.checkbox(&mut checked, text).changed() {
                        state.toggle_rating(rating);
                    }
                }
            });

            ui.separator();
            if ui.button("Reset filters").clicked() {
                state.reset_filters();
            }
        });
}

/// A combo box with an "All" entry in front of `options`. Returns the new
/// selection when the user picks something different.
fn optional_combo(
    ui: &mut Ui,
    id: &str,
    current: Option<&str>,
    options: &[String],
) -> Option<Option<String>> {
    let mut picked = None;
    egui::ComboBox::from_id_salt(id)
        .selected_text(current.unwrap_or(ALL))
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            if ui.selectable_label(current.is_none(), ALL).clicked() && current.is_some() {
                picked = Some(None);
            }
            for option in options {
                let selected = current == Some(option.as_str());
                if ui.selectable_label(selected, option).clicked() && !selected {
                    picked = Some(Some(option.clone()));
                }
            }
        });
    picked
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu, tab selector and status line.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open local snapshot…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                state.reload();
                ui.close_menu();
            }
            if ui
                .add_enabled(!state.cache.is_empty(), egui::Button::new("Clear cache"))
                .clicked()
            {
                state.clear_cache();
                ui.close_menu();
            }
            if ui
                .add_enabled(state.views.is_some(), egui::Button::new("Export views…"))
                .clicked()
            {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} locations loaded, {} visible",
                ds.len(),
                state.visible_indices.len()
            ));
        }

        ui.separator();
        ui.label(RichText::new(state.source.to_string()).weak().small());
        ui.label(
            RichText::new(format!("({} cached)", state.cache.len()))
                .weak()
                .small(),
        );
    });

    ui.horizontal(|ui: &mut Ui| {
        for tab in Tab::ALL {
            ui.selectable_value(&mut state.tab, tab, tab.title());
        }
    });

    match &state.notice {
        Some(Notice::Error(msg)) => {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
        Some(Notice::Warning(msg)) => {
            ui.label(RichText::new(msg).color(Color32::from_rgb(0xe0, 0xa0, 0x00)));
        }
        None => {}
    }
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open care-home snapshot")
        .add_filter("Supported files", &["csv", "tsv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv", "tsv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open_source(DataSource::File(path));
    }
}

pub fn export_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export dashboard views")
        .add_filter("JSON", &["json"])
        .set_file_name("care_market_views.json")
        .save_file();

    if let Some(path) = file {
        if let Err(e) = state.export_views(&path) {
            log::error!("Export failed: {e:#}");
            state.notice = Some(Notice::Error(format!("Export failed: {e:#}")));
        }
    }
}
