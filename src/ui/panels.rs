use eframe::egui::{self, Color32, CornerRadius, Rect, RichText, Sense, Ui, pos2, vec2};

use crate::color::ColorScale;
use crate::data::loader::ARTIFACT_CATALOG;
use crate::state::{AppState, DatasetSource, ViewerEvent};

// ---------------------------------------------------------------------------
// Top bar – dataset selection and status
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar. Returns the event to apply, if the user
/// picked a dataset.
pub fn top_bar(ui: &mut Ui, state: &AppState) -> Option<ViewerEvent> {
    let mut event = None;

    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                event = open_file_dialog();
                ui.close_menu();
            }
        });

        ui.separator();

        // ---- Catalog dropdown ----
        let selected_label = state
            .selected
            .as_ref()
            .map(DatasetSource::display_name)
            .unwrap_or_else(|| "Select a graph to load".to_string());

        egui::ComboBox::from_id_salt("dataset_selection")
            .selected_text(selected_label)
            .width(260.0)
            .show_ui(ui, |ui: &mut Ui| {
                for entry in ARTIFACT_CATALOG {
                    let source = DatasetSource::Catalog(*entry);
                    let is_selected = state.selected.as_ref() == Some(&source);
                    if ui.selectable_label(is_selected, entry.label).clicked() && !is_selected {
                        event = Some(ViewerEvent::SelectionChanged(source));
                    }
                }
            });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!("{} records loaded", ds.len()));
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });

    event
}

fn open_file_dialog() -> Option<ViewerEvent> {
    let file = rfd::FileDialog::new()
        .set_title("Open clustering artifact")
        .add_filter("Cluster artifacts", &["gz", "json"])
        .pick_file();

    file.map(|path| ViewerEvent::SelectionChanged(DatasetSource::File(path)))
}

// ---------------------------------------------------------------------------
// Side panel – colorbar legend and dataset summary
// ---------------------------------------------------------------------------

/// Render the left legend panel.
pub fn side_panel(ui: &mut Ui, state: &AppState) {
    ui.heading("Legend");
    ui.separator();

    let Some(scale) = state.color_scale else {
        ui.label("No dataset loaded.");
        return;
    };

    ui.strong("Cluster Label");
    ui.add_space(4.0);
    colorbar(ui, &scale);

    if let Some(ds) = &state.dataset {
        ui.add_space(8.0);
        ui.separator();
        ui.strong("Dataset");
        ui.label(format!("{} records", ds.len()));
        let (lo, hi) = ds.label_range;
        ui.label(format!("labels {lo}–{hi}"));
        if let Some(rec) = ds.get(0) {
            ui.label(format!("images {}×{}", rec.image.width, rec.image.height));
        }
    }
}

/// Draw a vertical gradient bar with the max label at the top and the min at
/// the bottom, ticked with the range endpoints.
fn colorbar(ui: &mut Ui, scale: &ColorScale) {
    let (lo, hi) = scale.range();

    ui.horizontal(|ui: &mut Ui| {
        let (rect, _) = ui.allocate_exact_size(vec2(24.0, 180.0), Sense::hover());
        let painter = ui.painter();

        let stops = scale.colorbar_stops(64);
        let strip = rect.height() / stops.len() as f32;
        for (i, color) in stops.iter().enumerate() {
            let top = rect.top() + i as f32 * strip;
            let strip_rect = Rect::from_min_max(
                pos2(rect.left(), top),
                pos2(rect.right(), top + strip),
            );
            painter.rect_filled(strip_rect, CornerRadius::ZERO, *color);
        }

        ui.vertical(|ui: &mut Ui| {
            ui.label(hi.to_string());
            ui.add_space(rect.height() - 40.0);
            ui.label(lo.to_string());
        });
    });
}
