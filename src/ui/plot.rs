use std::collections::BTreeMap;

use eframe::egui::{Color32, Pos2, Ui};
use egui_plot::{MarkerShape, Plot, PlotPoint, PlotTransform, Points};

use crate::state::AppState;

/// Point marker radius in screen pixels.
const MARKER_RADIUS: f32 = 5.0;
/// How close (screen pixels) the pointer must be to a point to hover it.
const HOVER_RADIUS: f32 = 10.0;
/// Plot background, matching the dark canvas of the upstream dashboards.
const PLOT_BACKGROUND: Color32 = Color32::from_rgb(0x12, 0x12, 0x11);

// ---------------------------------------------------------------------------
// Cluster scatter plot (central panel)
// ---------------------------------------------------------------------------

/// Render the scatter plot and return the row index under the pointer, if
/// any. The plot shows no built-in hover text; the hover inspector draws its
/// own panel from the returned row.
pub fn scatter_plot(ui: &mut Ui, state: &AppState) -> Option<usize> {
    let Some(scale) = state.color_scale else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Select a dataset to view its cluster map");
        });
        return None;
    };

    // One Points series per cluster label, colored by the shared scale.
    let mut by_label: BTreeMap<i64, Vec<[f64; 2]>> = BTreeMap::new();
    for row in &state.table.rows {
        by_label.entry(row.label).or_default().push([row.x, row.y]);
    }

    ui.style_mut().visuals.extreme_bg_color = PLOT_BACKGROUND;

    let response = Plot::new("cluster_scatter")
        .show_axes([false, false])
        .show_grid([false, false])
        .data_aspect(1.0)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (label, points) in by_label {
                let color = scale.color_for(label);
                let fill = Color32::from_rgba_unmultiplied(
                    color.r(),
                    color.g(),
                    color.b(),
                    204, // slight translucency so dense clusters stay readable
                );
                plot_ui.points(
                    Points::new(points)
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(MARKER_RADIUS)
                        .color(fill),
                );
            }
        });

    let pointer = response.response.hover_pos()?;
    nearest_row(state, &response.transform, pointer)
}

/// Screen-space nearest-point hit test against the table rows.
fn nearest_row(state: &AppState, transform: &PlotTransform, pointer: Pos2) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, row) in state.table.rows.iter().enumerate() {
        let pos = transform.position_from_point(&PlotPoint::new(row.x, row.y));
        let dist = pos.distance(pointer);
        if dist <= HOVER_RADIUS && best.map_or(true, |(_, d)| dist < d) {
            best = Some((i, dist));
        }
    }
    best.map(|(i, _)| i)
}
