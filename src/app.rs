use eframe::egui;

use crate::data::loader::{self, ARTIFACT_CATALOG};
use crate::state::{AppState, DatasetSource, ViewerEvent};
use crate::ui::inspect::HoverInspector;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct ClusterScopeApp {
    pub state: AppState,
    inspector: HoverInspector,
}

impl Default for ClusterScopeApp {
    fn default() -> Self {
        let mut state = AppState::default();

        // Preselect the first catalog entry when its artifact is present,
        // mirroring the default dropdown value; otherwise start idle.
        if let Some(entry) = ARTIFACT_CATALOG.first() {
            if loader::catalog_path(entry.file).exists() {
                state.handle_event(ViewerEvent::SelectionChanged(DatasetSource::Catalog(*entry)));
            }
        }

        Self {
            state,
            inspector: HoverInspector::default(),
        }
    }
}

impl eframe::App for ClusterScopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: dataset dropdown + status ----
        let mut pending = None;
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            pending = panels::top_bar(ui, &self.state);
        });
        if let Some(event) = pending {
            self.state.handle_event(event);
        }

        // ---- Left side panel: colorbar legend ----
        egui::SidePanel::left("legend_panel")
            .default_width(160.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &self.state);
            });

        // ---- Central panel: scatter plot ----
        let mut hovered = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            hovered = plot::scatter_plot(ui, &self.state);
        });
        self.state.handle_event(ViewerEvent::PointHovered(hovered));

        // ---- Transient hover popup ----
        self.inspector.show(ctx, &self.state);
    }
}
