use eframe::egui::{self, Ui};

use crate::data::image::{encode_png, normalize};
use crate::data::model::ClusterRecord;
use crate::state::{AppState, DatasetSource};

/// Max width of the hover image in the popup.
const PANEL_IMAGE_WIDTH: f32 = 220.0;

// ---------------------------------------------------------------------------
// Hover inspector – image + labels popup
// ---------------------------------------------------------------------------

/// Renders the popup for the point under the cursor. The hovered record's
/// image is normalized and PNG-encoded fresh on every hover-target change;
/// the previous target's bytes are evicted, so nothing is cached across
/// targets.
pub struct HoverInspector {
    /// URI of the PNG currently registered with the context, if any.
    current_uri: Option<String>,
}

impl Default for HoverInspector {
    fn default() -> Self {
        Self { current_uri: None }
    }
}

impl HoverInspector {
    /// Show the inspector popup, or nothing when idle / not hovering.
    pub fn show(&mut self, ctx: &egui::Context, state: &AppState) {
        let Some((row, record)) = state.hovered_record() else {
            self.evict(ctx);
            return;
        };

        let dataset_name = state
            .selected
            .as_ref()
            .map(DatasetSource::display_name)
            .unwrap_or_default();
        let uri = format!("bytes://hover/{dataset_name}/{}.png", row.image_index);

        if self.current_uri.as_deref() != Some(&uri) {
            self.evict(ctx);
            match render_panel_image(record) {
                Ok(png) => {
                    ctx.include_bytes(uri.clone(), png);
                    self.current_uri = Some(uri.clone());
                }
                Err(e) => {
                    log::error!("failed to render hover image: {e:#}");
                    return;
                }
            }
        }

        let label = row.label;
        let true_label = row.true_label.clone();
        egui::show_tooltip_at_pointer(
            ctx,
            egui::LayerId::background(),
            egui::Id::new("hover_inspector"),
            |ui: &mut Ui| {
                ui.add(egui::Image::from_uri(uri.clone()).max_width(PANEL_IMAGE_WIDTH));
                ui.label(format!("Cluster {label}"));
                ui.label(format!("Image Label: {true_label}"));
            },
        );
    }

    /// Drop the registered PNG bytes for the previous hover target.
    fn evict(&mut self, ctx: &egui::Context) {
        if let Some(uri) = self.current_uri.take() {
            ctx.forget_image(&uri);
        }
    }
}

/// Normalize the record's image to 8-bit RGB and encode it as PNG.
fn render_panel_image(record: &ClusterRecord) -> anyhow::Result<Vec<u8>> {
    encode_png(&normalize(&record.image))
}
