use std::path::PathBuf;

use crate::color::ColorScale;
use crate::data::loader::{self, ArtifactEntry};
use crate::data::model::{ClusterDataset, ClusterRecord, PointRow, PointTable};
use crate::data::table::build_table;

// ---------------------------------------------------------------------------
// Dataset selection
// ---------------------------------------------------------------------------

/// Where a dataset selection came from: the fixed catalog or File → Open.
#[derive(Debug, Clone, PartialEq)]
pub enum DatasetSource {
    Catalog(ArtifactEntry),
    File(PathBuf),
}

impl DatasetSource {
    pub fn path(&self) -> PathBuf {
        match self {
            DatasetSource::Catalog(entry) => loader::catalog_path(entry.file),
            DatasetSource::File(path) => path.clone(),
        }
    }

    /// Label shown in the dropdown / top bar.
    pub fn display_name(&self) -> String {
        match self {
            DatasetSource::Catalog(entry) => entry.label.to_string(),
            DatasetSource::File(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// The two UI events that drive the viewer. All state mutation goes through
/// [`AppState::handle_event`].
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerEvent {
    /// A dataset was picked from the dropdown or the file dialog.
    SelectionChanged(DatasetSource),
    /// The pointer moved over a plot point (`Some(row)`) or off it (`None`).
    PointHovered(Option<usize>),
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full viewer state, independent of rendering. Idle until the first
/// successful load; each new selection replaces the dataset, table, and
/// color scale wholesale.
pub struct AppState {
    /// Loaded dataset (None while idle).
    pub dataset: Option<ClusterDataset>,

    /// Tabular projection of `dataset`, rebuilt on every load.
    pub table: PointTable,

    /// Label → color mapping for the current dataset.
    pub color_scale: Option<ColorScale>,

    /// The selection behind the current dataset.
    pub selected: Option<DatasetSource>,

    /// Row currently under the hover cursor.
    pub hovered_row: Option<usize>,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            table: PointTable::default(),
            color_scale: None,
            selected: None,
            hovered_row: None,
            status_message: None,
        }
    }
}

impl AppState {
    /// Apply a UI event. Selection failures leave the previous dataset in
    /// place and surface the reason in the status line instead of crashing
    /// the interaction.
    pub fn handle_event(&mut self, event: ViewerEvent) {
        match event {
            ViewerEvent::SelectionChanged(source) => self.load_selection(source),
            ViewerEvent::PointHovered(row) => {
                self.hovered_row = row.filter(|&r| r < self.table.len());
            }
        }
    }

    fn load_selection(&mut self, source: DatasetSource) {
        let path = source.path();
        match loader::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "loaded {} records from {} (labels {:?})",
                    dataset.len(),
                    path.display(),
                    dataset.label_range
                );
                self.set_dataset(source, dataset);
            }
            Err(e) => {
                log::error!("failed to load {}: {e:#}", path.display());
                self.status_message = Some(format!("failed to load dataset: {e:#}"));
            }
        }
    }

    /// Ingest a loaded dataset: rebuild the table and color scale, clear any
    /// hover target from the previous dataset.
    pub fn set_dataset(&mut self, source: DatasetSource, dataset: ClusterDataset) {
        self.table = build_table(&dataset);
        self.color_scale = Some(ColorScale::new(dataset.label_range));
        self.hovered_row = None;
        self.status_message = None;
        self.selected = Some(source);
        self.dataset = Some(dataset);
    }

    /// The table row and source record under the hover cursor, if any.
    /// Returns None while idle or when nothing is hovered.
    pub fn hovered_record(&self) -> Option<(&PointRow, &ClusterRecord)> {
        let row = self.table.rows.get(self.hovered_row?)?;
        let record = self.dataset.as_ref()?.get(row.image_index)?;
        Some((row, record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{ImageArray, LabelValue, PixelBuffer};

    fn record(label: i64, true_label: LabelValue, xy: [f64; 2]) -> ClusterRecord {
        ClusterRecord {
            image: ImageArray {
                width: 1,
                height: 1,
                pixels: PixelBuffer::U8(vec![label as u8; 3]),
            },
            label,
            true_label,
            xy,
        }
    }

    fn dataset(labels: &[i64]) -> ClusterDataset {
        let records = labels
            .iter()
            .enumerate()
            .map(|(i, &l)| record(l, LabelValue::Integer(l * 10), [i as f64, i as f64]))
            .collect();
        ClusterDataset::from_records(records)
    }

    fn source(name: &str) -> DatasetSource {
        DatasetSource::File(PathBuf::from(name))
    }

    #[test]
    fn hover_without_dataset_shows_nothing() {
        let mut state = AppState::default();
        state.handle_event(ViewerEvent::PointHovered(Some(0)));
        assert!(state.hovered_record().is_none());
    }

    #[test]
    fn three_record_scenario() {
        let mut state = AppState::default();
        let records = vec![
            record(0, LabelValue::Integer(10), [0.0, 0.0]),
            record(1, LabelValue::Text("harbor".into()), [1.0, 1.0]),
            record(0, LabelValue::Integer(30), [2.0, 2.0]),
        ];
        state.set_dataset(source("a.json"), ClusterDataset::from_records(records));

        assert_eq!(state.table.len(), 3);
        for (i, row) in state.table.rows.iter().enumerate() {
            assert_eq!([row.x, row.y], [i as f64, i as f64]);
        }

        state.handle_event(ViewerEvent::PointHovered(Some(1)));
        let (row, rec) = state.hovered_record().unwrap();
        assert_eq!(row.label, 1);
        assert_eq!(rec.label, 1);
        assert_eq!(rec.true_label, LabelValue::Text("harbor".into()));
    }

    #[test]
    fn new_selection_fully_replaces_previous_table() {
        let mut state = AppState::default();
        state.set_dataset(source("a.json"), dataset(&[0, 1, 2, 3, 4]));
        state.handle_event(ViewerEvent::PointHovered(Some(4)));

        state.set_dataset(source("b.json"), dataset(&[9, 9]));

        assert_eq!(state.table.len(), 2);
        assert!(state.table.rows.iter().all(|r| r.label == 9));
        // Hover target from the previous dataset must not survive.
        assert_eq!(state.hovered_row, None);
        assert_eq!(state.color_scale.unwrap().range(), (9, 9));
    }

    #[test]
    fn out_of_range_hover_is_dropped() {
        let mut state = AppState::default();
        state.set_dataset(source("a.json"), dataset(&[0, 1]));
        state.handle_event(ViewerEvent::PointHovered(Some(17)));
        assert_eq!(state.hovered_row, None);
    }

    #[test]
    fn failed_load_keeps_previous_dataset_and_sets_status() {
        let mut state = AppState::default();
        state.set_dataset(source("a.json"), dataset(&[0, 1]));

        state.handle_event(ViewerEvent::SelectionChanged(source("does_not_exist.json")));

        assert_eq!(state.table.len(), 2);
        assert_eq!(state.selected, Some(source("a.json")));
        let msg = state.status_message.as_deref().unwrap();
        assert!(msg.starts_with("failed to load dataset:"));
    }
}
