use std::fmt;

// ---------------------------------------------------------------------------
// PixelBuffer / ImageArray – raw image data as stored in the artifact
// ---------------------------------------------------------------------------

/// Raw interleaved RGB samples, keeping the artifact's numeric type so the
/// normalizer can tell already-8-bit data from float data.
#[derive(Debug, Clone, PartialEq)]
pub enum PixelBuffer {
    U8(Vec<u8>),
    F32(Vec<f32>),
}

impl PixelBuffer {
    /// Number of samples (3 per pixel).
    pub fn len(&self) -> usize {
        match self {
            PixelBuffer::U8(v) => v.len(),
            PixelBuffer::F32(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An H×W×3 image. Invariant: `pixels.len() == width * height * 3`,
/// enforced by the loader before a record is constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageArray {
    pub width: usize,
    pub height: usize,
    pub pixels: PixelBuffer,
}

// ---------------------------------------------------------------------------
// LabelValue – a ground-truth label
// ---------------------------------------------------------------------------

/// Ground-truth labels are either class indices or class names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelValue {
    Integer(i64),
    Text(String),
}

impl fmt::Display for LabelValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelValue::Integer(i) => write!(f, "{i}"),
            LabelValue::Text(s) => write!(f, "{s}"),
        }
    }
}

// ---------------------------------------------------------------------------
// ClusterRecord – one item of a clustering artifact
// ---------------------------------------------------------------------------

/// A single clustered item: its image, the cluster it was assigned to, its
/// ground-truth label, and its 2-D projected coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterRecord {
    pub image: ImageArray,
    /// Cluster label assigned by the upstream clustering process.
    pub label: i64,
    /// Ground-truth category, independent of clustering.
    pub true_label: LabelValue,
    /// Already-projected 2-D coordinates; no projection happens here.
    pub xy: [f64; 2],
}

// ---------------------------------------------------------------------------
// ClusterDataset – the complete loaded artifact
// ---------------------------------------------------------------------------

/// The full ordered collection of records currently loaded, addressable by
/// index. Replaced wholesale on every new selection, never merged.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterDataset {
    pub records: Vec<ClusterRecord>,
    /// Observed (min, max) cluster label, precomputed for the color scale.
    pub label_range: (i64, i64),
}

impl ClusterDataset {
    pub fn from_records(records: Vec<ClusterRecord>) -> Self {
        let mut label_range = (0, 0);
        if let Some(first) = records.first() {
            label_range = (first.label, first.label);
            for rec in &records {
                label_range.0 = label_range.0.min(rec.label);
                label_range.1 = label_range.1.max(rec.label);
            }
        }
        ClusterDataset {
            records,
            label_range,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ClusterRecord> {
        self.records.get(index)
    }
}

// ---------------------------------------------------------------------------
// PointTable – the tabular projection driving the scatter plot
// ---------------------------------------------------------------------------

/// One row per record: plot position, back-reference into the dataset, and
/// both labels. Purely derived from a [`ClusterDataset`]; rebuilt from
/// scratch whenever the dataset is replaced.
#[derive(Debug, Clone, PartialEq)]
pub struct PointRow {
    pub x: f64,
    pub y: f64,
    /// Index of the source record in the dataset.
    pub image_index: usize,
    pub label: i64,
    pub true_label: LabelValue,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointTable {
    pub rows: Vec<PointRow>,
}

impl PointTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
