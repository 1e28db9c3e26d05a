use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use flate2::read::GzDecoder;
use serde::Deserialize;
use thiserror::Error;

use super::model::{ClusterDataset, ClusterRecord, ImageArray, LabelValue, PixelBuffer};

// ---------------------------------------------------------------------------
// Artifact catalog
// ---------------------------------------------------------------------------

/// A known artifact file and its human-readable dropdown label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArtifactEntry {
    pub file: &'static str,
    pub label: &'static str,
}

/// The fixed set of artifacts the dropdown offers. Arbitrary files can still
/// be opened through File → Open.
pub const ARTIFACT_CATALOG: &[ArtifactEntry] = &[
    ArtifactEntry {
        file: "ground_truth.json.gz",
        label: "Ground Truth",
    },
    ArtifactEntry {
        file: "kmeans_clusters_8.json.gz",
        label: "K-means Model (k = 8)",
    },
    ArtifactEntry {
        file: "kmeans_clusters_16.json.gz",
        label: "K-means Model (k = 16)",
    },
    ArtifactEntry {
        file: "kmeans_clusters_30.json.gz",
        label: "K-means Model (k = 30)",
    },
    ArtifactEntry {
        file: "contrastive_stl10_clusters.json.gz",
        label: "Contrastive STL-10 Trained Model",
    },
    ArtifactEntry {
        file: "contrastive_cifar10_clusters.json.gz",
        label: "Contrastive CIFAR-10 Trained Model",
    },
    ArtifactEntry {
        file: "contrastive_cifar100_clusters.json.gz",
        label: "Contrastive CIFAR-100 Trained Model",
    },
    ArtifactEntry {
        file: "sample_clusters.json.gz",
        label: "Synthetic Sample",
    },
];

/// Catalog entries resolve relative to the artifacts directory.
pub fn catalog_path(file: &str) -> PathBuf {
    Path::new("artifacts").join(file)
}

// ---------------------------------------------------------------------------
// Artifact format errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq)]
pub enum ArtifactError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
    #[error("unsupported image dtype '{0}' (expected 'u8' or 'f32')")]
    UnsupportedDtype(String),
    #[error("pixel count {got} does not match {height}x{width}x3 = {expected}")]
    PixelCount {
        got: usize,
        height: usize,
        width: usize,
        expected: usize,
    },
    #[error("u8 sample {0} is not an integer in 0..=255")]
    SampleOutOfRange(f64),
    #[error("coordinates must be exactly two finite values, got {0:?}")]
    BadCoordinates(Vec<f64>),
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a clustering artifact from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.json.gz` / `.gz` – gzip-compressed JSON record array (recommended)
/// * `.json`            – plain JSON record array
pub fn load_file(path: &Path) -> Result<ClusterDataset> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let text = if name.ends_with(".gz") {
        let file = std::fs::File::open(path)
            .with_context(|| format!("opening {}", path.display()))?;
        let mut text = String::new();
        GzDecoder::new(file)
            .read_to_string(&mut text)
            .context("decompressing gzip artifact")?;
        text
    } else if name.ends_with(".json") {
        std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?
    } else {
        let ext = name.rsplit('.').next().unwrap_or("").to_string();
        bail!(ArtifactError::UnsupportedExtension(ext));
    };

    parse_records(&text)
}

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

/// One serialized record:
///
/// ```json
/// {
///   "image": { "dtype": "f32", "height": 32, "width": 32, "data": [...] },
///   "label": 3,
///   "true_label": "castle",
///   "xy": [1.25, -0.5]
/// }
/// ```
///
/// `image.data` is a flat H×W×3 interleaved RGB array; `true_label` may be
/// an integer class index or a class name.
#[derive(Debug, Deserialize)]
struct RawRecord {
    image: RawImage,
    label: i64,
    true_label: RawLabel,
    xy: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct RawImage {
    dtype: String,
    height: usize,
    width: usize,
    data: Vec<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawLabel {
    Integer(i64),
    Text(String),
}

/// Parse a JSON record array into a dataset.
pub(crate) fn parse_records(text: &str) -> Result<ClusterDataset> {
    let raw: Vec<RawRecord> = serde_json::from_str(text).context("parsing artifact JSON")?;

    let mut records = Vec::with_capacity(raw.len());
    for (i, rec) in raw.into_iter().enumerate() {
        let record = convert_record(rec).with_context(|| format!("record {i}"))?;
        records.push(record);
    }

    Ok(ClusterDataset::from_records(records))
}

fn convert_record(raw: RawRecord) -> Result<ClusterRecord> {
    let image = convert_image(raw.image)?;

    if raw.xy.len() != 2 || raw.xy.iter().any(|v| !v.is_finite()) {
        bail!(ArtifactError::BadCoordinates(raw.xy));
    }

    let true_label = match raw.true_label {
        RawLabel::Integer(i) => LabelValue::Integer(i),
        RawLabel::Text(s) => LabelValue::Text(s),
    };

    Ok(ClusterRecord {
        image,
        label: raw.label,
        true_label,
        xy: [raw.xy[0], raw.xy[1]],
    })
}

fn convert_image(raw: RawImage) -> Result<ImageArray> {
    let expected = raw
        .height
        .checked_mul(raw.width)
        .and_then(|n| n.checked_mul(3))
        .context("image dimensions overflow")?;

    if raw.data.len() != expected {
        bail!(ArtifactError::PixelCount {
            got: raw.data.len(),
            height: raw.height,
            width: raw.width,
            expected,
        });
    }

    let pixels = match raw.dtype.as_str() {
        "u8" => {
            let mut samples = Vec::with_capacity(raw.data.len());
            for &v in &raw.data {
                if v.fract() != 0.0 || !(0.0..=255.0).contains(&v) {
                    bail!(ArtifactError::SampleOutOfRange(v));
                }
                samples.push(v as u8);
            }
            PixelBuffer::U8(samples)
        }
        "f32" => PixelBuffer::F32(raw.data.iter().map(|&v| v as f32).collect()),
        other => bail!(ArtifactError::UnsupportedDtype(other.to_string())),
    };

    Ok(ImageArray {
        width: raw.width,
        height: raw.height,
        pixels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn one_record_json(dtype: &str, data: &str, label: i64, true_label: &str, xy: &str) -> String {
        format!(
            r#"[{{"image": {{"dtype": "{dtype}", "height": 1, "width": 1, "data": {data}}},
                 "label": {label}, "true_label": {true_label}, "xy": {xy}}}]"#
        )
    }

    #[test]
    fn parses_u8_record() {
        let text = one_record_json("u8", "[10, 20, 30]", 2, "\"castle\"", "[0.5, -1.5]");
        let ds = parse_records(&text).unwrap();

        assert_eq!(ds.len(), 1);
        let rec = ds.get(0).unwrap();
        assert_eq!(rec.label, 2);
        assert_eq!(rec.true_label, LabelValue::Text("castle".into()));
        assert_eq!(rec.xy, [0.5, -1.5]);
        assert_eq!(rec.image.pixels, PixelBuffer::U8(vec![10, 20, 30]));
    }

    #[test]
    fn parses_f32_record_with_integer_true_label() {
        let text = one_record_json("f32", "[0.1, 0.2, 0.3]", 0, "7", "[1.0, 2.0]");
        let ds = parse_records(&text).unwrap();

        let rec = ds.get(0).unwrap();
        assert_eq!(rec.true_label, LabelValue::Integer(7));
        assert!(matches!(rec.image.pixels, PixelBuffer::F32(_)));
    }

    #[test]
    fn rejects_wrong_pixel_count() {
        let text = one_record_json("u8", "[10, 20]", 0, "0", "[0.0, 0.0]");
        let err = parse_records(&text).unwrap_err();
        assert!(err.to_string().contains("record 0"));
    }

    #[test]
    fn rejects_u8_sample_out_of_range() {
        let text = one_record_json("u8", "[10, 20, 300]", 0, "0", "[0.0, 0.0]");
        assert!(parse_records(&text).is_err());
    }

    #[test]
    fn rejects_unknown_dtype() {
        let text = one_record_json("f64", "[0.0, 0.0, 0.0]", 0, "0", "[0.0, 0.0]");
        assert!(parse_records(&text).is_err());
    }

    #[test]
    fn rejects_bad_coordinates() {
        let text = one_record_json("u8", "[1, 2, 3]", 0, "0", "[0.0]");
        assert!(parse_records(&text).is_err());
    }

    #[test]
    fn loads_gzip_compressed_artifact() {
        let text = one_record_json("u8", "[1, 2, 3]", 1, "\"forest\"", "[0.0, 1.0]");

        let path = std::env::temp_dir().join(format!(
            "clusterscope_test_{}.json.gz",
            std::process::id()
        ));
        let file = std::fs::File::create(&path).unwrap();
        let mut encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
        encoder.write_all(text.as_bytes()).unwrap();
        encoder.finish().unwrap();

        let ds = load_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(ds.len(), 1);
        assert_eq!(ds.get(0).unwrap().label, 1);
    }

    #[test]
    fn rejects_unsupported_extension() {
        let err = load_file(Path::new("clusters.parquet")).unwrap_err();
        assert!(err.to_string().contains("unsupported file extension"));
    }
}
