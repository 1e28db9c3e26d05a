use super::model::{ClusterDataset, PointRow, PointTable};

// ---------------------------------------------------------------------------
// Table builder: ClusterDataset → PointTable
// ---------------------------------------------------------------------------

/// Build the tabular projection of a dataset: one row per record, in dataset
/// order, with `rows[i].image_index == i`.
///
/// The three per-record reads (coordinates, cluster labels, true labels) are
/// independent column passes and run concurrently; rows are assembled only
/// after all three have joined, so output order never depends on execution
/// order.
pub fn build_table(dataset: &ClusterDataset) -> PointTable {
    let (coords, (labels, true_labels)) = rayon::join(
        || {
            dataset
                .records
                .iter()
                .map(|rec| rec.xy)
                .collect::<Vec<[f64; 2]>>()
        },
        || {
            rayon::join(
                || dataset.records.iter().map(|rec| rec.label).collect::<Vec<i64>>(),
                || {
                    dataset
                        .records
                        .iter()
                        .map(|rec| rec.true_label.clone())
                        .collect::<Vec<_>>()
                },
            )
        },
    );

    let rows = coords
        .into_iter()
        .zip(labels)
        .zip(true_labels)
        .enumerate()
        .map(|(i, (([x, y], label), true_label))| PointRow {
            x,
            y,
            image_index: i,
            label,
            true_label,
        })
        .collect();

    PointTable { rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{ClusterRecord, ImageArray, LabelValue, PixelBuffer};

    fn record(label: i64, true_label: LabelValue, xy: [f64; 2]) -> ClusterRecord {
        ClusterRecord {
            image: ImageArray {
                width: 2,
                height: 2,
                pixels: PixelBuffer::U8(vec![0; 12]),
            },
            label,
            true_label,
            xy,
        }
    }

    #[test]
    fn one_row_per_record_in_dataset_order() {
        let ds = ClusterDataset::from_records(vec![
            record(0, LabelValue::Integer(5), [0.0, 0.0]),
            record(1, LabelValue::Text("harbor".into()), [1.0, 1.0]),
            record(0, LabelValue::Integer(2), [2.0, 2.0]),
        ]);
        let table = build_table(&ds);

        assert_eq!(table.len(), 3);
        for (i, row) in table.rows.iter().enumerate() {
            assert_eq!(row.image_index, i);
            assert_eq!([row.x, row.y], ds.records[i].xy);
            assert_eq!(row.label, ds.records[i].label);
            assert_eq!(row.true_label, ds.records[i].true_label);
        }
    }

    #[test]
    fn empty_dataset_gives_empty_table() {
        let table = build_table(&ClusterDataset::from_records(Vec::new()));
        assert!(table.is_empty());
    }
}
