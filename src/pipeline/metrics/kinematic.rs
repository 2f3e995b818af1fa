use super::{round2, MetricsError};
use crate::models::{Cell, GaitDataset, KinematicRow, Range};

/// Joint-angle channels reported as min/max, in output order.
pub const KINEMATIC_COLUMNS: [&str; 3] = [
    "LHipAngles_Sag_Z",
    "LKneeAngles_Sag_Z",
    "LAnkleAngles_Sag_X",
];

/// Rounded min/max of a channel that must be numeric.
///
/// Missing cells are skipped. Any text cell is an error: these channels
/// come straight from the capture system and are expected to be numeric.
/// `Ok(None)` when the channel has no values at all.
pub fn channel_range(dataset: &GaitDataset, column: &str) -> Result<Option<Range>, MetricsError> {
    let Some(col) = dataset.column(column) else {
        return Ok(None);
    };

    let mut range: Option<Range> = None;
    for (idx, cell) in col.cells.iter().enumerate() {
        let value = match cell {
            Cell::Number(v) => *v,
            Cell::Missing => continue,
            Cell::Text(text) => {
                return Err(MetricsError::NonNumeric {
                    column: column.to_string(),
                    row: idx + 1,
                    value: text.clone(),
                })
            }
        };
        range = Some(match range {
            Some(r) => Range {
                min: r.min.min(value),
                max: r.max.max(value),
            },
            None => Range {
                min: value,
                max: value,
            },
        });
    }

    Ok(range.map(|r| Range {
        min: round2(r.min),
        max: round2(r.max),
    }))
}

/// One row per tracked channel present in both datasets, in declared order.
pub fn kinematic_rows(
    pre: &GaitDataset,
    post: &GaitDataset,
) -> Result<Vec<KinematicRow>, MetricsError> {
    let mut rows = Vec::new();
    for column in KINEMATIC_COLUMNS {
        if !(pre.has_column(column) && post.has_column(column)) {
            tracing::debug!(column, "Kinematic channel not in both datasets, skipped");
            continue;
        }
        rows.push(KinematicRow {
            column,
            pre: channel_range(pre, column)?,
            post: channel_range(post, column)?,
        });
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::tabular::load_dataset;

    #[test]
    fn range_is_min_and_max_rounded() {
        let ds = load_dataset(b"LHipAngles_Sag_Z\n10.123\n-5.456\n38.999\n");
        let range = channel_range(&ds, "LHipAngles_Sag_Z").unwrap().unwrap();
        assert_eq!(range, Range { min: -5.46, max: 39.0 });
    }

    #[test]
    fn missing_cells_are_skipped() {
        let ds = load_dataset(b"LKneeAngles_Sag_Z,Speed\n,1.0\n20,1.1\n");
        let range = channel_range(&ds, "LKneeAngles_Sag_Z").unwrap().unwrap();
        assert_eq!(range, Range { min: 20.0, max: 20.0 });
    }

    #[test]
    fn text_cell_is_rejected() {
        let ds = load_dataset(b"LAnkleAngles_Sag_X\n1.0\nlow\n");
        let err = channel_range(&ds, "LAnkleAngles_Sag_X").unwrap_err();
        assert_eq!(
            err,
            MetricsError::NonNumeric {
                column: "LAnkleAngles_Sag_X".into(),
                row: 2,
                value: "low".into(),
            }
        );
    }

    #[test]
    fn infinite_values_are_numbers_and_serialize_as_null() {
        let pre = load_dataset(b"LHipAngles_Sag_Z\n-inf\n12.5\nInfinity\n");
        let post = load_dataset(b"LHipAngles_Sag_Z\n3\n");
        let rows = kinematic_rows(&pre, &post).unwrap();
        assert_eq!(
            rows[0].pre,
            Some(Range { min: f64::NEG_INFINITY, max: f64::INFINITY })
        );
        let json = serde_json::to_value(&rows[0]).unwrap();
        assert_eq!(json, serde_json::json!(["LHipAngles_Sag_Z", null, null, 3.0, 3.0]));
    }

    #[test]
    fn channel_without_values_has_no_range() {
        let ds = load_dataset(b"LHipAngles_Sag_Z,Speed\n,1.0\n");
        assert_eq!(channel_range(&ds, "LHipAngles_Sag_Z").unwrap(), None);
    }

    #[test]
    fn channel_only_in_pre_is_skipped() {
        let pre = load_dataset(b"LHipAngles_Sag_Z,LKneeAngles_Sag_Z\n1,2\n");
        let post = load_dataset(b"LKneeAngles_Sag_Z\n3\n");
        let rows = kinematic_rows(&pre, &post).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].column, "LKneeAngles_Sag_Z");
    }

    #[test]
    fn rows_follow_declared_order_not_input_order() {
        let csv = b"LAnkleAngles_Sag_X,LHipAngles_Sag_Z\n1,2\n";
        let pre = load_dataset(csv);
        let post = load_dataset(csv);
        let rows = kinematic_rows(&pre, &post).unwrap();
        let columns: Vec<_> = rows.iter().map(|r| r.column).collect();
        assert_eq!(columns, vec!["LHipAngles_Sag_Z", "LAnkleAngles_Sag_X"]);
    }

    #[test]
    fn non_numeric_in_skipped_channel_is_ignored() {
        let pre = load_dataset(b"LHipAngles_Sag_Z\nbad\n");
        let post = load_dataset(b"Speed\n1.0\n");
        assert!(kinematic_rows(&pre, &post).unwrap().is_empty());
    }
}
