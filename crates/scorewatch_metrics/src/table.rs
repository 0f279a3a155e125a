use crate::error::MetricError;
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type};
use arrow::record_batch::RecordBatch;
use itertools::Itertools;
use scorewatch_types::{QuantileTable, QuantileTableRow};
use std::collections::HashMap;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
struct BucketAccumulator {
    volume: u64,
    target_sum: f64,
    target_count: u64,
    score_min: f64,
    score_max: f64,
}

impl Default for BucketAccumulator {
    fn default() -> Self {
        BucketAccumulator {
            volume: 0,
            target_sum: 0.0,
            target_count: 0,
            score_min: f64::NAN,
            score_max: f64::NAN,
        }
    }
}

impl BucketAccumulator {
    fn push(&mut self, score: Option<f64>, target: Option<f64>) {
        self.volume += 1;

        if let Some(target) = target.filter(|t| !t.is_nan()) {
            self.target_sum += target;
            self.target_count += 1;
        }

        if let Some(score) = score.filter(|s| !s.is_nan()) {
            // f64::min/max ignore the NaN seed
            self.score_min = self.score_min.min(score);
            self.score_max = self.score_max.max(score);
        }
    }

    fn into_row(self, bucket: String) -> QuantileTableRow {
        let event_rate = if self.target_count == 0 {
            f64::NAN
        } else {
            self.target_sum / self.target_count as f64
        };

        QuantileTableRow {
            bucket,
            volume: self.volume,
            event_rate,
            score_min: self.score_min,
            score_max: self.score_max,
        }
    }
}

pub(crate) fn get_column(batch: &RecordBatch, name: &str) -> Result<ArrayRef, MetricError> {
    batch
        .column_by_name(name)
        .cloned()
        .ok_or_else(|| MetricError::ColumnNotFound(name.to_string()))
}

/// Builds the event-rate table of a scored population.
///
/// Rows are grouped by `quantile_col`; each bucket reports its row count
/// (`volume`), mean of `target_col` (`event_rate`) and the min/max of
/// `score_col`. Null targets and scores are skipped by the mean and min/max
/// but still count toward volume. Rows without a bucket label are dropped.
///
/// Output rows follow `ordered_labels`. Labels with no rows produce no output
/// row, and buckets missing from `ordered_labels` are left out.
///
/// # Arguments
///
/// * `batch` - Scored population
/// * `quantile_col` - Bucket label column, anything castable to Utf8
/// * `score_col` - Score column, anything castable to Float64
/// * `target_col` - Binary target column, anything castable to Float64
/// * `ordered_labels` - Output order of the buckets
pub fn construct_metrics_table<S: AsRef<str>>(
    batch: &RecordBatch,
    quantile_col: &str,
    score_col: &str,
    target_col: &str,
    ordered_labels: &[S],
) -> Result<QuantileTable, MetricError> {
    let buckets = cast(&get_column(batch, quantile_col)?, &DataType::Utf8)?;
    let scores = cast(&get_column(batch, score_col)?, &DataType::Float64)?;
    let targets = cast(&get_column(batch, target_col)?, &DataType::Float64)?;

    let buckets = buckets.as_string::<i32>();
    let scores = scores.as_primitive::<Float64Type>();
    let targets = targets.as_primitive::<Float64Type>();

    let mut groups: HashMap<&str, BucketAccumulator> = HashMap::new();
    let mut unlabeled = 0usize;

    for row in 0..batch.num_rows() {
        if buckets.is_null(row) {
            unlabeled += 1;
            continue;
        }

        let score = scores.is_valid(row).then(|| scores.value(row));
        let target = targets.is_valid(row).then(|| targets.value(row));

        groups
            .entry(buckets.value(row))
            .or_default()
            .push(score, target);
    }

    if unlabeled > 0 {
        debug!("Dropped {unlabeled} rows without a {quantile_col} label");
    }

    let ordered: Vec<&str> = ordered_labels
        .iter()
        .map(|label| label.as_ref())
        .unique()
        .collect();

    let unknown: Vec<&str> = groups
        .keys()
        .filter(|bucket| !ordered.contains(*bucket))
        .copied()
        .sorted()
        .collect();

    if !unknown.is_empty() {
        warn!(
            "Buckets not present in the ordered labels are excluded: {}",
            unknown.join(", ")
        );
    }

    let rows = ordered
        .into_iter()
        .filter_map(|label| {
            groups
                .remove(label)
                .map(|acc| acc.into_row(label.to_string()))
        })
        .collect();

    Ok(QuantileTable::new(quantile_col, rows))
}
