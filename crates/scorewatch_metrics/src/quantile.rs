use crate::error::MetricError;
use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use ndarray::{Array1, ArrayView1};
use scorewatch_types::{assign_bin, unique_edges, QuantileBinning};
use std::sync::Arc;
use tracing::debug;

/// Equal-frequency bucket labels for a score vector
#[derive(Debug, Clone, PartialEq)]
pub struct QuantileAssignment {
    /// Per-row label, `None` for non-finite scores
    pub labels: Vec<Option<String>>,
    /// Labels from the lowest to the highest score bucket
    pub ordered_labels: Vec<String>,
    /// Distinct bucket edges
    pub edges: Vec<f64>,
}

impl QuantileAssignment {
    pub fn to_array(&self) -> StringArray {
        StringArray::from_iter(self.labels.iter().map(|label| label.as_deref()))
    }

    /// Returns `batch` with the labels appended as a nullable Utf8 column
    pub fn append_to(&self, batch: &RecordBatch, column: &str) -> Result<RecordBatch, MetricError> {
        let mut fields: Vec<Field> = batch
            .schema()
            .fields()
            .iter()
            .map(|field| field.as_ref().clone())
            .collect();
        fields.push(Field::new(column, DataType::Utf8, true));

        let mut columns: Vec<ArrayRef> = batch.columns().to_vec();
        columns.push(Arc::new(self.to_array()));

        Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)?)
    }
}

/// Cuts scores into `n_buckets` equal-frequency buckets labelled
/// `{prefix}_1` (lowest scores) to `{prefix}_k`.
///
/// Duplicate quantile edges collapse, so fewer than `n_buckets` buckets may be
/// returned for heavily tied scores. A constant score vector yields a single
/// bucket.
pub fn assign_quantile_labels(
    scores: &ArrayView1<f64>,
    n_buckets: usize,
    prefix: &str,
) -> Result<QuantileAssignment, MetricError> {
    let finite: Array1<f64> = scores.iter().copied().filter(|s| s.is_finite()).collect();

    let edges = unique_edges(&QuantileBinning::new(n_buckets).compute_edges(&finite.view())?);

    let label = |k: usize| format!("{prefix}_{}", k + 1);

    if edges.len() < 2 {
        debug!("Scores hold a single distinct value, assigning one bucket");
        let labels = scores
            .iter()
            .map(|s| s.is_finite().then(|| label(0)))
            .collect();

        return Ok(QuantileAssignment {
            labels,
            ordered_labels: vec![label(0)],
            edges,
        });
    }

    let labels = scores
        .iter()
        .map(|&s| assign_bin(s, &edges).map(label))
        .collect();

    let ordered_labels = (0..edges.len() - 1).map(label).collect();

    Ok(QuantileAssignment {
        labels,
        ordered_labels,
        edges,
    })
}
