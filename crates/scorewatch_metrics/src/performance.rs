use crate::auc::roc_auc_score;
use crate::error::MetricError;
use crate::ks::ks_score;
use crate::utils::check_inputs;
use ndarray::ArrayView1;
use scorewatch_types::{ConfusionMatrix, FullPerformanceMetrics, PerformanceMetrics};
use tracing::instrument;

pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// KS, AUC and Gini (2·AUC − 1) of a score against binary labels.
///
/// Single-class labels are not guarded here: the AUC error propagates.
#[instrument(skip_all, fields(n = y_true.len()))]
pub fn performance_metrics(
    y_true: &ArrayView1<u8>,
    y_proba: &ArrayView1<f64>,
) -> Result<PerformanceMetrics, MetricError> {
    let auc = roc_auc_score(y_true, y_proba)?;
    let ks = ks_score(y_true, y_proba)?;

    Ok(PerformanceMetrics::new(ks, auc))
}

/// Confusion matrix of `y_proba >= threshold` against `y_true`
pub fn confusion_matrix(
    y_true: &ArrayView1<u8>,
    y_proba: &ArrayView1<f64>,
    threshold: f64,
) -> Result<ConfusionMatrix, MetricError> {
    check_inputs(y_true, y_proba)?;

    let matrix = y_true.iter().zip(y_proba.iter()).fold(
        ConfusionMatrix::default(),
        |mut matrix, (&label, &score)| {
            match (label == 1, score >= threshold) {
                (true, true) => matrix.tp += 1,
                (false, false) => matrix.tn += 1,
                (false, true) => matrix.fp += 1,
                (true, false) => matrix.fn_ += 1,
            }
            matrix
        },
    );

    Ok(matrix)
}

/// Ranking metrics plus accuracy, precision, recall, F1 and confusion counts
/// at `threshold` (predicted positive iff score ≥ threshold).
///
/// Rates with an empty denominator are reported as 0.0.
#[instrument(skip(y_true, y_proba), fields(n = y_true.len()))]
pub fn full_performance_metrics(
    y_true: &ArrayView1<u8>,
    y_proba: &ArrayView1<f64>,
    threshold: f64,
) -> Result<FullPerformanceMetrics, MetricError> {
    if threshold.is_nan() {
        return Err(MetricError::InvalidParameterError(
            "threshold must be a number".to_string(),
        ));
    }

    let ranking = performance_metrics(y_true, y_proba)?;
    let matrix = confusion_matrix(y_true, y_proba, threshold)?;

    Ok(FullPerformanceMetrics::from_parts(
        ranking, matrix, threshold,
    ))
}
