use crate::error::MetricError;
use crate::utils::{argsort_scores, check_inputs};
use ndarray::ArrayView1;

/// Area under the ROC curve.
///
/// Computed from the Mann-Whitney U statistic with mid-ranks for tied scores,
/// which equals the trapezoidal area under the ROC curve.
///
/// Fails with [`MetricError::SingleClass`] when labels hold only one class.
pub fn roc_auc_score(
    y_true: &ArrayView1<u8>,
    y_proba: &ArrayView1<f64>,
) -> Result<f64, MetricError> {
    let counts = check_inputs(y_true, y_proba)?;

    if !counts.has_both_classes() {
        return Err(MetricError::SingleClass);
    }

    let order = argsort_scores(y_proba, false);
    let n = order.len();

    // sum of 1-based ranks held by positives, ties share their mean rank
    let mut positive_rank_sum = 0.0;
    let mut start = 0;
    while start < n {
        let score = y_proba[order[start]];
        let mut end = start + 1;
        while end < n && y_proba[order[end]] == score {
            end += 1;
        }

        let mid_rank = (start + 1 + end) as f64 / 2.0;
        let tier_positives = order[start..end]
            .iter()
            .filter(|&&idx| y_true[idx] == 1)
            .count();
        positive_rank_sum += mid_rank * tier_positives as f64;

        start = end;
    }

    let n_pos = counts.positives as f64;
    let n_neg = counts.negatives as f64;
    let u = positive_rank_sum - n_pos * (n_pos + 1.0) / 2.0;

    Ok(u / (n_pos * n_neg))
}
