use crate::error::MetricError;
use crate::utils::{argsort_scores, check_inputs};
use ndarray::ArrayView1;
use tracing::debug;

/// Two-sample Kolmogorov-Smirnov statistic between the score distributions of
/// positives (bad, label 1) and negatives (good, label 0).
///
/// Observations are swept from the highest score down. The gap between the
/// cumulative fraction of positives and of negatives is measured once every
/// observation sharing a score has been counted, so the result does not depend
/// on how tied observations are ordered. A row-by-row sweep would instead
/// credit part of a tier before the rest of it is seen: `y = [1, 0]` with
/// `p = [0.5, 0.5]` gives 1.0 that way and 0.0 here. Points-based scorecards
/// produce many such tiers.
///
/// # Arguments
///
/// * `y_true` - Binary labels (0 = good, 1 = bad)
/// * `y_proba` - Predicted probability of the positive class
///
/// # Returns
///
/// KS in `[0, 1]`, or `0.0` when either class is absent
pub fn ks_score(y_true: &ArrayView1<u8>, y_proba: &ArrayView1<f64>) -> Result<f64, MetricError> {
    let counts = check_inputs(y_true, y_proba)?;

    if !counts.has_both_classes() {
        debug!(
            "KS undefined for {} positives and {} negatives, reporting 0.0",
            counts.positives, counts.negatives
        );
        return Ok(0.0);
    }

    Ok(ks_statistic(
        y_true,
        y_proba,
        counts.positives as f64,
        counts.negatives as f64,
    ))
}

/// KS variant for grouped computation (e.g. per vintage).
///
/// Returns NaN instead of 0.0 when either class is absent, so the caller can
/// drop or flag the group.
pub fn ks_safe(y_true: &ArrayView1<u8>, y_proba: &ArrayView1<f64>) -> Result<f64, MetricError> {
    let counts = check_inputs(y_true, y_proba)?;

    if !counts.has_both_classes() {
        debug!("KS undefined for single-class group, reporting NaN");
        return Ok(f64::NAN);
    }

    ks_score(y_true, y_proba)
}

fn ks_statistic(
    y_true: &ArrayView1<u8>,
    y_proba: &ArrayView1<f64>,
    total_bad: f64,
    total_good: f64,
) -> f64 {
    let order = argsort_scores(y_proba, true);

    let mut cum_bad = 0.0;
    let mut cum_good = 0.0;
    let mut ks: f64 = 0.0;

    for (pos, &idx) in order.iter().enumerate() {
        if y_true[idx] == 1 {
            cum_bad += 1.0;
        } else {
            cum_good += 1.0;
        }

        // only compare at the end of a score tier
        let tier_end = order
            .get(pos + 1)
            .map_or(true, |&next| y_proba[next] != y_proba[idx]);

        if tier_end {
            let gap = (cum_bad / total_bad - cum_good / total_good).abs();
            ks = ks.max(gap);
        }
    }

    ks
}
