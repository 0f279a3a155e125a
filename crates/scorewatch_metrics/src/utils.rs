use crate::error::MetricError;
use ndarray::ArrayView1;

/// Counts of negative (0) and positive (1) labels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassCounts {
    pub negatives: usize,
    pub positives: usize,
}

impl ClassCounts {
    pub fn has_both_classes(&self) -> bool {
        self.negatives > 0 && self.positives > 0
    }
}

/// Validates that labels and scores are aligned, labels are binary and no
/// score is NaN, returning the class counts.
pub fn check_inputs(
    y_true: &ArrayView1<u8>,
    y_proba: &ArrayView1<f64>,
) -> Result<ClassCounts, MetricError> {
    if y_true.len() != y_proba.len() {
        return Err(MetricError::LengthMismatch {
            labels: y_true.len(),
            scores: y_proba.len(),
        });
    }

    if let Some(pos) = y_proba.iter().position(|score| score.is_nan()) {
        return Err(MetricError::NanScore(pos));
    }

    count_classes(y_true)
}

pub fn count_classes(y_true: &ArrayView1<u8>) -> Result<ClassCounts, MetricError> {
    let mut counts = ClassCounts {
        negatives: 0,
        positives: 0,
    };

    for &label in y_true.iter() {
        match label {
            0 => counts.negatives += 1,
            1 => counts.positives += 1,
            other => return Err(MetricError::InvalidLabel(other)),
        }
    }

    Ok(counts)
}

/// Indices of `y_proba` ordered by score, descending when `descending` is set.
/// Equal scores keep their input order.
pub fn argsort_scores(y_proba: &ArrayView1<f64>, descending: bool) -> Vec<usize> {
    let mut order: Vec<usize> = (0..y_proba.len()).collect();
    if descending {
        order.sort_by(|&a, &b| y_proba[b].total_cmp(&y_proba[a]));
    } else {
        order.sort_by(|&a, &b| y_proba[a].total_cmp(&y_proba[b]));
    }
    order
}
