use crate::error::MetricError;
use crate::ks::ks_safe;
use crate::utils::check_inputs;
use ndarray::{ArrayView1, Axis};
use rayon::prelude::*;
use std::collections::BTreeMap;

/// KS per cohort (vintage, segment, ...) using [`ks_safe`].
///
/// Cohorts holding a single class map to NaN. Cohorts are scored in parallel.
pub fn ks_by_group<S>(
    groups: &[S],
    y_true: &ArrayView1<u8>,
    y_proba: &ArrayView1<f64>,
) -> Result<BTreeMap<String, f64>, MetricError>
where
    S: AsRef<str>,
{
    check_inputs(y_true, y_proba)?;

    if groups.len() != y_true.len() {
        return Err(MetricError::LengthMismatch {
            labels: y_true.len(),
            scores: groups.len(),
        });
    }

    let mut members: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    for (idx, group) in groups.iter().enumerate() {
        members
            .entry(group.as_ref().to_string())
            .or_default()
            .push(idx);
    }

    members
        .into_par_iter()
        .map(|(group, indices)| {
            let labels = y_true.select(Axis(0), &indices);
            let scores = y_proba.select(Axis(0), &indices);
            let ks = ks_safe(&labels.view(), &scores.view())?;
            Ok((group, ks))
        })
        .collect()
}
