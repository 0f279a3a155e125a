use crate::error::DriftError;
use crate::psi::monitor::PsiMonitor;
use arrow::record_batch::RecordBatch;
use ndarray::ArrayView1;
use scorewatch_types::psi::{PsiFeatureMap, PsiFeatureReport};

/// Population stability index of one feature.
///
/// `reference` defines `n_bins` equal-frequency bins; `comparison` is measured
/// against them. Missing values are dropped from both samples and a constant
/// reference yields 0.
///
/// # Errors
/// * `InvalidBinCountError` when `n_bins` is 0
/// * `EmptyArrayError` when `reference` holds no finite value
pub fn psi_for_feature(
    reference: &ArrayView1<f64>,
    comparison: &ArrayView1<f64>,
    n_bins: usize,
) -> Result<f64, DriftError> {
    PsiMonitor::new(n_bins)?.compute_feature_drift(reference, comparison)
}

/// Per-bin breakdown behind [`psi_for_feature`]
pub fn psi_feature_report(
    feature: &str,
    reference: &ArrayView1<f64>,
    comparison: &ArrayView1<f64>,
    n_bins: usize,
) -> Result<PsiFeatureReport, DriftError> {
    PsiMonitor::new(n_bins)?.feature_report(feature, reference, comparison)
}

/// PSI of each named column between two batches, largest drift first.
///
/// Every feature must exist in both batches. Numeric columns of any width are
/// accepted; nulls count as missing.
pub fn psi_for_dataframe<S: AsRef<str>>(
    reference: &RecordBatch,
    comparison: &RecordBatch,
    features: &[S],
    n_bins: usize,
) -> Result<PsiFeatureMap, DriftError> {
    PsiMonitor::new(n_bins)?.compute_drift(reference, comparison, features)
}
