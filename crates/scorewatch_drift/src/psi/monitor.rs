use crate::error::DriftError;
use crate::utils::FeatureColumnHelpers;
use arrow::record_batch::RecordBatch;
use itertools::Itertools;
use ndarray::prelude::*;
use num_traits::Float;
use rayon::prelude::*;
use scorewatch_types::binning::{assign_bin, unique_edges, QuantileBinning};
use scorewatch_types::psi::{
    psi_term, Bin, FeaturePsi, PsiFeatureMap, PsiFeatureReport, PSI_EPSILON,
};
use tracing::{debug, instrument};

#[derive(Debug, Clone, Default)]
pub struct PsiMonitor {
    binning: QuantileBinning,
}

impl FeatureColumnHelpers for PsiMonitor {}

impl PsiMonitor {
    pub fn new(n_bins: usize) -> Result<Self, DriftError> {
        if n_bins == 0 {
            return Err(DriftError::InvalidBinCountError(n_bins));
        }

        Ok(PsiMonitor {
            binning: QuantileBinning::new(n_bins),
        })
    }

    pub fn num_bins(&self) -> usize {
        self.binning.num_bins
    }

    fn clean_column_vector<F>(column_vector: &ArrayView1<F>) -> Array1<F>
    where
        F: Float,
    {
        Array1::from(
            column_vector
                .iter()
                .filter(|&&x| x.is_finite())
                .cloned()
                .collect::<Vec<F>>(),
        )
    }

    /// Distinct reference quantile edges
    fn create_edges(&self, reference: &ArrayView1<f64>) -> Result<Vec<f64>, DriftError> {
        let edges = self.binning.compute_edges(reference)?;
        Ok(unique_edges(&edges))
    }

    /// Share of the binned values falling in each bin. Values outside the
    /// reference range are not binned and do not enter the denominator.
    fn compute_bin_proportions(column_vector: &ArrayView1<f64>, edges: &[f64]) -> Vec<f64> {
        let mut counts = vec![0usize; edges.len().saturating_sub(1)];

        column_vector
            .iter()
            .filter_map(|&value| assign_bin(value, edges))
            .for_each(|idx| counts[idx] += 1);

        let total: usize = counts.iter().sum();
        if total == 0 {
            return vec![0.0; counts.len()];
        }

        counts
            .into_iter()
            .map(|count| count as f64 / total as f64)
            .collect()
    }

    fn clip(proportion: f64) -> f64 {
        proportion.clamp(PSI_EPSILON, 1.0)
    }

    /// PSI of `(reference, comparison)` proportion pairs, each clipped to `[1e-6, 1]`
    pub fn compute_psi(proportion_pairs: &[(f64, f64)]) -> f64 {
        proportion_pairs
            .iter()
            .map(|(p, q)| psi_term(Self::clip(*p), Self::clip(*q)))
            .sum()
    }

    /// Bin-level breakdown of the PSI between two samples of one feature.
    ///
    /// Non-finite values are dropped from both samples. Edges come from the
    /// reference sample; when they collapse to a single value the feature is
    /// reported with no bins and a PSI of 0.
    #[instrument(skip_all, fields(feature = %feature))]
    pub fn feature_report(
        &self,
        feature: &str,
        reference: &ArrayView1<f64>,
        comparison: &ArrayView1<f64>,
    ) -> Result<PsiFeatureReport, DriftError> {
        let reference = Self::clean_column_vector(reference);
        let comparison = Self::clean_column_vector(comparison);

        if reference.is_empty() {
            return Err(DriftError::EmptyArrayError(format!(
                "unable to compute psi for {feature}, reference sample has no finite values"
            )));
        }

        let edges = self.create_edges(&reference.view())?;

        if edges.len() < 2 {
            debug!("reference sample is constant, psi is 0");
            return Ok(PsiFeatureReport::degenerate(
                feature.to_string(),
                reference.len(),
                comparison.len(),
            ));
        }

        if comparison.is_empty() {
            debug!("comparison sample has no finite values, all comparison bins are empty");
        }

        let reference_proportions = Self::compute_bin_proportions(&reference.view(), &edges);
        let comparison_proportions = Self::compute_bin_proportions(&comparison.view(), &edges);

        let bins: Vec<Bin> = edges
            .iter()
            .tuple_windows()
            .zip(reference_proportions.iter().zip(&comparison_proportions))
            .enumerate()
            .map(|(idx, ((&lower, &upper), (&p, &q)))| Bin {
                id: idx + 1,
                lower_limit: lower,
                upper_limit: upper,
                reference_proportion: Self::clip(p),
                comparison_proportion: Self::clip(q),
            })
            .collect();

        let proportion_pairs: Vec<(f64, f64)> = reference_proportions
            .into_iter()
            .zip(comparison_proportions)
            .collect();
        let psi = Self::compute_psi(&proportion_pairs);

        Ok(PsiFeatureReport {
            feature: feature.to_string(),
            bins,
            psi,
            reference_count: reference.len(),
            comparison_count: comparison.len(),
        })
    }

    pub fn compute_feature_drift(
        &self,
        reference: &ArrayView1<f64>,
        comparison: &ArrayView1<f64>,
    ) -> Result<f64, DriftError> {
        Ok(self.feature_report("feature", reference, comparison)?.psi)
    }

    /// PSI of every requested column, computed in parallel.
    ///
    /// Both batches must hold every feature; columns are cast to Float64 and
    /// nulls are treated as missing. Repeated feature names are computed once.
    pub fn compute_drift<S: AsRef<str>>(
        &self,
        reference: &RecordBatch,
        comparison: &RecordBatch,
        features: &[S],
    ) -> Result<PsiFeatureMap, DriftError> {
        self.check_columns(reference, features)?;
        self.check_columns(comparison, features)?;

        let features = features.iter().map(|feature| feature.as_ref()).unique().collect_vec();

        let drift_values = features
            .into_par_iter()
            .map(|feature| -> Result<FeaturePsi, DriftError> {
                let reference_values = self.column_values(reference, feature)?;
                let comparison_values = self.column_values(comparison, feature)?;

                let report = self.feature_report(
                    feature,
                    &reference_values.view(),
                    &comparison_values.view(),
                )?;

                Ok(FeaturePsi {
                    feature: feature.to_string(),
                    psi: report.psi,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!("computed psi for {} features", drift_values.len());

        Ok(PsiFeatureMap::new(drift_values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::Array;
    use ndarray_rand::rand_distr::Uniform;
    use ndarray_rand::RandomExt;
    use scorewatch_mocks::feature_frame;

    #[test]
    fn test_invalid_bin_count() {
        assert!(matches!(
            PsiMonitor::new(0).unwrap_err(),
            DriftError::InvalidBinCountError(0)
        ));
        assert_eq!(PsiMonitor::default().num_bins(), 10);
    }

    #[test]
    fn test_compute_psi_basic() {
        let proportions = vec![(0.3, 0.2), (0.4, 0.4), (0.3, 0.4)];

        let result = PsiMonitor::compute_psi(&proportions);

        let expected_psi = (0.3 - 0.2) * (0.3 / 0.2).ln()
            + (0.4 - 0.4) * (0.4 / 0.4).ln()
            + (0.3 - 0.4) * (0.3 / 0.4).ln();

        assert_relative_eq!(result, expected_psi, epsilon = 1e-12);
    }

    #[test]
    fn test_compute_psi_clips_empty_bins() {
        let result = PsiMonitor::compute_psi(&[(0.5, 0.0), (0.5, 1.0)]);

        let expected = (0.5 - PSI_EPSILON) * (0.5 / PSI_EPSILON).ln() + (0.5 - 1.0) * 0.5f64.ln();
        assert!(result.is_finite());
        assert_relative_eq!(result, expected, epsilon = 1e-9);
    }

    #[test]
    fn test_bin_proportions_ignore_out_of_range() {
        let edges = vec![0.0, 1.0, 2.0];
        let data = Array1::from_vec(vec![0.0, 0.5, 1.5, 2.0, -3.0, 7.0]);

        let proportions = PsiMonitor::compute_bin_proportions(&data.view(), &edges);

        assert_eq!(proportions, vec![0.5, 0.5]);
    }

    #[test]
    fn test_self_psi_is_zero() {
        let monitor = PsiMonitor::default();
        let data = Array::random(1030, Uniform::new(0., 10.));

        let psi = monitor
            .compute_feature_drift(&data.view(), &data.view())
            .unwrap();

        assert_eq!(psi, 0.0);
    }

    #[test]
    fn test_psi_is_non_negative() {
        let monitor = PsiMonitor::new(8).unwrap();

        for _ in 0..5 {
            let reference = Array::random(500, Uniform::new(0., 10.));
            let comparison = Array::random(300, Uniform::new(2., 12.));

            let psi = monitor
                .compute_feature_drift(&reference.view(), &comparison.view())
                .unwrap();
            assert!(psi >= 0.0);
        }
    }

    #[test]
    fn test_shifted_sample_drifts() {
        let monitor = PsiMonitor::default();
        let reference = scorewatch_mocks::normal_feature(5_000, 0.0, 1.0, 1);
        let comparison = scorewatch_mocks::normal_feature(5_000, 1.0, 1.0, 2);

        let psi = monitor
            .compute_feature_drift(&reference.view(), &comparison.view())
            .unwrap();

        assert!(psi > 0.25, "expected significant drift, got {psi}");
    }

    #[test]
    fn test_constant_reference_is_zero() {
        let monitor = PsiMonitor::default();
        let reference = Array1::from_elem(100, 4.2);
        let comparison = Array::random(100, Uniform::new(0., 10.));

        let report = monitor
            .feature_report("balance", &reference.view(), &comparison.view())
            .unwrap();

        assert_eq!(report.psi, 0.0);
        assert!(report.bins.is_empty());
        assert_eq!(report.reference_count, 100);
    }

    #[test]
    fn test_missing_values_are_dropped() {
        let monitor = PsiMonitor::new(4).unwrap();
        let clean = Array1::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        let dirty = Array1::from_vec(vec![
            1.0,
            f64::NAN,
            2.0,
            3.0,
            f64::INFINITY,
            4.0,
            5.0,
            6.0,
            7.0,
            f64::NAN,
            8.0,
        ]);
        let comparison = Array1::from_vec(vec![1.0, 1.5, 2.0, 6.5, 7.0, 8.0]);

        let psi_clean = monitor
            .compute_feature_drift(&clean.view(), &comparison.view())
            .unwrap();
        let psi_dirty = monitor
            .compute_feature_drift(&dirty.view(), &comparison.view())
            .unwrap();

        assert_eq!(psi_clean, psi_dirty);
    }

    #[test]
    fn test_empty_reference_fails() {
        let monitor = PsiMonitor::default();
        let reference = Array1::from_vec(vec![f64::NAN, f64::NAN]);
        let comparison = Array1::from_vec(vec![1.0, 2.0]);

        let result = monitor.compute_feature_drift(&reference.view(), &comparison.view());
        assert!(matches!(result, Err(DriftError::EmptyArrayError(_))));
    }

    #[test]
    fn test_feature_report_bins() {
        let monitor = PsiMonitor::new(4).unwrap();
        let reference = Array1::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        let comparison = Array1::from_vec(vec![1.0, 1.5, 2.0, 2.5]);

        let report = monitor
            .feature_report("utilization", &reference.view(), &comparison.view())
            .unwrap();

        assert_eq!(report.bins.len(), 4);
        assert_eq!(report.bins[0].id, 1);
        assert_eq!(report.bins[0].lower_limit, 1.0);
        assert_eq!(report.bins[3].upper_limit, 8.0);

        // every comparison value sits in the first bin
        assert_relative_eq!(report.bins[0].comparison_proportion, 1.0);
        for bin in &report.bins[1..] {
            assert_eq!(bin.comparison_proportion, PSI_EPSILON);
            assert_relative_eq!(bin.reference_proportion, 0.25);
        }

        let total: f64 = report.bins.iter().map(Bin::contribution).sum();
        assert_relative_eq!(report.psi, total);
        assert!(report.psi.is_finite());
    }

    #[test]
    fn test_report_total_matches_bin_contributions() {
        let monitor = PsiMonitor::new(5).unwrap();
        let reference = scorewatch_mocks::normal_feature(400, 0.0, 1.0, 3);
        let comparison = scorewatch_mocks::normal_feature(400, 0.8, 1.0, 4);

        let report = monitor
            .feature_report("age", &reference.view(), &comparison.view())
            .unwrap();

        let pairs: Vec<(f64, f64)> = report
            .bins
            .iter()
            .map(|bin| (bin.reference_proportion, bin.comparison_proportion))
            .collect();
        let contributions: f64 = report.bins.iter().map(Bin::contribution).sum();

        assert_relative_eq!(report.psi, PsiMonitor::compute_psi(&pairs), epsilon = 1e-12);
        assert_relative_eq!(report.psi, contributions, epsilon = 1e-12);
    }

    #[test]
    fn test_compute_drift() {
        let features = vec!["feature_1", "feature_2", "feature_3"];
        let reference = feature_frame(1_030, &features, 0.0, 10).unwrap();

        let monitor = PsiMonitor::default();

        let drift_map = monitor
            .compute_drift(&reference, &reference, &features)
            .unwrap();

        assert_eq!(drift_map.len(), 3);
        drift_map.iter().for_each(|(_, value)| assert_eq!(value, 0.0));

        let drifted = feature_frame(1_030, &features, 0.5, 99).unwrap();
        let new_drift_map = monitor
            .compute_drift(&reference, &drifted, &features)
            .unwrap();

        new_drift_map
            .iter()
            .for_each(|(_, value)| assert!(value > 0.0));
    }

    #[test]
    fn test_compute_drift_missing_column() {
        let reference = feature_frame(100, &["age", "income"], 0.0, 1).unwrap();
        let comparison = feature_frame(100, &["age"], 0.0, 2).unwrap();

        let result = PsiMonitor::default().compute_drift(&reference, &comparison, &["age", "income"]);
        assert!(matches!(result, Err(DriftError::ColumnNotFound(_))));
    }
}
