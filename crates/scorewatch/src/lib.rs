pub use scorewatch_drift::{
    psi_feature_report, psi_for_dataframe, psi_for_feature, DriftError, PsiMonitor,
};
pub use scorewatch_metrics::{
    assign_quantile_labels, confusion_matrix, construct_metrics_table, full_performance_metrics,
    ks_by_group, ks_safe, ks_score, performance_metrics, roc_auc_score, MetricError,
    QuantileAssignment, DEFAULT_THRESHOLD,
};
pub use scorewatch_settings::{
    setup_logging, ConfigError, DriftSettings, LogSettings, MetricSettings, ScorewatchConfig,
};
pub use scorewatch_types::{
    error::{TypeError, UtilError},
    scorewatch_version, Bin, ConfusionMatrix, FeaturePsi, FullPerformanceMetrics, HelperFuncs,
    MetricValue, PerformanceMetrics, PsiFeatureMap, PsiFeatureReport, PsiSeverity,
    QuantileBinning, QuantileTable, QuantileTableRow,
};

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use scorewatch_mocks::{feature_frame, CreditPortfolio};

    #[test]
    fn test_scored_population_workflow() {
        let portfolio = CreditPortfolio::generate(5_000, 0.2, 2.0, 17);
        let (y, p) = (portfolio.labels.view(), portfolio.scores.view());

        let ranking = performance_metrics(&y, &p).unwrap();
        let settings = MetricSettings::from_source(|_| None).unwrap();
        assert_eq!(settings.decision_threshold, DEFAULT_THRESHOLD);
        let full = full_performance_metrics(&y, &p, settings.decision_threshold).unwrap();

        assert_relative_eq!(ranking.gini, 2.0 * ranking.auc - 1.0, epsilon = 1e-12);
        assert_eq!(ranking.ks, full.ks);
        assert_eq!(full.confusion_matrix().total(), 5_000);
        assert_eq!(ks_safe(&y, &p).unwrap(), ranking.ks);

        let batch = portfolio.to_record_batch("score", "default_flag").unwrap();
        let assignment = assign_quantile_labels(&p, 10, "decile").unwrap();
        let batch = assignment.append_to(&batch, "decile").unwrap();

        let table = construct_metrics_table(
            &batch,
            "decile",
            "score",
            "default_flag",
            &assignment.ordered_labels,
        )
        .unwrap();

        assert_eq!(table.len(), 10);
        let volume: u64 = table.rows.iter().map(|row| row.volume).sum();
        assert_eq!(volume, 5_000);
    }

    #[test]
    fn test_feature_stability_workflow() {
        let features = ["age", "income"];
        let reference = feature_frame(2_000, &features, 0.0, 1).unwrap();
        let comparison = feature_frame(2_000, &features, 2.0, 2).unwrap();

        let settings = DriftSettings {
            psi_bins: 10,
            moderate_threshold: 0.1,
            significant_threshold: 0.25,
        };

        let map =
            psi_for_dataframe(&reference, &comparison, &features, settings.psi_bins).unwrap();

        assert_eq!(map.drifted(settings.moderate_threshold).len(), 2);
        for (_, psi) in map.iter() {
            assert_eq!(settings.severity(psi), PsiSeverity::Significant);
        }
    }
}
