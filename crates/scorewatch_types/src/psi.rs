use crate::error::TypeError;
use crate::util::HelperFuncs;
use arrow::array::{ArrayRef, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// Lower clip applied to every bin proportion before the log-ratio
pub const PSI_EPSILON: f64 = 1e-6;

/// One bin of a PSI computation, proportions already clipped
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Bin {
    pub id: usize,
    pub lower_limit: f64,
    pub upper_limit: f64,
    pub reference_proportion: f64,
    pub comparison_proportion: f64,
}

/// One bin's share of the PSI, `(p - q) * ln(p / q)`. Both proportions must
/// already be clipped away from zero.
pub fn psi_term(reference_proportion: f64, comparison_proportion: f64) -> f64 {
    let p = reference_proportion;
    let q = comparison_proportion;
    (p - q) * (p / q).ln()
}

impl Bin {
    pub fn contribution(&self) -> f64 {
        psi_term(self.reference_proportion, self.comparison_proportion)
    }
}

/// Per-bin breakdown behind a single feature's PSI
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PsiFeatureReport {
    pub feature: String,
    pub bins: Vec<Bin>,
    pub psi: f64,
    pub reference_count: usize,
    pub comparison_count: usize,
}

impl PsiFeatureReport {
    /// Report for a feature whose reference sample cannot be binned
    pub fn degenerate(feature: String, reference_count: usize, comparison_count: usize) -> Self {
        PsiFeatureReport {
            feature,
            bins: Vec::new(),
            psi: 0.0,
            reference_count,
            comparison_count,
        }
    }

    pub fn model_dump_json(&self) -> String {
        HelperFuncs::__json__(self)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum PsiSeverity {
    Stable,
    Moderate,
    Significant,
}

impl PsiSeverity {
    pub fn from_value(psi: f64, moderate: f64, significant: f64) -> Self {
        if psi >= significant {
            PsiSeverity::Significant
        } else if psi >= moderate {
            PsiSeverity::Moderate
        } else {
            PsiSeverity::Stable
        }
    }
}

impl Display for PsiSeverity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            PsiSeverity::Stable => "stable",
            PsiSeverity::Moderate => "moderate",
            PsiSeverity::Significant => "significant",
        };
        write!(f, "{label}")
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FeaturePsi {
    pub feature: String,
    pub psi: f64,
}

#[derive(Tabled)]
struct FeaturePsiEntry {
    #[tabled(rename = "Feature")]
    feature: String,
    #[tabled(rename = "PSI")]
    psi: String,
}

/// Feature PSI values, largest drift first
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct PsiFeatureMap {
    features: Vec<FeaturePsi>,
}

impl PsiFeatureMap {
    pub fn new(mut features: Vec<FeaturePsi>) -> Self {
        features.sort_by(|a, b| b.psi.total_cmp(&a.psi));
        PsiFeatureMap { features }
    }

    pub fn features(&self) -> &[FeaturePsi] {
        &self.features
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn get(&self, feature: &str) -> Option<f64> {
        self.features
            .iter()
            .find(|entry| entry.feature == feature)
            .map(|entry| entry.psi)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.features
            .iter()
            .map(|entry| (entry.feature.as_str(), entry.psi))
    }

    /// Features whose PSI is at or above `threshold`, largest first
    pub fn drifted(&self, threshold: f64) -> Vec<&FeaturePsi> {
        self.features
            .iter()
            .filter(|entry| entry.psi >= threshold)
            .collect()
    }

    pub fn to_record_batch(&self) -> Result<RecordBatch, TypeError> {
        let schema = Schema::new(vec![
            Field::new("feature", DataType::Utf8, false),
            Field::new("psi", DataType::Float64, false),
        ]);

        let columns: Vec<ArrayRef> = vec![
            Arc::new(StringArray::from_iter_values(
                self.features.iter().map(|f| f.feature.as_str()),
            )),
            Arc::new(Float64Array::from_iter_values(
                self.features.iter().map(|f| f.psi),
            )),
        ];

        Ok(RecordBatch::try_new(Arc::new(schema), columns)?)
    }

    pub fn model_dump_json(&self) -> String {
        HelperFuncs::__json__(self)
    }
}

impl Display for PsiFeatureMap {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let entries: Vec<FeaturePsiEntry> = self
            .features
            .iter()
            .map(|entry| FeaturePsiEntry {
                feature: entry.feature.clone(),
                psi: format!("{:.6}", entry.psi),
            })
            .collect();

        let mut table = Table::new(entries);
        table.with(Style::sharp());
        write!(f, "{table}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn feature(name: &str, psi: f64) -> FeaturePsi {
        FeaturePsi {
            feature: name.to_string(),
            psi,
        }
    }

    #[test]
    fn test_map_sorted_descending() {
        let map = PsiFeatureMap::new(vec![
            feature("income", 0.02),
            feature("age", 0.4),
            feature("utilization", 0.15),
        ]);

        let order: Vec<&str> = map.iter().map(|(name, _)| name).collect();
        assert_eq!(order, vec!["age", "utilization", "income"]);
        assert_eq!(map.get("income"), Some(0.02));
        assert_eq!(map.get("tenure"), None);

        let drifted = map.drifted(0.1);
        assert_eq!(drifted.len(), 2);
        assert_eq!(drifted[0].feature, "age");
    }

    #[test]
    fn test_severity_bands() {
        assert_eq!(PsiSeverity::from_value(0.05, 0.1, 0.25), PsiSeverity::Stable);
        assert_eq!(PsiSeverity::from_value(0.1, 0.1, 0.25), PsiSeverity::Moderate);
        assert_eq!(PsiSeverity::from_value(0.3, 0.1, 0.25), PsiSeverity::Significant);
        assert_eq!(PsiSeverity::Moderate.to_string(), "moderate");
    }

    #[test]
    fn test_bin_contribution() {
        let bin = Bin {
            id: 0,
            lower_limit: 0.0,
            upper_limit: 1.0,
            reference_proportion: 0.3,
            comparison_proportion: 0.2,
        };

        assert_relative_eq!(bin.contribution(), 0.1 * (1.5f64).ln(), epsilon = 1e-12);
    }

    #[test]
    fn test_record_batch() {
        let map = PsiFeatureMap::new(vec![feature("a", 0.1), feature("b", 0.2)]);
        let batch = map.to_record_batch().unwrap();
        assert_eq!(batch.num_rows(), 2);
        assert_eq!(batch.num_columns(), 2);
        assert!(map.to_string().contains("0.200000"));
    }
}
