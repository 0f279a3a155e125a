use crate::util::HelperFuncs;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Rank-ordering metrics of a score against a binary target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub ks: f64,
    pub auc: f64,
    pub gini: f64,
}

impl PerformanceMetrics {
    pub fn new(ks: f64, auc: f64) -> Self {
        PerformanceMetrics {
            ks,
            auc,
            gini: 2.0 * auc - 1.0,
        }
    }

    pub fn as_tuple(&self) -> (f64, f64, f64) {
        (self.ks, self.auc, self.gini)
    }
}

impl Display for PerformanceMetrics {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", HelperFuncs::__str__(self))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub tp: u64,
    pub tn: u64,
    pub fp: u64,
    pub fn_: u64,
}

impl ConfusionMatrix {
    pub fn total(&self) -> u64 {
        self.tp + self.tn + self.fp + self.fn_
    }

    pub fn accuracy(&self) -> f64 {
        safe_ratio(self.tp + self.tn, self.total())
    }

    pub fn precision(&self) -> f64 {
        safe_ratio(self.tp, self.tp + self.fp)
    }

    pub fn recall(&self) -> f64 {
        safe_ratio(self.tp, self.tp + self.fn_)
    }

    pub fn f1(&self) -> f64 {
        safe_ratio(2 * self.tp, 2 * self.tp + self.fp + self.fn_)
    }
}

/// Zero-division policy: an empty denominator yields 0.0
fn safe_ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Value of a named metric, floats for rates and scores, integers for counts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Count(u64),
    Float(f64),
}

impl MetricValue {
    pub fn as_f64(&self) -> f64 {
        match self {
            MetricValue::Count(v) => *v as f64,
            MetricValue::Float(v) => *v,
        }
    }
}

impl Display for MetricValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricValue::Count(v) => write!(f, "{v}"),
            MetricValue::Float(v) => write!(f, "{v:.6}"),
        }
    }
}

/// Ranking and thresholded classification metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FullPerformanceMetrics {
    #[serde(rename = "AUC")]
    pub auc: f64,
    #[serde(rename = "KS")]
    pub ks: f64,
    #[serde(rename = "Gini")]
    pub gini: f64,
    #[serde(rename = "Accuracy")]
    pub accuracy: f64,
    #[serde(rename = "Precision")]
    pub precision: f64,
    #[serde(rename = "Recall")]
    pub recall: f64,
    #[serde(rename = "F1")]
    pub f1: f64,
    #[serde(rename = "TP")]
    pub tp: u64,
    #[serde(rename = "TN")]
    pub tn: u64,
    #[serde(rename = "FP")]
    pub fp: u64,
    #[serde(rename = "FN")]
    pub fn_: u64,
    pub threshold: f64,
}

impl FullPerformanceMetrics {
    pub fn from_parts(ranking: PerformanceMetrics, matrix: ConfusionMatrix, threshold: f64) -> Self {
        FullPerformanceMetrics {
            auc: ranking.auc,
            ks: ranking.ks,
            gini: ranking.gini,
            accuracy: matrix.accuracy(),
            precision: matrix.precision(),
            recall: matrix.recall(),
            f1: matrix.f1(),
            tp: matrix.tp,
            tn: matrix.tn,
            fp: matrix.fp,
            fn_: matrix.fn_,
            threshold,
        }
    }

    pub fn confusion_matrix(&self) -> ConfusionMatrix {
        ConfusionMatrix {
            tp: self.tp,
            tn: self.tn,
            fp: self.fp,
            fn_: self.fn_,
        }
    }

    /// Name to value view, in reporting order
    pub fn metrics(&self) -> Vec<(&'static str, MetricValue)> {
        vec![
            ("AUC", MetricValue::Float(self.auc)),
            ("KS", MetricValue::Float(self.ks)),
            ("Gini", MetricValue::Float(self.gini)),
            ("Accuracy", MetricValue::Float(self.accuracy)),
            ("Precision", MetricValue::Float(self.precision)),
            ("Recall", MetricValue::Float(self.recall)),
            ("F1", MetricValue::Float(self.f1)),
            ("TP", MetricValue::Count(self.tp)),
            ("TN", MetricValue::Count(self.tn)),
            ("FP", MetricValue::Count(self.fp)),
            ("FN", MetricValue::Count(self.fn_)),
        ]
    }

    pub fn get(&self, name: &str) -> Option<MetricValue> {
        self.metrics()
            .into_iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }

    pub fn model_dump_json(&self) -> String {
        HelperFuncs::__json__(self)
    }
}

impl Display for FullPerformanceMetrics {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", HelperFuncs::__str__(self))
    }
}
