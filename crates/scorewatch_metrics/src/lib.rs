pub mod auc;
pub mod cohort;
pub mod error;
pub mod ks;
pub mod performance;
pub mod quantile;
pub mod table;
pub mod utils;

pub use auc::roc_auc_score;
pub use cohort::ks_by_group;
pub use error::MetricError;
pub use ks::{ks_safe, ks_score};
pub use performance::{
    confusion_matrix, full_performance_metrics, performance_metrics, DEFAULT_THRESHOLD,
};
pub use quantile::{assign_quantile_labels, QuantileAssignment};
pub use table::construct_metrics_table;
