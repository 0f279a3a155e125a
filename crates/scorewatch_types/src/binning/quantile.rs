use crate::error::TypeError;
use ndarray::ArrayView1;
use num_traits::{Float, FromPrimitive};
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct QuantileBinning {
    pub num_bins: usize,
}

impl Default for QuantileBinning {
    fn default() -> Self {
        QuantileBinning { num_bins: 10 }
    }
}

impl QuantileBinning {
    pub fn new(num_bins: usize) -> Self {
        QuantileBinning { num_bins }
    }

    /// Computes the `num_bins + 1` quantile edges of `arr` at levels `0, 1/n, ..., 1`
    /// using the R-7 method (Hyndman & Fan Type 7, linear interpolation).
    ///
    /// The R-7 method uses the formula:
    /// - m = 1 - p
    /// - j = floor(np + m)
    /// - h = np + m - j
    /// - Q(p) = (1 - h) × x[j] + h × x[j+1]
    ///
    /// The first and last edges are the sample minimum and maximum. Edges are
    /// returned as computed, duplicates included; see [`unique_edges`].
    ///
    /// # Arguments
    /// * `arr` - Data values, any order, no NaN
    ///
    /// # Returns
    /// * `Ok(Vec<F>)` - Non-decreasing quantile edges
    /// * `Err(TypeError)` - If `num_bins` is zero or `arr` is empty
    pub fn compute_edges<F>(&self, arr: &ArrayView1<F>) -> Result<Vec<F>, TypeError>
    where
        F: Float + FromPrimitive,
    {
        if self.num_bins < 1 {
            return Err(TypeError::InvalidParameterError(
                "num_bins must be at least 1".to_string(),
            ));
        }

        if arr.is_empty() {
            return Err(TypeError::EmptyArrayError(
                "unable to compute bin edges".to_string(),
            ));
        }

        let mut data: Vec<F> = arr.to_vec();
        data.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let n = data.len();

        let edges = (0..=self.num_bins)
            .map(|i| {
                let p = i as f64 / self.num_bins as f64;
                let m = 1.0 - p;
                let np_plus_m = (n as f64) * p + m;
                let j = np_plus_m.floor() as usize;
                let h = np_plus_m - (j as f64);

                // paper is 1-indexed
                let j_zero_indexed = j.saturating_sub(1).min(n - 1);
                let j_plus_1_zero_indexed = std::cmp::min(j_zero_indexed + 1, n - 1);

                let lower = data[j_zero_indexed];
                let upper = data[j_plus_1_zero_indexed];

                if h == 0.0 || lower == upper {
                    lower
                } else {
                    let h_f = F::from_f64(h).unwrap_or_else(F::zero);
                    lower + h_f * (upper - lower)
                }
            })
            .collect();

        Ok(edges)
    }
}

/// Collapses repeated edges, keeping the first occurrence of each value.
/// Input must already be sorted.
pub fn unique_edges<F: Float>(edges: &[F]) -> Vec<F> {
    let mut unique: Vec<F> = Vec::with_capacity(edges.len());
    for &edge in edges {
        if unique.last().map_or(true, |&last| last != edge) {
            unique.push(edge);
        }
    }
    unique
}

/// Locates the bin of `value` given sorted, distinct `edges`.
///
/// Bins are right-closed `(e[i], e[i+1]]`, except the first which also holds
/// `e[0]`. Values outside `[e[0], e[last]]` fall in no bin.
pub fn assign_bin<F: Float>(value: F, edges: &[F]) -> Option<usize> {
    if edges.len() < 2 || value.is_nan() {
        return None;
    }

    let idx = edges.partition_point(|&edge| edge < value);

    match idx {
        0 if value == edges[0] => Some(0),
        0 => None,
        i if i == edges.len() => None,
        i => Some(i - 1),
    }
}
