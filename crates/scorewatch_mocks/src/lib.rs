use arrow::array::{ArrayRef, Float64Array, UInt8Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use ndarray::{Array1, Zip};
use ndarray_rand::rand::rngs::StdRng;
use ndarray_rand::rand::SeedableRng;
use ndarray_rand::rand_distr::{Bernoulli, Normal};
use ndarray_rand::RandomExt;
use std::sync::Arc;

/// Scored loan book with a binary default flag.
///
/// Scores are `logistic(-1.5 + separation * label + noise)` with standard
/// normal noise, so `separation = 0` gives a score independent of the label
/// and larger values push defaulters toward 1.
#[derive(Debug, Clone)]
pub struct CreditPortfolio {
    pub labels: Array1<u8>,
    pub scores: Array1<f64>,
}

impl CreditPortfolio {
    pub fn generate(n: usize, bad_rate: f64, separation: f64, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);

        let bernoulli = Bernoulli::new(bad_rate.clamp(0.0, 1.0)).unwrap();
        let noise_dist = Normal::new(0.0, 1.0).unwrap();

        let labels: Array1<u8> =
            Array1::<bool>::random_using(n, bernoulli, &mut rng).mapv(u8::from);
        let noise = Array1::<f64>::random_using(n, noise_dist, &mut rng);

        let scores = Zip::from(&labels)
            .and(&noise)
            .map_collect(|&label, &eps| {
                let logit = -1.5 + separation * f64::from(label) + eps;
                1.0 / (1.0 + (-logit).exp())
            });

        CreditPortfolio { labels, scores }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn bad_count(&self) -> usize {
        self.labels.iter().filter(|&&label| label == 1).count()
    }

    /// Two-column batch `[score_col: Float64, target_col: UInt8]`
    pub fn to_record_batch(
        &self,
        score_col: &str,
        target_col: &str,
    ) -> Result<RecordBatch, ArrowError> {
        let schema = Schema::new(vec![
            Field::new(score_col, DataType::Float64, false),
            Field::new(target_col, DataType::UInt8, false),
        ]);

        let columns: Vec<ArrayRef> = vec![
            Arc::new(Float64Array::from(self.scores.to_vec())),
            Arc::new(UInt8Array::from(self.labels.to_vec())),
        ];

        RecordBatch::try_new(Arc::new(schema), columns)
    }
}

/// Normally distributed feature sample
pub fn normal_feature(n: usize, mean: f64, std_dev: f64, seed: u64) -> Array1<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let dist = Normal::new(mean, std_dev).unwrap();
    Array1::random_using(n, dist, &mut rng)
}

/// Feature frame with one Float64 column per name, each drawn from
/// `Normal(shift, 1)`. Every column gets its own stream derived from `seed`.
pub fn feature_frame(
    n: usize,
    features: &[&str],
    shift: f64,
    seed: u64,
) -> Result<RecordBatch, ArrowError> {
    let fields: Vec<Field> = features
        .iter()
        .map(|name| Field::new(*name, DataType::Float64, true))
        .collect();

    let columns: Vec<ArrayRef> = features
        .iter()
        .enumerate()
        .map(|(idx, _)| {
            let values = normal_feature(n, shift, 1.0, seed.wrapping_add(idx as u64));
            Arc::new(Float64Array::from(values.to_vec())) as ArrayRef
        })
        .collect();

    RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)
}
