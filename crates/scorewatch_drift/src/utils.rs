use crate::error::DriftError;
use arrow::array::AsArray;
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type};
use arrow::record_batch::RecordBatch;
use ndarray::Array1;

pub trait FeatureColumnHelpers {
    // Fails on the first requested feature missing from the batch, listing
    // the columns that are available
    fn check_columns<S: AsRef<str>>(
        &self,
        batch: &RecordBatch,
        features: &[S],
    ) -> Result<(), DriftError> {
        features.iter().try_for_each(|feature| {
            let feature = feature.as_ref();
            if batch.column_by_name(feature).is_none() {
                let available = batch
                    .schema()
                    .fields()
                    .iter()
                    .map(|field| field.name().clone())
                    .collect::<Vec<_>>()
                    .join(", ");

                return Err(DriftError::ColumnNotFound(format!(
                    "{feature} (available columns: {available})"
                )));
            }
            Ok(())
        })
    }

    // Reads a numeric column as f64, nulls become NaN
    fn column_values(&self, batch: &RecordBatch, feature: &str) -> Result<Array1<f64>, DriftError> {
        let column = batch
            .column_by_name(feature)
            .ok_or_else(|| DriftError::ColumnNotFound(feature.to_string()))?;

        let column = cast(column, &DataType::Float64)?;
        let values = column.as_primitive::<Float64Type>();

        Ok(values
            .iter()
            .map(|value| value.unwrap_or(f64::NAN))
            .collect())
    }
}
