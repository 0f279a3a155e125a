use crate::error::TypeError;
use arrow::array::{ArrayRef, Float64Array, StringArray, UInt64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use owo_colors::OwoColorize;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use tabled::settings::{object::Rows, Alignment, Color, Format, Style};
use tabled::{Table, Tabled};

/// Aggregates of one score bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantileTableRow {
    pub bucket: String,
    pub volume: u64,
    pub event_rate: f64,
    pub score_min: f64,
    pub score_max: f64,
}

#[derive(Tabled)]
struct QuantileTableEntry {
    #[tabled(rename = "Bucket")]
    bucket: String,
    #[tabled(rename = "Volume")]
    volume: u64,
    #[tabled(rename = "Event Rate")]
    event_rate: String,
    #[tabled(rename = "Score Min")]
    score_min: String,
    #[tabled(rename = "Score Max")]
    score_max: String,
}

/// Event-rate table, one row per bucket in caller-defined order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantileTable {
    /// Name of the bucket column the table was grouped by
    pub bucket_column: String,
    pub rows: Vec<QuantileTableRow>,
}

impl QuantileTable {
    pub fn new(bucket_column: impl Into<String>, rows: Vec<QuantileTableRow>) -> Self {
        QuantileTable {
            bucket_column: bucket_column.into(),
            rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, bucket: &str) -> Option<&QuantileTableRow> {
        self.rows.iter().find(|row| row.bucket == bucket)
    }

    /// True when event rates move in a single direction across the ordered buckets.
    /// Buckets without a defined event rate are skipped.
    pub fn is_event_rate_monotonic(&self) -> bool {
        let rates: Vec<f64> = self
            .rows
            .iter()
            .map(|row| row.event_rate)
            .filter(|rate| !rate.is_nan())
            .collect();

        rates.windows(2).all(|pair| pair[1] >= pair[0])
            || rates.windows(2).all(|pair| pair[1] <= pair[0])
    }

    pub fn schema(&self) -> Schema {
        Schema::new(vec![
            Field::new(&self.bucket_column, DataType::Utf8, false),
            Field::new("volume", DataType::UInt64, false),
            Field::new("event_rate", DataType::Float64, false),
            Field::new("score_min", DataType::Float64, false),
            Field::new("score_max", DataType::Float64, false),
        ])
    }

    pub fn to_record_batch(&self) -> Result<RecordBatch, TypeError> {
        let columns: Vec<ArrayRef> = vec![
            Arc::new(StringArray::from_iter_values(
                self.rows.iter().map(|r| r.bucket.as_str()),
            )),
            Arc::new(UInt64Array::from_iter_values(
                self.rows.iter().map(|r| r.volume),
            )),
            Arc::new(Float64Array::from_iter_values(
                self.rows.iter().map(|r| r.event_rate),
            )),
            Arc::new(Float64Array::from_iter_values(
                self.rows.iter().map(|r| r.score_min),
            )),
            Arc::new(Float64Array::from_iter_values(
                self.rows.iter().map(|r| r.score_max),
            )),
        ];

        Ok(RecordBatch::try_new(Arc::new(self.schema()), columns)?)
    }
}

impl Display for QuantileTable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let entries: Vec<QuantileTableEntry> = self
            .rows
            .iter()
            .map(|row| QuantileTableEntry {
                bucket: row.bucket.clone(),
                volume: row.volume,
                event_rate: format!("{:.4}", row.event_rate),
                score_min: format!("{:.4}", row.score_min),
                score_max: format!("{:.4}", row.score_max),
            })
            .collect();

        let mut table = Table::new(entries);
        table.with(Style::sharp());
        table.modify(
            Rows::new(0..1),
            (
                Format::content(|s: &str| s.truecolor(245, 77, 85).bold().to_string()),
                Alignment::center(),
                Color::BOLD,
            ),
        );

        write!(f, "{table}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::AsArray;
    use arrow::datatypes::{Float64Type, UInt64Type};

    fn sample_table() -> QuantileTable {
        QuantileTable::new(
            "quantil_score",
            vec![
                QuantileTableRow {
                    bucket: "Q1".to_string(),
                    volume: 3,
                    event_rate: 1.0 / 3.0,
                    score_min: 0.1,
                    score_max: 0.3,
                },
                QuantileTableRow {
                    bucket: "Q2".to_string(),
                    volume: 2,
                    event_rate: 1.0,
                    score_min: 0.7,
                    score_max: 0.9,
                },
            ],
        )
    }

    #[test]
    fn test_record_batch_layout() {
        let batch = sample_table().to_record_batch().unwrap();

        assert_eq!(batch.num_rows(), 2);
        let names: Vec<String> = batch
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect();
        assert_eq!(
            names,
            vec!["quantil_score", "volume", "event_rate", "score_min", "score_max"]
        );

        let volume = batch.column(1).as_primitive::<UInt64Type>();
        assert_eq!(volume.value(0), 3);
        let rate = batch.column(2).as_primitive::<Float64Type>();
        assert_eq!(rate.value(1), 1.0);
    }

    #[test]
    fn test_monotonic_event_rate() {
        let table = sample_table();
        assert!(table.is_event_rate_monotonic());
        assert_eq!(table.row("Q2").unwrap().volume, 2);
        assert!(table.row("Q3").is_none());
    }

    #[test]
    fn test_display_contains_buckets() {
        let rendered = sample_table().to_string();
        assert!(rendered.contains("Q1"));
        assert!(rendered.contains("0.3333"));
    }
}
