use crate::data_model::SpeechDocument;
use crate::error::{PipelineError, Result};

use arrow::array::{Array, Float64Array, StringArray};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatchReader;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use std::fs::File;
use std::path::Path;

const STRING_COLUMNS: &[&str] = &["president", "date", "doc_name", "title", "processed_text"];
const SCORE_COLUMN: &str = "sentiment_score";

/// Reads a speech table written by an earlier stage. The five string columns
/// are required; `sentiment_score` is picked up when present.
#[derive(Debug)]
pub struct SpeechTableReader {
    path: String,
}

impl SpeechTableReader {
    pub fn new(path: impl Into<String>) -> Self {
        SpeechTableReader { path: path.into() }
    }

    pub fn read_documents(&self) -> Result<Vec<SpeechDocument>> {
        if !Path::new(&self.path).exists() {
            return Err(PipelineError::InputMissing {
                path: self.path.clone(),
            });
        }

        let file = File::open(&self.path)?;
        let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;
        let schema = reader.schema();

        let mut string_indices = Vec::with_capacity(STRING_COLUMNS.len());
        for column in STRING_COLUMNS {
            let idx = schema.index_of(column).map_err(|_| {
                PipelineError::ConfigError(format!(
                    "Column '{}' not found in speech table '{}'",
                    column, self.path
                ))
            })?;
            match schema.field(idx).data_type() {
                DataType::Utf8 | DataType::LargeUtf8 => {}
                other => {
                    return Err(PipelineError::ConfigError(format!(
                        "Expected column '{}' to be Utf8, but found {:?}",
                        column, other
                    )));
                }
            }
            string_indices.push(idx);
        }

        let score_idx = match schema.index_of(SCORE_COLUMN) {
            Ok(idx) => match schema.field(idx).data_type() {
                DataType::Float64 => Some(idx),
                other => {
                    return Err(PipelineError::ConfigError(format!(
                        "Expected column '{}' to be Float64, but found {:?}",
                        SCORE_COLUMN, other
                    )));
                }
            },
            Err(_) => None,
        };

        let mut documents = Vec::new();
        for batch_result in reader {
            let batch = batch_result?;

            let mut string_arrays = Vec::with_capacity(string_indices.len());
            for (column, &idx) in STRING_COLUMNS.iter().zip(&string_indices) {
                let array = batch
                    .column(idx)
                    .as_any()
                    .downcast_ref::<StringArray>()
                    .ok_or_else(|| {
                        PipelineError::Unexpected(format!(
                            "Column '{}' is not a valid Utf8 StringArray",
                            column
                        ))
                    })?;
                string_arrays.push(array);
            }

            let score_array = match score_idx {
                Some(idx) => Some(
                    batch
                        .column(idx)
                        .as_any()
                        .downcast_ref::<Float64Array>()
                        .ok_or_else(|| {
                            PipelineError::Unexpected(format!(
                                "Column '{}' is not a valid Float64Array",
                                SCORE_COLUMN
                            ))
                        })?,
                ),
                None => None,
            };

            let string_at = |arr: &StringArray, row: usize| {
                if arr.is_null(row) {
                    String::new()
                } else {
                    arr.value(row).to_string()
                }
            };

            for row in 0..batch.num_rows() {
                let sentiment_score = score_array.and_then(|arr| {
                    if arr.is_null(row) {
                        None
                    } else {
                        Some(arr.value(row))
                    }
                });
                documents.push(SpeechDocument {
                    president: string_at(string_arrays[0], row),
                    date: string_at(string_arrays[1], row),
                    doc_name: string_at(string_arrays[2], row),
                    title: string_at(string_arrays[3], row),
                    transcript: String::new(),
                    processed_text: string_at(string_arrays[4], row),
                    sentiment_score,
                });
            }
        }

        Ok(documents)
    }
}
