use std::fs::File;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Builder, RecordBatch, StringBuilder};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use parquet::arrow::arrow_writer::ArrowWriter;
use parquet::file::properties::WriterProperties;

use crate::data_model::SpeechDocument;
use crate::error::Result;
use crate::pipeline::writers::BaseWriter;

fn create_schema(with_score: bool) -> SchemaRef {
    let mut fields = vec![
        Field::new("president", DataType::Utf8, false),
        Field::new("date", DataType::Utf8, false),
        Field::new("doc_name", DataType::Utf8, false),
        Field::new("title", DataType::Utf8, false),
        Field::new("processed_text", DataType::Utf8, false),
    ];
    if with_score {
        fields.push(Field::new("sentiment_score", DataType::Float64, true));
    }
    Arc::new(Schema::new(fields))
}

/// Writes speech rows to a Parquet table. `with_score` controls whether the
/// `sentiment_score` column is part of the schema (the preprocessing stage
/// writes without it, the scoring stage with it).
pub struct SpeechTableWriter {
    schema: SchemaRef,
    with_score: bool,
    writer: Option<ArrowWriter<File>>,
}

impl SpeechTableWriter {
    pub fn new(path: &str, with_score: bool) -> Result<Self> {
        let schema = create_schema(with_score);
        let file = File::create(path)?;
        let props = WriterProperties::builder().build();
        let writer = ArrowWriter::try_new(file, schema.clone(), Some(props))?;

        Ok(SpeechTableWriter {
            schema,
            with_score,
            writer: Some(writer),
        })
    }
}

impl BaseWriter for SpeechTableWriter {
    fn write_batch(&mut self, documents: &[SpeechDocument]) -> Result<()> {
        if documents.is_empty() {
            return Ok(());
        }

        let mut president_builder = StringBuilder::new();
        let mut date_builder = StringBuilder::new();
        let mut doc_name_builder = StringBuilder::new();
        let mut title_builder = StringBuilder::new();
        let mut text_builder = StringBuilder::new();
        let mut score_builder = Float64Builder::new();

        for doc in documents {
            president_builder.append_value(&doc.president);
            date_builder.append_value(&doc.date);
            doc_name_builder.append_value(&doc.doc_name);
            title_builder.append_value(&doc.title);
            text_builder.append_value(&doc.processed_text);
            score_builder.append_option(doc.sentiment_score);
        }

        let mut columns: Vec<ArrayRef> = vec![
            Arc::new(president_builder.finish()),
            Arc::new(date_builder.finish()),
            Arc::new(doc_name_builder.finish()),
            Arc::new(title_builder.finish()),
            Arc::new(text_builder.finish()),
        ];
        if self.with_score {
            columns.push(Arc::new(score_builder.finish()));
        }

        let batch = RecordBatch::try_new(self.schema.clone(), columns)?;

        if let Some(writer) = self.writer.as_mut() {
            writer.write(&batch)?;
        }

        Ok(())
    }

    fn close(mut self) -> Result<()> {
        if let Some(writer) = self.writer.take() {
            writer.close()?;
        }
        Ok(())
    }
}
