//! One-shot writers for the aggregate tables the analysis stages emit.

use std::fs::File;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Builder, RecordBatch, StringBuilder};
use arrow::datatypes::{DataType, Field, Schema};
use parquet::arrow::arrow_writer::ArrowWriter;
use parquet::file::properties::WriterProperties;

use crate::error::{PipelineError, Result};
use crate::rhetoric::RhetoricalMetrics;

/// Writes the per-president mean topic weights: one row per president, one
/// `Topic i` column per topic.
pub fn write_topic_distribution(
    path: &str,
    rows: &[(String, Vec<f64>)],
    num_topics: usize,
) -> Result<()> {
    let mut fields = vec![Field::new("president", DataType::Utf8, false)];
    for topic in 0..num_topics {
        fields.push(Field::new(format!("Topic {}", topic), DataType::Float64, false));
    }
    let schema = Arc::new(Schema::new(fields));

    let mut president_builder = StringBuilder::new();
    let mut topic_builders: Vec<Float64Builder> =
        (0..num_topics).map(|_| Float64Builder::new()).collect();

    for (president, weights) in rows {
        if weights.len() != num_topics {
            return Err(PipelineError::Unexpected(format!(
                "Topic vector for '{}' has {} entries, expected {}",
                president,
                weights.len(),
                num_topics
            )));
        }
        president_builder.append_value(president);
        for (builder, weight) in topic_builders.iter_mut().zip(weights) {
            builder.append_value(*weight);
        }
    }

    let mut columns: Vec<ArrayRef> = vec![Arc::new(president_builder.finish())];
    for mut builder in topic_builders {
        columns.push(Arc::new(builder.finish()));
    }

    let batch = RecordBatch::try_new(schema.clone(), columns)?;
    let file = File::create(path)?;
    let props = WriterProperties::builder().build();
    let mut writer = ArrowWriter::try_new(file, schema, Some(props))?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

/// Writes the rhetorical-analysis table: one row per president with the
/// diversity/readability scalars and the formatted n-gram strings.
pub fn write_rhetoric_table(path: &str, rows: &[(String, RhetoricalMetrics)]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("president", DataType::Utf8, false),
        Field::new("Lexical_Diversity", DataType::Float64, false),
        Field::new("Readability_Score", DataType::Float64, false),
        Field::new("Top_5_Bigrams", DataType::Utf8, false),
        Field::new("Top_5_Trigrams", DataType::Utf8, false),
    ]));

    let mut president_builder = StringBuilder::new();
    let mut diversity_builder = Float64Builder::new();
    let mut readability_builder = Float64Builder::new();
    let mut bigram_builder = StringBuilder::new();
    let mut trigram_builder = StringBuilder::new();

    for (president, metrics) in rows {
        president_builder.append_value(president);
        diversity_builder.append_value(metrics.lexical_diversity);
        readability_builder.append_value(metrics.readability_score);
        bigram_builder.append_value(metrics.format_bigrams());
        trigram_builder.append_value(metrics.format_trigrams());
    }

    let columns: Vec<ArrayRef> = vec![
        Arc::new(president_builder.finish()),
        Arc::new(diversity_builder.finish()),
        Arc::new(readability_builder.finish()),
        Arc::new(bigram_builder.finish()),
        Arc::new(trigram_builder.finish()),
    ];

    let batch = RecordBatch::try_new(schema.clone(), columns)?;
    let file = File::create(path)?;
    let props = WriterProperties::builder().build();
    let mut writer = ArrowWriter::try_new(file, schema, Some(props))?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}
