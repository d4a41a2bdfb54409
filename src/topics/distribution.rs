//! Per-document topic vectors and their aggregation by speaker.

use crate::error::{PipelineError, Result};
use crate::topics::lda::LdaModel;
use std::collections::BTreeMap;

/// Dense topic vector per document, in corpus order. Row `i` belongs to the
/// `i`-th document of the corpus the model was fit on, so vectors can be
/// joined back to the speech table by position.
pub fn document_topic_matrix(model: &LdaModel) -> Vec<Vec<f64>> {
    model.doc_topics()
}

/// Arithmetic mean topic vector per group. Each document must come with a
/// vector of exactly `num_topics` entries; a groups/matrix length mismatch
/// is rejected here rather than silently zip-truncated. Output rows are
/// sorted by group key.
pub fn mean_topic_by_group(
    groups: &[String],
    matrix: &[Vec<f64>],
    num_topics: usize,
) -> Result<Vec<(String, Vec<f64>)>> {
    if groups.len() != matrix.len() {
        return Err(PipelineError::Unexpected(format!(
            "{} group labels but {} topic vectors",
            groups.len(),
            matrix.len()
        )));
    }

    let mut sums: BTreeMap<&str, (Vec<f64>, usize)> = BTreeMap::new();
    for (group, vector) in groups.iter().zip(matrix) {
        if vector.len() != num_topics {
            return Err(PipelineError::Unexpected(format!(
                "topic vector for group '{}' has {} entries, expected {}",
                group,
                vector.len(),
                num_topics
            )));
        }
        let entry = sums
            .entry(group.as_str())
            .or_insert_with(|| (vec![0.0; num_topics], 0));
        for (sum, value) in entry.0.iter_mut().zip(vector) {
            *sum += value;
        }
        entry.1 += 1;
    }

    Ok(sums
        .into_iter()
        .map(|(group, (sum, count))| {
            let mean = sum.into_iter().map(|s| s / count as f64).collect();
            (group.to_string(), mean)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singleton_group_mean_is_identity() {
        let groups = vec!["President B".to_string()];
        let matrix = vec![vec![0.25, 0.75]];
        let rows = mean_topic_by_group(&groups, &matrix, 2).unwrap();
        assert_eq!(rows, vec![("President B".to_string(), vec![0.25, 0.75])]);
    }

    #[test]
    fn test_three_speech_mean() {
        let groups = vec![
            "President A".to_string(),
            "President A".to_string(),
            "President A".to_string(),
        ];
        let matrix = vec![vec![0.8, 0.2], vec![0.6, 0.4], vec![0.4, 0.6]];
        let rows = mean_topic_by_group(&groups, &matrix, 2).unwrap();
        assert_eq!(rows.len(), 1);
        let (group, mean) = &rows[0];
        assert_eq!(group, "President A");
        assert!((mean[0] - 0.6).abs() < 1e-12);
        assert!((mean[1] - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_groups_sorted_by_name() {
        let groups = vec![
            "Zachary Taylor".to_string(),
            "Abraham Lincoln".to_string(),
            "Zachary Taylor".to_string(),
        ];
        let matrix = vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![0.0, 1.0]];
        let rows = mean_topic_by_group(&groups, &matrix, 2).unwrap();
        assert_eq!(rows[0].0, "Abraham Lincoln");
        assert_eq!(rows[1].0, "Zachary Taylor");
        assert_eq!(rows[1].1, vec![0.5, 0.5]);
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let groups = vec!["A".to_string(), "B".to_string()];
        let matrix = vec![vec![1.0, 0.0]];
        assert!(mean_topic_by_group(&groups, &matrix, 2).is_err());
    }

    #[test]
    fn test_vector_arity_mismatch_rejected() {
        let groups = vec!["A".to_string()];
        let matrix = vec![vec![1.0, 0.0, 0.0]];
        assert!(mean_topic_by_group(&groups, &matrix, 2).is_err());
    }
}
