// Analysis parameters shared by the stage binaries, read from an optional
// YAML file. Every field has a default so stages run without a config file.

use crate::error::{PipelineError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

fn default_min_token_len() -> usize {
    3
}

/// Parameters for the text normalizer.
#[derive(Deserialize, Debug, Clone)]
pub struct NormalizeConfig {
    /// Tokens shorter than this many characters are dropped before stemming.
    #[serde(default = "default_min_token_len")]
    pub min_token_len: usize,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        NormalizeConfig {
            min_token_len: default_min_token_len(),
        }
    }
}

impl NormalizeConfig {
    pub fn validate(&self) -> Result<()> {
        if self.min_token_len == 0 {
            return Err(PipelineError::ConfigValidationError(
                "NormalizeConfig: min_token_len must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_positive_threshold() -> f64 {
    0.1
}

fn default_negative_threshold() -> f64 {
    -0.1
}

fn default_keyword_count() -> usize {
    20
}

/// Parameters for the sentiment split used by the keyword charts.
#[derive(Deserialize, Debug, Clone)]
pub struct SentimentConfig {
    /// Speeches scoring above this are treated as positive.
    #[serde(default = "default_positive_threshold")]
    pub positive_threshold: f64,
    /// Speeches scoring below this are treated as negative.
    #[serde(default = "default_negative_threshold")]
    pub negative_threshold: f64,
    /// How many top keywords each chart shows.
    #[serde(default = "default_keyword_count")]
    pub keyword_count: usize,
}

impl Default for SentimentConfig {
    fn default() -> Self {
        SentimentConfig {
            positive_threshold: default_positive_threshold(),
            negative_threshold: default_negative_threshold(),
            keyword_count: default_keyword_count(),
        }
    }
}

impl SentimentConfig {
    pub fn validate(&self) -> Result<()> {
        if self.negative_threshold >= self.positive_threshold {
            return Err(PipelineError::ConfigValidationError(format!(
                "SentimentConfig: negative_threshold ({}) must be below positive_threshold ({})",
                self.negative_threshold, self.positive_threshold
            )));
        }
        if self.keyword_count == 0 {
            return Err(PipelineError::ConfigValidationError(
                "SentimentConfig: keyword_count must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_start() -> usize {
    2
}

fn default_limit() -> usize {
    15
}

fn default_step() -> usize {
    1
}

fn default_passes() -> usize {
    10
}

fn default_seed() -> u64 {
    42
}

fn default_alpha() -> f64 {
    0.1
}

fn default_beta() -> f64 {
    0.01
}

fn default_top_words() -> usize {
    10
}

/// Parameters for the coherence-driven topic-count search.
#[derive(Deserialize, Debug, Clone)]
pub struct TopicsConfig {
    /// First topic count to try (inclusive).
    #[serde(default = "default_start")]
    pub start: usize,
    /// Topic count to stop at (exclusive).
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default = "default_step")]
    pub step: usize,
    /// Gibbs sampling passes per candidate model.
    #[serde(default = "default_passes")]
    pub passes: usize,
    /// Seed for the sampler; fixed so repeated runs select the same model.
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Document-topic Dirichlet prior.
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    /// Topic-word Dirichlet prior.
    #[serde(default = "default_beta")]
    pub beta: f64,
    /// Top terms per topic used for coherence scoring and the report.
    #[serde(default = "default_top_words")]
    pub top_words: usize,
}

impl Default for TopicsConfig {
    fn default() -> Self {
        TopicsConfig {
            start: default_start(),
            limit: default_limit(),
            step: default_step(),
            passes: default_passes(),
            seed: default_seed(),
            alpha: default_alpha(),
            beta: default_beta(),
            top_words: default_top_words(),
        }
    }
}

impl TopicsConfig {
    pub fn validate(&self) -> Result<()> {
        if self.start < 2 {
            return Err(PipelineError::ConfigValidationError(format!(
                "TopicsConfig: start must be at least 2, got {}",
                self.start
            )));
        }
        if self.limit <= self.start {
            return Err(PipelineError::ConfigValidationError(format!(
                "TopicsConfig: limit ({}) must be greater than start ({})",
                self.limit, self.start
            )));
        }
        if self.step == 0 {
            return Err(PipelineError::ConfigValidationError(
                "TopicsConfig: step must be greater than 0".to_string(),
            ));
        }
        if self.passes == 0 {
            return Err(PipelineError::ConfigValidationError(
                "TopicsConfig: passes must be greater than 0".to_string(),
            ));
        }
        if self.alpha <= 0.0 || self.beta <= 0.0 {
            return Err(PipelineError::ConfigValidationError(format!(
                "TopicsConfig: alpha ({}) and beta ({}) must be positive",
                self.alpha, self.beta
            )));
        }
        if self.top_words == 0 {
            return Err(PipelineError::ConfigValidationError(
                "TopicsConfig: top_words must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// The overall analysis configuration read from YAML.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub normalize: NormalizeConfig,
    #[serde(default)]
    pub sentiment: SentimentConfig,
    #[serde(default)]
    pub topics: TopicsConfig,
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<()> {
        self.normalize.validate()?;
        self.sentiment.validate()?;
        self.topics.validate()?;
        Ok(())
    }
}

/// Loads and parses the analysis configuration YAML file. A `None` path
/// yields the built-in defaults.
pub fn load_config<P: AsRef<Path>>(config_path: Option<P>) -> Result<AnalysisConfig> {
    let config = match config_path {
        Some(path) => {
            let path_ref = path.as_ref();
            let content = fs::read_to_string(path_ref).map_err(|e| {
                PipelineError::ConfigError(format!(
                    "Failed to read config file '{}': {}",
                    path_ref.display(),
                    e
                ))
            })?;
            serde_yaml::from_str::<AnalysisConfig>(&content).map_err(|e| {
                PipelineError::ConfigError(format!(
                    "Failed to parse config YAML from '{}': {}",
                    path_ref.display(),
                    e
                ))
            })?
        }
        None => AnalysisConfig::default(),
    };

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config_file(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
        writeln!(temp_file, "{}", content).expect("Failed to write to temp file");
        temp_file
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = AnalysisConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.topics.start, 2);
        assert_eq!(config.topics.limit, 15);
        assert_eq!(config.topics.seed, 42);
        assert_eq!(config.normalize.min_token_len, 3);
    }

    #[test]
    fn test_load_no_path_gives_defaults() {
        let config = load_config::<&str>(None).unwrap();
        assert_eq!(config.topics.passes, 10);
    }

    #[test]
    fn test_load_valid_config() {
        let yaml_content = r#"
topics:
  start: 3
  limit: 8
  seed: 7
sentiment:
  positive_threshold: 0.2
  negative_threshold: -0.2
        "#;
        let temp_file = create_temp_config_file(yaml_content);
        let config = load_config(Some(temp_file.path())).unwrap();
        assert_eq!(config.topics.start, 3);
        assert_eq!(config.topics.limit, 8);
        assert_eq!(config.topics.seed, 7);
        // Unspecified sections keep their defaults.
        assert_eq!(config.topics.passes, 10);
        assert_eq!(config.normalize.min_token_len, 3);
        assert_eq!(config.sentiment.positive_threshold, 0.2);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config(Some("non_existent_config.yaml"));
        match result.err().unwrap() {
            PipelineError::ConfigError(msg) => {
                assert!(msg.contains("Failed to read config file"));
                assert!(msg.contains("non_existent_config.yaml"));
            }
            other => panic!("Expected ConfigError, got {:?}", other),
        }
    }

    #[test]
    fn test_load_invalid_yaml_syntax() {
        let yaml_content = r#"
topics:
  start: 3
  limit [8]
        "#;
        let temp_file = create_temp_config_file(yaml_content);
        let result = load_config(Some(temp_file.path()));
        match result.err().unwrap() {
            PipelineError::ConfigError(msg) => {
                assert!(msg.contains("Failed to parse config YAML"));
            }
            other => panic!("Expected ConfigError, got {:?}", other),
        }
    }

    #[test]
    fn test_topic_range_must_be_nonempty() {
        let yaml_content = r#"
topics:
  start: 10
  limit: 10
        "#;
        let temp_file = create_temp_config_file(yaml_content);
        let result = load_config(Some(temp_file.path()));
        match result.err().unwrap() {
            PipelineError::ConfigValidationError(msg) => {
                assert!(msg.contains("limit"));
            }
            other => panic!("Expected ConfigValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_step_rejected() {
        let yaml_content = r#"
topics:
  step: 0
        "#;
        let temp_file = create_temp_config_file(yaml_content);
        let result = load_config(Some(temp_file.path()));
        match result.err().unwrap() {
            PipelineError::ConfigValidationError(msg) => {
                assert!(msg.contains("step"));
            }
            other => panic!("Expected ConfigValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_inverted_sentiment_thresholds_rejected() {
        let yaml_content = r#"
sentiment:
  positive_threshold: -0.5
  negative_threshold: 0.5
        "#;
        let temp_file = create_temp_config_file(yaml_content);
        let result = load_config(Some(temp_file.path()));
        match result.err().unwrap() {
            PipelineError::ConfigValidationError(msg) => {
                assert!(msg.contains("negative_threshold"));
            }
            other => panic!("Expected ConfigValidationError, got {:?}", other),
        }
    }
}
