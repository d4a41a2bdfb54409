use crate::data_model::SpeechDocument;
use crate::error::{PipelineError, Result};
use async_trait::async_trait;
use futures::future::join_all;
use tracing::{debug, warn};

/// A single transformation applied to every document in a stage.
#[async_trait]
pub trait ProcessingStep: Send + Sync {
    fn name(&self) -> &'static str;

    async fn process(&self, document: SpeechDocument) -> Result<SpeechDocument>;
}

pub struct PipelineExecutor {
    pub steps: Vec<Box<dyn ProcessingStep>>,
}

impl PipelineExecutor {
    pub fn new(steps: Vec<Box<dyn ProcessingStep>>) -> Self {
        if steps.is_empty() {
            warn!("Pipeline created with no steps.");
        }
        PipelineExecutor { steps }
    }

    pub async fn run_single_async(&self, initial_document: SpeechDocument) -> Result<SpeechDocument> {
        let mut current_doc = initial_document;
        for step in &self.steps {
            debug!("Running step: {}", step.name());
            current_doc = step
                .process(current_doc)
                .await
                .map_err(|e| PipelineError::StepError {
                    step_name: step.name().to_string(),
                    source: Box::new(e),
                })?;
        }
        Ok(current_doc)
    }

    /// Runs a batch of documents concurrently. Result order matches input
    /// order; later stages join tables by row position.
    pub async fn run_batch_async(&self, documents: Vec<SpeechDocument>) -> Vec<Result<SpeechDocument>> {
        join_all(
            documents
                .into_iter()
                .map(|doc| self.run_single_async(doc)),
        )
        .await
    }
}
