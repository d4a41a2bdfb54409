use crate::data_model::SpeechDocument;
use crate::error::Result;

/// Trait for writing batches of speech rows to an output sink.
pub trait BaseWriter {
    /// Write a batch of documents to the sink.
    fn write_batch(&mut self, documents: &[SpeechDocument]) -> Result<()>;

    /// Finalize and close the output writer.
    fn close(self) -> Result<()>;
}
