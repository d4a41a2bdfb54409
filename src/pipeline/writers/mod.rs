pub mod base_writer;
pub mod speech_table;
pub mod tables;

pub use base_writer::BaseWriter;
pub use speech_table::SpeechTableWriter;
