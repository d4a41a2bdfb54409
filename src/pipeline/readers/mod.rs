pub mod json_reader;
pub mod speech_table;

pub use json_reader::read_speech_records;
pub use speech_table::SpeechTableReader;
