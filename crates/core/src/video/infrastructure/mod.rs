pub mod image_sequence_sink;
pub mod image_sequence_source;
