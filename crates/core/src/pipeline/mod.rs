pub mod anonymize_config;
pub mod anonymize_stream_use_case;
pub mod frame_anonymizer;
pub mod pipeline_logger;
