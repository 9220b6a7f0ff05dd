//! Speech-recognition backends.

pub mod http_transcriber;

pub use http_transcriber::HttpTranscriber;
