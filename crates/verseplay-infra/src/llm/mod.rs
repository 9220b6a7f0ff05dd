//! Chat-completion generator backends.

pub mod openai_compat;

pub use openai_compat::ChatCompletionGenerator;
