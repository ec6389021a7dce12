mod client;
mod error;
pub mod prompts;
pub mod response;
pub mod schema;

pub use client::{CompletionBackend, CompletionRequest, GeminiClient, Part};
pub use error::AnalysisError;
