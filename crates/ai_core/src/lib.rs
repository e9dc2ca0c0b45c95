//! AI Core - Language model inference
//!
//! Talks to any server exposing the OpenAI chat completions API and turns
//! transport failures into typed [`InferenceError`]s.

pub mod config;
pub mod error;
pub mod openai;
pub mod ports;

pub use config::InferenceConfig;
pub use error::InferenceError;
pub use openai::OpenAiInferenceEngine;
pub use ports::{InferenceEngine, InferenceMessage, InferenceRequest, InferenceResponse, TokenUsage};
