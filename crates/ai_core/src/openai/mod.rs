//! OpenAI-compatible inference engine
//!
//! Works with the hosted OpenAI API and any server exposing the same
//! `/chat/completions` endpoint.

mod client;

pub use client::OpenAiInferenceEngine;
