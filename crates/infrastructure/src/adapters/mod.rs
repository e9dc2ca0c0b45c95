//! Adapters implementing application ports

mod amadeus_adapter;
mod openai_inference_adapter;

pub use amadeus_adapter::AmadeusAdapter;
pub use openai_inference_adapter::OpenAiInferenceAdapter;
