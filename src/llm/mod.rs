//! LLM module for callbrief
//!
//! Generative text clients and the call-analysis prompt.

mod client;
mod gemini;
mod prompts;

pub use client::{build_generator, TextGenerator};
pub use gemini::{GeminiClient, DEFAULT_GEMINI_ENDPOINT, DEFAULT_GEMINI_MODEL};
pub use prompts::{build_call_prompt, DISCUSSIONS_MARKER, SUMMARY_MARKER};
