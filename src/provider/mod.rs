//! LLM provider abstraction for querent.
//!
//! Wraps rig-core's provider clients behind a [`Provider`] struct with enum
//! dispatch. Supports Anthropic, OpenAI, OpenRouter, Ollama (local), Gemini
//! and DeepSeek.

mod client;
mod kind;
mod resolve;

pub use client::Provider;
pub use resolve::resolve_model;
