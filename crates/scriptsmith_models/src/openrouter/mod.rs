//! OpenRouter chat completions backend.

mod client;
mod dto;

pub use client::OpenRouterClient;
pub use dto::{
    ChatChoice, ChatMessage, ChatRequest, ChatRequestBuilder, ChatResponse, ChatUsage,
};
