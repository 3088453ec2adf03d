// Recruitment package generation, header banner and assistant chat.
// All LLM calls go through llm_client; nothing here talks to Gemini directly.

pub mod banner;
pub mod chat;
pub mod generator;
pub mod handlers;
pub mod package;
pub mod prompts;
