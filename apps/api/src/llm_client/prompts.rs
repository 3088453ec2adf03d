// Shared prompt constants and prompt-building utilities.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// Persona shared by the generation prompt and the chat assistant.
pub const RECRUITER_PERSONA: &str = "You are an expert recruitment assistant.";

/// Persona for package generation.
pub const HR_STRATEGIST_PERSONA: &str = "You are an expert HR Strategist.";

/// Placeholder for company context fields the user left blank.
pub const NOT_SPECIFIED: &str = "Not specified";
