//! Model registry for the Groq completion endpoint.
//!
//! Each model carries a maximum output token ceiling; unknown models
//! fall back to a conservative default.

/// Fallback token ceiling for models not in the table.
pub const DEFAULT_MAX_TOKENS: usize = 4096;

/// Default model used when the shell does not pick one.
pub const DEFAULT_MODEL: &str = "llama3-70b-8192";

/// Known model identifiers with their output token ceilings.
const MODEL_MAX_TOKENS: [(&str, usize); 5] = [
    ("mixtral-8x7b-32768", 32768),
    ("llama3-70b-8192", 8192),
    ("llama3-8b-8192", 8192),
    ("llama2-70b-4096", 4096),
    ("gemma-7b-it", 8192),
];

/// Maximum output tokens for a model, defaulting for unknown identifiers.
pub fn max_tokens_for(model: &str) -> usize {
    MODEL_MAX_TOKENS
        .iter()
        .find(|(name, _)| *name == model)
        .map(|(_, max)| *max)
        .unwrap_or(DEFAULT_MAX_TOKENS)
}

/// The identifiers of all known models, in table order.
pub fn known_models() -> impl Iterator<Item = &'static str> {
    MODEL_MAX_TOKENS.iter().map(|(name, _)| *name)
}
