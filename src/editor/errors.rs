use thiserror::Error;

/// Errors surfaced by the block editing engine.
///
/// All operations are one-shot, deterministic transformations: every error
/// is returned to the caller as-is, nothing is retried, and no partial
/// output is ever produced.
#[derive(Error, Debug)]
pub enum EditError {
    #[error("failed to parse input: {message}")]
    Parse { message: String },

    #[error("invalid address '{input}': {message}")]
    MalformedAddress { input: String, message: String },

    #[error("no block matched address: {address}")]
    NoMatchFound { address: String },

    #[error("mutated document failed to serialize: {message}")]
    Serialize { message: String },
}
