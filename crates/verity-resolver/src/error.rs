//! Error types for claim resolution and the reveal

use thiserror::Error;

/// Terminal failures of the resolution flow
///
/// Transient transport failures on poll attempts never appear here; they are
/// absorbed by the poller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    /// The attempt budget ran out before a verdict arrived
    #[error("No verdict for '{slug}' after {attempts} attempts")]
    Timeout {
        /// Claim being resolved
        slug: String,
        /// Poll attempts made
        attempts: u32,
    },

    /// The backend has no such claim
    #[error("Claim '{slug}' not found")]
    NotFound {
        /// Claim being resolved
        slug: String,
    },

    /// The initial fetch failed at the transport level
    #[error("Could not reach the claim service for '{slug}': {message}")]
    Transport {
        /// Claim being resolved
        slug: String,
        /// Underlying error text
        message: String,
    },

    /// The caller cancelled resolution
    #[error("Resolution cancelled")]
    Cancelled,

    /// Invalid resolver configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ResolutionError {
    /// Message to show the person waiting on the result
    pub fn user_message(&self) -> String {
        match self {
            ResolutionError::Timeout { .. } => {
                "Fact-checking took too long. Check back later or submit a new claim.".to_string()
            }
            ResolutionError::NotFound { .. } => {
                "Claim not found. Check the link or submit a new claim.".to_string()
            }
            ResolutionError::Transport { message, .. } => format!(
                "Couldn't reach the fact-check service ({}). Try again or submit a new claim.",
                message
            ),
            ResolutionError::Cancelled => "Cancelled.".to_string(),
            ResolutionError::Config(message) => format!("Misconfigured resolver: {}", message),
        }
    }
}

/// Misuse of a reveal sequencer
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealError {
    /// The claim has no verdict yet
    #[error("Cannot reveal a claim that has no verdict")]
    Unresolved,

    /// `begin` was already called on this sequencer
    #[error("Reveal already started")]
    AlreadyStarted,
}
