//! Error types for puppeteer operations.

use puppeteer_core::CoreError;
use thiserror::Error;

/// Errors that can occur while configuring or stepping a puppeteer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PuppeteerError {
    /// The timestep does not satisfy the observation contract.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A type-erased puppeteer was handed another puppeteer's state.
    #[error("State mismatch: expected {expected} state, got {got}")]
    StateMismatch {
        expected: &'static str,
        got: &'static str,
    },

    /// A puppeteer configuration could not be parsed.
    #[error("Invalid puppeteer config: {message}")]
    Config { message: String },
}
