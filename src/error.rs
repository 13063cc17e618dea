//! Error types for the school fee engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while pricing and reconciling fees.

use thiserror::Error;

/// The main error type for the fee engine.
///
/// Pure calculation paths only fail on caller mistakes (an unrecognised month
/// name, a session with no configured schedule). Malformed catalog entries are
/// reported through [`EngineError::MalformedLineItem`] but are skipped by the
/// schedule index rather than aborting a computation.
///
/// # Example
///
/// ```
/// use school_fee_engine::error::EngineError;
///
/// let error = EngineError::UnknownMonth {
///     name: "Smarch".to_string(),
/// };
/// assert_eq!(error.to_string(), "Unknown month: Smarch");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No fee schedule is configured for the requested session.
    #[error("Fee schedule not found for session: {session}")]
    SessionNotFound {
        /// The session identifier (e.g. "2024-25").
        session: String,
    },

    /// A month name outside the twelve academic months was supplied.
    #[error("Unknown month: {name}")]
    UnknownMonth {
        /// The unrecognised month name.
        name: String,
    },

    /// A fee line item was missing its fee kind or carried a negative amount.
    #[error("Malformed fee line item #{index}: {message}")]
    MalformedLineItem {
        /// Position of the item in the catalog it came from.
        index: usize,
        /// A description of what made the item malformed.
        message: String,
    },

    /// A caller-supplied selection cannot be priced (e.g. no months selected).
    #[error("Invalid selection: {message}")]
    InvalidSelection {
        /// A description of what was wrong with the selection.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
