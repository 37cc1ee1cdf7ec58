//! Error types for the print pricing engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading the catalog or
//! pricing a product configuration.

use thiserror::Error;

/// The main error type for the pricing engine.
///
/// Every error is local to a single calculation or configuration load; the
/// engine never returns a partial breakdown alongside an error.
///
/// # Example
///
/// ```
/// use print_pricing::error::EngineError;
///
/// let error = EngineError::MissingAddOnParameter {
///     add_on: "hole_drilling".to_string(),
///     field: "number_of_holes".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Add-on 'hole_drilling' is missing required parameter 'number_of_holes'"
/// );
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

    /// A catalog record referenced by id does not exist.
    #[error("{kind} not found: {id}")]
    CatalogEntryNotFound {
        /// The kind of record (e.g. "Paper stock").
        kind: String,
        /// The id that was looked up.
        id: String,
    },

    /// The product configuration is invalid and cannot be priced.
    #[error("Invalid configuration field '{field}': {message}")]
    InvalidConfiguration {
        /// The offending field.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A selected add-on lacks a parameter its formula requires.
    #[error("Add-on '{add_on}' is missing required parameter '{field}'")]
    MissingAddOnParameter {
        /// The add-on key (e.g. "perforation").
        add_on: String,
        /// The missing parameter name.
        field: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

impl EngineError {
    /// Shorthand for an [`EngineError::InvalidConfiguration`].
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::InvalidConfiguration {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Shorthand for an [`EngineError::CalculationError`] raised when an
    /// intermediate amount no longer fits in a `Decimal`.
    pub fn overflow(amount: impl Into<String>) -> Self {
        EngineError::CalculationError {
            message: format!("{} is too large to represent", amount.into()),
        }
    }

    /// Returns true for errors caused by the caller's configuration rather
    /// than by the catalog or the engine itself.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            EngineError::InvalidConfiguration { .. } | EngineError::MissingAddOnParameter { .. }
        )
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
