//! # Error Types
//!
//! Domain-specific error types for mozo-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  mozo-core errors (this file)                                          │
//! │  ├── CoreError        - Umbrella for the fallible helpers              │
//! │  ├── ExpressionError  - Why an amount expression did not evaluate      │
//! │  └── ValidationError  - Raw form values that are not usable numbers    │
//! │                                                                         │
//! │  mozo-cli errors (separate crate)                                      │
//! │  └── CliError         - Settings and output failures                   │
//! │                                                                         │
//! │  Flow: try_evaluate / validate → Err(..) → folded into 0 / unset       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Nothing Here Is Fatal
//! The public calculator operations (`evaluate`, `clamp`, `compute`) never
//! return these errors. They exist so a presentation layer can explain *why*
//! an input degraded to "no amount" when it wants to.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Umbrella error for the fallible helpers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// The amount expression could not be evaluated.
    #[error("Invalid amount expression: {0}")]
    Expression(#[from] ExpressionError),

    /// A raw form value is not usable.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Expression Error
// =============================================================================

/// Reasons an amount expression fails to evaluate.
///
/// Positions are character offsets into the input as given, leading
/// whitespace included.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExpressionError {
    /// Input is empty or only whitespace.
    #[error("expression is empty")]
    Empty,

    /// Input exceeds the length cap.
    #[error("expression is {len} characters long, maximum is {max}")]
    TooLong { len: usize, max: usize },

    /// A character outside the arithmetic alphabet.
    #[error("unexpected character '{ch}' at position {position}")]
    UnexpectedChar { ch: char, position: usize },

    /// A literal like `1.2.3` or a lone `.`.
    #[error("malformed number '{literal}' at position {position}")]
    MalformedNumber { literal: String, position: usize },

    /// Input ended where an operand was expected.
    #[error("unexpected end of expression")]
    UnexpectedEnd,

    /// A token that cannot appear at this point, e.g. `*` after `+`.
    #[error("unexpected '{token}' at position {position}")]
    UnexpectedToken { token: String, position: usize },

    /// An opening parenthesis was never closed.
    #[error("unclosed parenthesis opened at position {position}")]
    UnclosedParen { position: usize },

    /// Division by zero or overflow produced NaN or infinity.
    #[error("expression does not evaluate to a finite number")]
    NotFinite,
}

// =============================================================================
// Validation Error
// =============================================================================

/// Raw input validation errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Value does not parse as a finite number.
    #[error("{field} is not a number")]
    NotNumeric { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: f64, max: f64 },

    /// Value must be zero or more.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
