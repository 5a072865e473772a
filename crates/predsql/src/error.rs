//! Error types for predsql

use thiserror::Error;

/// Result type alias for predsql operations
pub type BuildResult<T> = Result<T, BuildError>;

/// Errors raised while compiling a predicate tree or assembling a statement.
///
/// Every variant is a synchronous, non-retryable failure. The type is `Clone`
/// so a memoized build can hand the same failure back on every retrieval.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    /// The predicate tree is not a sequence, has even length, or breaks the
    /// group/connective alternation.
    #[error("Malformed WHERE: {0}")]
    Shape(String),

    /// A string element that is not one of `AND`, `and`, `OR`, `or`.
    #[error("Unknown connective found in WHERE: {0:?}")]
    Connective(String),

    /// BETWEEN / NOT BETWEEN given a scalar or an array whose length is not 2.
    #[error("{op} on '{column}' requires a 2 elements array")]
    OperatorArity { column: String, op: &'static str },

    /// NULL supplied to an operator that has no NULL semantics.
    #[error("Cannot check if '{column}' is {op} NULL")]
    NullComparison { column: String, op: &'static str },

    /// Table or option identifier contains characters outside `[A-Za-z0-9_]`.
    #[error("Invalid identifier '{name}': {what} can only contain a-z 0-9 _ characters")]
    Identifier { what: &'static str, name: String },

    /// INSERT without columns/rows, UPDATE without usable SET entries.
    #[error("No data found: {0}")]
    MissingData(String),

    /// INSERT rows that do not share the same column shape.
    #[error("Data array should have all objects in the same shape: {0}")]
    ShapeMismatch(String),

    /// A value that cannot be bound (e.g. a JSON boolean or object).
    #[error("Invalid value for '{column}': {reason}")]
    InvalidValue { column: String, reason: String },
}

impl BuildError {
    /// Create a shape error
    pub fn shape(message: impl Into<String>) -> Self {
        Self::Shape(message.into())
    }

    /// Create a missing-data error
    pub fn missing_data(message: impl Into<String>) -> Self {
        Self::MissingData(message.into())
    }

    /// Create a shape-mismatch error
    pub fn shape_mismatch(message: impl Into<String>) -> Self {
        Self::ShapeMismatch(message.into())
    }

    /// Create an invalid-value error
    pub fn invalid_value(column: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            column: column.into(),
            reason: reason.into(),
        }
    }

    /// Check if this error comes from the structure of the tree itself
    pub fn is_shape(&self) -> bool {
        matches!(self, Self::Shape(_) | Self::Connective(_))
    }

    /// Check if this is a NULL comparison error
    pub fn is_null_comparison(&self) -> bool {
        matches!(self, Self::NullComparison { .. })
    }
}
