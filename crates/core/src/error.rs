//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// unknown codes, arithmetic overflow). Infrastructure concerns belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A pizza size code outside the known set.
    #[error("invalid pizza size: {0}")]
    InvalidSize(String),

    /// A customization kind code outside the known set.
    #[error("invalid customization kind: {0}")]
    InvalidCustomizationKind(String),

    /// Stock or money arithmetic left the representable range.
    #[error("arithmetic overflow: {0}")]
    Overflow(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn invalid_size(code: impl Into<String>) -> Self {
        Self::InvalidSize(code.into())
    }

    pub fn invalid_customization_kind(code: impl Into<String>) -> Self {
        Self::InvalidCustomizationKind(code.into())
    }

    pub fn overflow(what: impl Into<String>) -> Self {
        Self::Overflow(what.into())
    }
}
