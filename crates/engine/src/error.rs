//! The module contains the errors the engine can raise.
//!
//! The errors are:
//!
//! - [`InvalidCategory`] thrown when a category is empty after normalization.
//! - [`InvalidAmount`] thrown when an amount is non-positive or unparseable.
//! - [`InvalidDate`] thrown when a date or month cannot be parsed.
//! - [`InvalidSort`] thrown when a sort field/order token is unknown.
//! - [`NotFound`] thrown when a query target has no matching record.
//!
//!  [`InvalidCategory`]: EngineError::InvalidCategory
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`InvalidDate`]: EngineError::InvalidDate
//!  [`InvalidSort`]: EngineError::InvalidSort
//!  [`NotFound`]: EngineError::NotFound
use thiserror::Error;

/// Engine custom errors.
///
/// Every variant marks malformed input to one of the engine's own functions.
/// Storage and transport failures belong to the embedding layer and are never
/// wrapped here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid category: {0}")]
    InvalidCategory(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Invalid sort: {0}")]
    InvalidSort(String),
    #[error("\"{0}\" not found!")]
    NotFound(String),
}
