//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! All fallible public APIs return [`Result<T>`], an alias for
//! `std::result::Result<T, MaterialError>`. Every failure is reported
//! synchronously at the call site that caused it; a failed call leaves the
//! material untouched (no partial-failure state).
//!
//! Registration mistakes (duplicate input name, empty type-set) are
//! programming errors in a material constructor, not runtime conditions,
//! and panic instead of returning a variant from this enum.

use thiserror::Error;

use crate::input::InputTypes;

/// The main error type for material input access.
///
/// Each variant carries the input name that triggered it so that callers
/// can report which parameter of which material misbehaved.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MaterialError {
    /// The named input was never registered on this material.
    #[error("unknown material input `{0}`")]
    UnknownInput(String),

    /// The value's kind is not in the input's accepted type-set.
    #[error("input `{name}` does not accept {actual:?} values (supported: {supported:?})")]
    UnsupportedType {
        /// Name of the rejected input
        name: String,
        /// Kind of the value that was offered
        actual: InputTypes,
        /// Type-set the input was registered with
        supported: InputTypes,
    },

    /// The input is registered but no value has ever been assigned to it.
    #[error("input `{0}` has no value assigned")]
    UnsetValue(String),
}

/// Alias for `Result<T, MaterialError>`.
pub type Result<T> = std::result::Result<T, MaterialError>;
