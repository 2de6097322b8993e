//! Error types for the numeric conversion layer and the modifier engine.
//!
//! Both variants are programming-contract violations surfaced during
//! development and integration testing, not runtime conditions a caller is
//! expected to recover from. Nothing in this crate retries.

/// Errors produced while converting values or applying modifiers.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum StatError {
    /// A value cannot be represented in the requested numeric type.
    ///
    /// Raised by the checked conversion path when a non-finite `f64` is
    /// forced into an integer representation. Indicates a type was wired
    /// into the numeric system incorrectly.
    #[error("unsupported conversion: {value} cannot be represented as {type_name}")]
    UnsupportedConversion {
        type_name: &'static str,
        value: f64,
    },

    /// A modifier's payload cannot be reconciled with the target value.
    ///
    /// Raised at apply/unapply time by modifiers whose payload type does not
    /// match the value they were attached to.
    #[error("unsupported operation: {operation} is not defined for {type_name}")]
    UnsupportedOperation {
        operation: &'static str,
        type_name: &'static str,
    },
}
