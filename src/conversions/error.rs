//! Conversion errors

use thiserror::Error;

use crate::units::Unit;

/// Errors that can occur when resolving a unit conversion.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// No path exists from `from` to `to` within the hop limit.
    #[error("no conversion from {from} to {to}")]
    NotFound {
        /// Unit the quantity was expressed in
        from: Unit,

        /// Unit that was requested
        to: Unit,
    },

    /// The converted amount does not fit in a decimal.
    #[error("amount overflowed converting from {from} to {to}")]
    Overflow {
        /// Unit of the step that overflowed
        from: Unit,

        /// Target of the step that overflowed
        to: Unit,
    },
}
