//! Domain validation errors.
//!
//! Returned by `try_new` constructors when an input would break a domain
//! invariant.
//!
//! # Examples
//!
//! ```
//! use gkecc::domain::error::DomainError;
//! use gkecc::domain::shape::Shape;
//! use rust_decimal_macros::dec;
//!
//! let result = Shape::try_new(-2, dec!(16));
//! assert!(matches!(result, Err(DomainError::NegativeVcpus { vcpus: -2 })));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// vCPU count below zero.
    #[error("vcpus must not be negative, got {vcpus}")]
    NegativeVcpus {
        /// The rejected vCPU count.
        vcpus: i64,
    },

    /// vCPU count beyond what any machine family offers.
    #[error("vcpus {vcpus} is out of range (at most {max})")]
    VcpusOutOfRange {
        /// The rejected vCPU count.
        vcpus: i64,
        /// The largest accepted vCPU count.
        max: u32,
    },

    /// RAM size below zero.
    #[error("ram must not be negative, got {ram_gb}GB")]
    NegativeRam {
        /// The rejected RAM size.
        ram_gb: Decimal,
    },

    /// RAM size beyond what any machine family offers.
    #[error("ram {ram_gb}GB is out of range (at most {max}GB)")]
    RamOutOfRange {
        /// The rejected RAM size.
        ram_gb: Decimal,
        /// The largest accepted RAM size.
        max: Decimal,
    },

    /// Machine family identifiers cannot be blank.
    #[error("machine family cannot be empty")]
    EmptyFamily,

    /// Hourly rates are never negative.
    #[error("{family}: {rate} rate must not be negative, got {value}")]
    NegativeRate {
        /// Family the rate belongs to.
        family: String,
        /// `core` or `ram`.
        rate: &'static str,
        /// The rejected rate.
        value: Decimal,
    },

    /// Hourly rate too large to be a real per-unit price.
    #[error("{family}: {rate} rate {value} exceeds {max} USD/hour")]
    RateOutOfRange {
        /// Family the rate belongs to.
        family: String,
        /// `core` or `ram`.
        rate: &'static str,
        /// The rejected rate.
        value: Decimal,
        /// The largest accepted rate.
        max: Decimal,
    },
}
