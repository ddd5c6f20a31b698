//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`provider`] - Scripted [`PricingProvider`](crate::port::PricingProvider)
//!   that replays queued responses and counts calls.
//! - [`machine_types`] - Scripted
//!   [`MachineTypeProvider`](crate::port::MachineTypeProvider) and machine
//!   type builders.
//! - [`pricing`] - Builders for raw SKUs and payloads.

pub mod machine_types;
pub mod pricing;
pub mod provider;
