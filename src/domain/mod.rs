//! Provider-agnostic pricing domain.
//!
//! - [`Architecture`] and [`Tier`] - closed classifications of a machine family
//! - [`MachineFamilyPricing`] - one normalized per-family, per-tier rate card
//! - [`Shape`] - the workload size every candidate is costed against
//! - [`CostedCandidate`] - a rate card annotated with its derived daily cost
//! - [`MachineType`] - a predefined machine type offered in a region
//! - [`RawPayload`] / [`RegionCacheEntry`] - the provider snapshot that is cached

pub mod architecture;
pub mod candidate;
pub mod cost;
pub mod error;
pub mod family;
pub mod machine_type;
pub mod money;
pub mod pricing;
pub mod raw;
pub mod shape;

pub use architecture::Architecture;
pub use candidate::CostedCandidate;
pub use error::DomainError;
pub use family::MachineCategory;
pub use machine_type::MachineType;
pub use money::{UsdPerDay, UsdPerHour, HOURS_PER_DAY};
pub use pricing::{MachineFamilyPricing, Tier};
pub use raw::{RawPayload, RawSku, RegionCacheEntry};
pub use shape::Shape;
