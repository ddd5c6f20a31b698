//! gkecc - cost-ranked GKE `ComputeClass` generation.
//!
//! Fetches Compute Engine pricing for one region, drops families that cannot
//! host the workload shape, costs every remaining family and tier, and emits
//! them cheapest first as `ComputeClass` priorities.
//!
//! # Architecture
//!
//! Hexagonal layout:
//!
//! - [`domain`] - pricing records, shapes, machine types, the cost function
//! - [`port`] - traits for the pricing provider, machine-type listing and the
//!   pricing cache
//! - [`application`] - catalog building, compatibility, ranking, filtering,
//!   the pipeline
//! - [`adapter`] - Cloud Billing and Compute Engine clients, file cache,
//!   manifest renderers, CLI
//! - [`infrastructure`] - settings, logging, runtime wiring
//!
//! # Example
//!
//! ```
//! use gkecc::domain::cost::daily_cost;
//! use gkecc::domain::{Architecture, MachineFamilyPricing, Shape, Tier};
//! use rust_decimal_macros::dec;
//!
//! let e2 = MachineFamilyPricing::try_new(
//!     "e2",
//!     Architecture::Amd64,
//!     dec!(0.00527),
//!     dec!(0.00071),
//!     Tier::Spot,
//! )
//! .unwrap();
//! let shape = Shape::try_new(4, dec!(16)).unwrap();
//!
//! assert_eq!(daily_cost(&e2, &shape), dec!(0.77856));
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
