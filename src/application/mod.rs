//! Application services (use cases).
//!
//! The pricing pipeline runs strictly forward:
//! fetch-or-cache → [`catalog`] → [`compatibility`] → cost → [`rank`] →
//! [`filter`]. [`pipeline`] sequences the steps against the outbound ports.

pub mod catalog;
pub mod compatibility;
pub mod filter;
pub mod pipeline;
pub mod rank;
