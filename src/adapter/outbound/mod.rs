//! Outbound adapters (driven side).

pub mod cache;
pub mod gcp;
pub mod manifest;
