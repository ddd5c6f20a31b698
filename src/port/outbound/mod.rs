//! Outbound ports (driven side): interfaces implemented by outbound adapters.

pub mod cache;
pub mod machine_types;
pub mod pricing;
