//! Implementations of ports (hexagonal adapters).
//!
//! - [`inbound`] - driving side: the command-line interface
//! - [`outbound`] - driven side: pricing provider, cache, manifest renderers

pub mod inbound;
pub mod outbound;
