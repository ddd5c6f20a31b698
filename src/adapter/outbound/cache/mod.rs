//! Pricing cache adapters.
//!
//! - [`FileCache`] - one JSON file per region, replaced atomically
//! - [`MemoryCache`] - in-process store used by tests

mod file;
mod memory;

pub use file::FileCache;
pub use memory::MemoryCache;
