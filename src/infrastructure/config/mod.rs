//! Settings file sections.

pub mod cache;
pub mod logging;
pub mod settings;
