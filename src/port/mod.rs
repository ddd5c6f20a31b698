//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!        ┌──────────────────────────┐
//!        │       Application        │
//!        │  catalog → rank → filter │
//!        └────────────┬─────────────┘
//!        ┌────────────┼───────────────────┐
//!        ▼            ▼                   ▼
//! ┌───────────────┐ ┌────────────┐ ┌───────────────────┐
//! │PricingProvider│ │PricingCache│ │MachineTypeProvider│
//! └───────────────┘ └────────────┘ └───────────────────┘
//! ```
//!
//! - [`outbound::pricing::PricingProvider`] - fetches raw pricing for a region
//! - [`outbound::cache::PricingCache`] - persists the last fetch per region
//! - [`outbound::machine_types::MachineTypeProvider`] - lists predefined
//!   machine types offered in a region

pub mod outbound;

pub use outbound::cache::PricingCache;
pub use outbound::machine_types::MachineTypeProvider;
pub use outbound::pricing::PricingProvider;
