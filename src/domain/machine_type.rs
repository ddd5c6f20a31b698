//! Predefined machine types offered in a region.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const MB_PER_GB: Decimal = dec!(1024);

/// One predefined machine type, e.g. `n2-standard-4`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MachineType {
    /// Full machine type name, e.g. `n2-standard-4`.
    pub name: String,
    /// vCPUs visible to the guest.
    pub guest_cpus: u32,
    /// Memory in MB as reported by Compute Engine.
    pub memory_mb: u64,
}

impl MachineType {
    /// Create a machine type from its listing fields.
    #[must_use]
    pub fn new(name: impl Into<String>, guest_cpus: u32, memory_mb: u64) -> Self {
        Self {
            name: name.into(),
            guest_cpus,
            memory_mb,
        }
    }

    /// Family prefix of the name (`n2` for `n2-standard-4`).
    #[must_use]
    pub fn family(&self) -> &str {
        self.name
            .split_once('-')
            .map_or(self.name.as_str(), |(family, _)| family)
    }

    /// Memory in GB (1 GB = 1024 MB).
    #[must_use]
    pub fn memory_gb(&self) -> Decimal {
        Decimal::from(self.memory_mb) / MB_PER_GB
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn family_is_the_name_prefix() {
        assert_eq!(MachineType::new("n2d-highmem-8", 8, 65536).family(), "n2d");
        assert_eq!(MachineType::new("e2", 2, 8192).family(), "e2");
    }

    #[test]
    fn memory_converts_to_gb() {
        assert_eq!(MachineType::new("n2-standard-4", 4, 16384).memory_gb(), dec!(16));
        assert_eq!(MachineType::new("n2-standard-4", 4, 16000).memory_gb(), dec!(15.625));
    }
}
