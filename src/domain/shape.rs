//! Workload shape used to cost every candidate.

use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use super::error::DomainError;

/// Largest vCPU count accepted for a shape.
pub const MAX_VCPUS: u32 = 4096;

/// Largest RAM size in GB accepted for a shape.
pub const MAX_RAM_GB: Decimal = dec!(65536);

/// Requested workload size: vCPU count and RAM in GB.
///
/// Zero in either dimension is allowed and costs nothing. Both dimensions
/// are bounded so that costing a shape can never overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Shape {
    vcpus: u32,
    ram_gb: Decimal,
}

impl Shape {
    /// Create a shape, rejecting negative or oversized dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NegativeVcpus`] or [`DomainError::NegativeRam`]
    /// below zero, and [`DomainError::VcpusOutOfRange`] or
    /// [`DomainError::RamOutOfRange`] above [`MAX_VCPUS`] / [`MAX_RAM_GB`].
    pub fn try_new(vcpus: i64, ram_gb: Decimal) -> Result<Self, DomainError> {
        if vcpus < 0 {
            return Err(DomainError::NegativeVcpus { vcpus });
        }
        let vcpus = u32::try_from(vcpus)
            .ok()
            .filter(|v| *v <= MAX_VCPUS)
            .ok_or(DomainError::VcpusOutOfRange {
                vcpus,
                max: MAX_VCPUS,
            })?;
        if ram_gb < Decimal::ZERO {
            return Err(DomainError::NegativeRam { ram_gb });
        }
        if ram_gb > MAX_RAM_GB {
            return Err(DomainError::RamOutOfRange {
                ram_gb,
                max: MAX_RAM_GB,
            });
        }

        Ok(Self {
            vcpus,
            ram_gb: ram_gb.normalize(),
        })
    }

    /// Requested vCPU count.
    #[must_use]
    pub const fn vcpus(&self) -> u32 {
        self.vcpus
    }

    /// Requested RAM in GB, normalized (`16.0` becomes `16`).
    #[must_use]
    pub const fn ram_gb(&self) -> Decimal {
        self.ram_gb
    }

    /// RAM per vCPU in GB, or `None` for a zero-vCPU shape.
    #[must_use]
    pub fn ram_per_vcpu(&self) -> Option<Decimal> {
        if self.vcpus == 0 {
            return None;
        }
        Some(self.ram_gb / Decimal::from(self.vcpus))
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}vCPU+{}GB", self.vcpus, self.ram_gb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn displays_compactly() {
        let shape = Shape::try_new(4, dec!(16.0)).unwrap();
        assert_eq!(shape.to_string(), "4vCPU+16GB");

        let shape = Shape::try_new(2, dec!(7.5)).unwrap();
        assert_eq!(shape.to_string(), "2vCPU+7.5GB");
    }

    #[test]
    fn zero_is_valid() {
        let shape = Shape::try_new(0, dec!(0)).unwrap();
        assert_eq!(shape.vcpus(), 0);
        assert_eq!(shape.ram_per_vcpu(), None);
    }

    #[test]
    fn ram_per_vcpu_divides() {
        let shape = Shape::try_new(4, dec!(26)).unwrap();
        assert_eq!(shape.ram_per_vcpu(), Some(dec!(6.5)));
    }

    #[test]
    fn rejects_oversized_dimensions() {
        assert!(matches!(
            Shape::try_new(i64::from(MAX_VCPUS) + 1, dec!(16)),
            Err(DomainError::VcpusOutOfRange { .. })
        ));
        assert!(matches!(
            Shape::try_new(4, Decimal::MAX),
            Err(DomainError::RamOutOfRange { .. })
        ));
        assert!(Shape::try_new(i64::from(MAX_VCPUS), MAX_RAM_GB).is_ok());
    }

    #[test]
    fn rejects_negative_dimensions() {
        assert_eq!(
            Shape::try_new(-1, dec!(16)),
            Err(DomainError::NegativeVcpus { vcpus: -1 })
        );
        assert_eq!(
            Shape::try_new(4, dec!(-0.5)),
            Err(DomainError::NegativeRam { ram_gb: dec!(-0.5) })
        );
        assert!(matches!(
            Shape::try_new(i64::MAX, dec!(1)),
            Err(DomainError::VcpusOutOfRange { .. })
        ));
    }
}
