//! Machine-type compatibility.
//!
//! A family can host the requested [`Shape`] when the region offers a
//! predefined type with exactly the shape's vCPUs and roughly its RAM, or
//! when the family accepts custom machine types and the shape's GB-per-vCPU
//! ratio is inside the custom range.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use crate::domain::family::CUSTOM_MACHINE_FAMILIES;
use crate::domain::{MachineType, Shape};

/// Lowest GB per vCPU a custom machine type accepts (inclusive).
pub const MIN_CUSTOM_GB_PER_VCPU: Decimal = dec!(0.9);

/// Highest GB per vCPU a custom machine type accepts (inclusive).
pub const MAX_CUSTOM_GB_PER_VCPU: Decimal = dec!(6.5);

/// Relative RAM difference still treated as a match for a predefined type.
pub const RAM_TOLERANCE: Decimal = dec!(0.05);

/// Whether `machine_type` provides `shape`.
#[must_use]
pub fn matches_shape(machine_type: &MachineType, shape: &Shape) -> bool {
    if machine_type.guest_cpus != shape.vcpus() {
        return false;
    }
    let wanted = shape.ram_gb();
    (machine_type.memory_gb() - wanted).abs() <= wanted * RAM_TOLERANCE
}

/// Whether a custom machine type of `family` can provide `shape`.
#[must_use]
pub fn supports_custom(family: &str, shape: &Shape) -> bool {
    CUSTOM_MACHINE_FAMILIES.contains(&family)
        && shape.ram_per_vcpu().is_some_and(|ratio| {
            (MIN_CUSTOM_GB_PER_VCPU..=MAX_CUSTOM_GB_PER_VCPU).contains(&ratio)
        })
}

/// The subset of `families` that can host `shape` given the machine types
/// offered in the region.
///
/// Machine types whose family is not in `families` are ignored.
#[must_use]
pub fn compatible_families(
    machine_types: &[MachineType],
    shape: &Shape,
    families: &BTreeSet<String>,
) -> BTreeSet<String> {
    let predefined: BTreeSet<&str> = machine_types
        .iter()
        .filter(|machine_type| matches_shape(machine_type, shape))
        .map(MachineType::family)
        .collect();

    let compatible: BTreeSet<String> = families
        .iter()
        .filter(|family| {
            predefined.contains(family.as_str()) || supports_custom(family, shape)
        })
        .cloned()
        .collect();

    debug!(
        shape = %shape,
        offered = machine_types.len(),
        requested = families.len(),
        compatible = compatible.len(),
        "Checked machine-type compatibility"
    );
    compatible
}
