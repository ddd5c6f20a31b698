//! Scripted machine-type provider.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::domain::MachineType;
use crate::error::ProviderError;
use crate::port::MachineTypeProvider;

/// Answers every listing with the same machine types or error.
#[derive(Debug)]
pub struct ScriptedMachineTypes {
    response: Result<Vec<MachineType>, ProviderError>,
    calls: AtomicUsize,
}

impl ScriptedMachineTypes {
    /// Always answer with `machine_types`.
    pub fn returning(machine_types: Vec<MachineType>) -> Self {
        Self {
            response: Ok(machine_types),
            calls: AtomicUsize::new(0),
        }
    }

    /// Always fail with `error`.
    pub fn failing(error: ProviderError) -> Self {
        Self {
            response: Err(error),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `list` calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MachineTypeProvider for ScriptedMachineTypes {
    async fn list(&self, _region: &str) -> Result<Vec<MachineType>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response.clone()
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

/// Standard machine types (4 GB per vCPU) for `family` at `vcpus`.
pub fn standard(family: &str, vcpus: u32) -> MachineType {
    MachineType::new(
        format!("{family}-standard-{vcpus}"),
        vcpus,
        u64::from(vcpus) * 4096,
    )
}
