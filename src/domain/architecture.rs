//! CPU architecture of a machine family.

use std::fmt;

use serde::{Deserialize, Serialize};

/// CPU architecture a machine family runs on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Architecture {
    /// x86-64.
    #[default]
    Amd64,
    /// 64-bit ARM (Tau T2A, Axion C4A).
    Arm,
}

impl Architecture {
    /// Lowercase identifier used on the command line and in cache files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Amd64 => "amd64",
            Self::Arm => "arm",
        }
    }

    /// Uppercase label used in manifest descriptions.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Amd64 => "AMD64",
            Self::Arm => "ARM",
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_is_uppercase() {
        assert_eq!(Architecture::Arm.label(), "ARM");
        assert_eq!(Architecture::Amd64.to_string(), "amd64");
    }
}
