//! Register definitions
//!
//! Only the two registers a hint reference can name are modelled here; `pc`
//! never appears in reference text.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Register a cell reference is relative to
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Register {
    /// Allocation pointer
    Ap,
    /// Frame pointer
    Fp,
}

impl Register {
    pub fn name(self) -> &'static str {
        match self {
            Self::Ap => "ap",
            Self::Fp => "fp",
        }
    }

    /// Parse a register name as it appears in reference text
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ap" => Some(Self::Ap),
            "fp" => Some(Self::Fp),
            _ => None,
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
