//! Segmented addresses and tagged memory values

use crate::error::{CoreError, Result};
use crate::field::Felt;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Address of a memory cell: a segment plus an offset inside it
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Relocatable {
    pub segment_index: usize,
    pub offset: u64,
}

impl Relocatable {
    #[inline]
    pub const fn new(segment_index: usize, offset: u64) -> Self {
        Self { segment_index, offset }
    }

    /// Shift by a signed delta, staying inside the segment
    pub fn offset_by(self, delta: i64) -> Result<Self> {
        self.offset
            .checked_add_signed(delta)
            .map(|offset| Self::new(self.segment_index, offset))
            .ok_or_else(|| CoreError::AddressOverflow {
                address: self.to_string(),
                delta,
            })
    }

    /// Shift forward by `n` cells
    pub fn add_usize(self, n: usize) -> Result<Self> {
        let delta = i64::try_from(n).map_err(|_| CoreError::AddressOverflow {
            address: self.to_string(),
            delta: i64::MAX,
        })?;
        self.offset_by(delta)
    }

    /// Shift by a field element read as a signed integer
    pub fn add_felt(self, delta: &Felt) -> Result<Self> {
        let delta = delta
            .to_i64()
            .ok_or_else(|| CoreError::InvalidOffset(delta.to_string()))?;
        self.offset_by(delta)
    }
}

impl fmt::Display for Relocatable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.segment_index, self.offset)
    }
}

/// Content of a memory cell
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemoryValue {
    Felt(Felt),
    Address(Relocatable),
}

impl MemoryValue {
    pub fn as_felt(&self) -> Result<&Felt> {
        match self {
            Self::Felt(felt) => Ok(felt),
            Self::Address(address) => Err(CoreError::ExpectedFelt(address.to_string())),
        }
    }

    pub fn as_address(&self) -> Result<Relocatable> {
        match self {
            Self::Address(address) => Ok(*address),
            Self::Felt(felt) => Err(CoreError::ExpectedAddress(felt.to_string())),
        }
    }

    #[inline]
    pub fn is_address(&self) -> bool {
        matches!(self, Self::Address(_))
    }
}

impl From<Felt> for MemoryValue {
    fn from(felt: Felt) -> Self {
        Self::Felt(felt)
    }
}

impl From<Relocatable> for MemoryValue {
    fn from(address: Relocatable) -> Self {
        Self::Address(address)
    }
}

impl From<u64> for MemoryValue {
    fn from(value: u64) -> Self {
        Self::Felt(Felt::from(value))
    }
}

impl fmt::Display for MemoryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Felt(felt) => write!(f, "{felt}"),
            Self::Address(address) => write!(f, "{address}"),
        }
    }
}
