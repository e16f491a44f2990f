//! # Hint table
//!
//! Binds hints to program counters. Each entry names the hint and carries the
//! textual references of the operands it reads or writes, exactly as the
//! compiler emits them (e.g. `[cast(fp + (-3), felt*)]`).
//!
//! The table serialises to JSON:
//!
//! ```text
//! {
//!   "hints": {
//!     "4": [
//!       { "code": "MemcpyContinueCopying",
//!         "references": { "output": "[cast(ap + (-1), felt*)]" } }
//!     ]
//!   }
//! }
//! ```

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Hints the runtime knows how to execute
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HintCode {
    AllocSegment,
    VmEnterScope,
    VmExitScope,
    MemcpyEnterScope,
    MemcpyContinueCopying,
    PackedSha256,
    Sha256Chunk,
    FinalizeSha256,
}

impl HintCode {
    pub const ALL: [HintCode; 8] = [
        HintCode::AllocSegment,
        HintCode::VmEnterScope,
        HintCode::VmExitScope,
        HintCode::MemcpyEnterScope,
        HintCode::MemcpyContinueCopying,
        HintCode::PackedSha256,
        HintCode::Sha256Chunk,
        HintCode::FinalizeSha256,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::AllocSegment => "AllocSegment",
            Self::VmEnterScope => "VMEnterScope",
            Self::VmExitScope => "VMExitScope",
            Self::MemcpyEnterScope => "MemcpyEnterScope",
            Self::MemcpyContinueCopying => "MemcpyContinueCopying",
            Self::PackedSha256 => "PackedSha256",
            Self::Sha256Chunk => "Sha256Chunk",
            Self::FinalizeSha256 => "FinalizeSha256",
        }
    }
}

impl FromStr for HintCode {
    type Err = CoreError;

    fn from_str(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|code| code.name() == name)
            .ok_or_else(|| CoreError::UnknownHintCode(name.to_string()))
    }
}

impl fmt::Display for HintCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One hint bound to a program location
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintDescriptor {
    pub code: HintCode,

    /// Operand name -> reference text
    #[serde(default)]
    pub references: BTreeMap<String, String>,
}

impl HintDescriptor {
    pub fn new(code: HintCode) -> Self {
        Self {
            code,
            references: BTreeMap::new(),
        }
    }

    /// Attach an operand reference
    #[must_use]
    pub fn with_reference(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.references.insert(name.into(), text.into());
        self
    }
}

/// All hints of a program, keyed by program counter offset
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintTable {
    pub hints: BTreeMap<u64, Vec<HintDescriptor>>,
}

impl HintTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a hint at `pc`; hints at the same pc run in insertion order
    pub fn add(&mut self, pc: u64, descriptor: HintDescriptor) {
        self.hints.entry(pc).or_default().push(descriptor);
    }

    pub fn hints_at(&self, pc: u64) -> &[HintDescriptor] {
        self.hints.get(&pc).map(Vec::as_slice).unwrap_or_default()
    }

    /// Total number of hints across all program counters
    pub fn len(&self) -> usize {
        self.hints.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
