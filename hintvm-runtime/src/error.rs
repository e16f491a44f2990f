//! Runtime error types

use hintvm_core::{CoreError, MemoryValue, Relocatable};
use hintvm_parser::ReferenceError;
use thiserror::Error;

/// Failures raised by the segmented memory
#[derive(Debug, Error)]
pub enum MemoryError {
    #[error("Unknown segment {0}")]
    UnknownSegment(usize),

    #[error("Memory cell {0} has not been written")]
    UnsetCell(Relocatable),

    #[error("Address {0} is out of bounds")]
    OutOfBounds(Relocatable),

    #[error("Write-once violation at {address}: holds {existing}, attempted {attempted}")]
    WriteOnceViolation {
        address: Relocatable,
        existing: MemoryValue,
        attempted: MemoryValue,
    },

    #[error("Segment limit exceeded: {limit}")]
    SegmentLimitExceeded { limit: usize },

    #[error("Value error: {0}")]
    Value(#[from] CoreError),
}

/// Failures raised by the scope stack
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScopeError {
    #[error("cannot exit the last scope")]
    CannotExitLastScope,

    #[error("variable not found: {0}")]
    VariableNotFound(String),

    #[error("variable {name} is not {expected}")]
    UnexpectedType { name: String, expected: &'static str },
}

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Memory error: {0}")]
    Memory(#[from] MemoryError),

    #[error("Scope error: {0}")]
    Scope(#[from] ScopeError),

    #[error("Reference error: {0}")]
    Reference(#[from] ReferenceError),

    #[error("Value error: {0}")]
    Core(#[from] CoreError),

    #[error("Unknown operand: {0}")]
    UnknownOperand(String),

    #[error("Duplicate operand: {0}")]
    DuplicateOperand(String),

    #[error("Operand {name} is ambiguous: matches {candidates:?}")]
    AmbiguousOperand { name: String, candidates: Vec<String> },

    #[error("Invalid operand {name}: {reason}")]
    InvalidOperand { name: String, reason: &'static str },

    #[error("Cannot resolve {reference}: {reason}")]
    Unresolvable { reference: String, reason: &'static str },

    #[error("Input word at {address} does not fit in 32 bits: {value}")]
    WordOutOfRange { address: Relocatable, value: String },

    #[error("hint {name} failed: {source}")]
    Hint {
        name: String,
        source: Box<RuntimeError>,
    },

    #[error("{0}")]
    Other(String),
}

impl RuntimeError {
    /// Attach the failing hint's name
    pub fn in_hint(self, name: impl Into<String>) -> Self {
        Self::Hint {
            name: name.into(),
            source: Box::new(self),
        }
    }
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
