//! # Memory references
//!
//! The value domain of the hint-reference language. A reference names either a
//! register-relative cell, a value read through one or two levels of
//! indirection, a constant, or an arithmetic combination of those that the
//! consumer still has to reduce.
//!
//! ```text
//! ap + 3              ApCellRef(3)
//! [fp + (-2)]         Deref(FpCellRef(-2))
//! [[fp + (-2)] + 3]   DoubleDeref(Deref(FpCellRef(-2)), 3)
//! 5                   Immediate(5)
//! [ap] * 2            BinaryOp(Mul, Deref(ApCellRef(0)), Immediate(2))
//! ```

use crate::field::Felt;
use crate::register::Register;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A register plus a signed cell offset
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRef {
    pub register: Register,
    pub offset: i16,
}

impl CellRef {
    #[inline]
    pub const fn new(register: Register, offset: i16) -> Self {
        Self { register, offset }
    }

    #[inline]
    pub const fn ap(offset: i16) -> Self {
        Self::new(Register::Ap, offset)
    }

    #[inline]
    pub const fn fp(offset: i16) -> Self {
        Self::new(Register::Fp, offset)
    }

    /// Shift the offset; `None` when the result leaves the i16 range
    pub fn add_offset(self, delta: i16) -> Option<Self> {
        self.offset
            .checked_add(delta)
            .map(|offset| Self::new(self.register, offset))
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.offset {
            0 => write!(f, "{}", self.register),
            offset if offset < 0 => write!(f, "{} + ({})", self.register, offset),
            offset => write!(f, "{} + {}", self.register, offset),
        }
    }
}

/// Value stored at a cell
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Deref {
    pub cell: CellRef,
}

impl Deref {
    #[inline]
    pub const fn new(cell: CellRef) -> Self {
        Self { cell }
    }
}

impl fmt::Display for Deref {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.cell)
    }
}

/// Value stored at `[deref] + offset`
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DoubleDeref {
    pub deref: Deref,
    pub offset: i16,
}

impl DoubleDeref {
    #[inline]
    pub const fn new(deref: Deref, offset: i16) -> Self {
        Self { deref, offset }
    }
}

impl fmt::Display for DoubleDeref {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.offset {
            0 => write!(f, "[{}]", self.deref),
            offset if offset < 0 => write!(f, "[{} + ({})]", self.deref, offset),
            offset => write!(f, "[{} + {}]", self.deref, offset),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Mul,
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add => write!(f, "+"),
            Self::Mul => write!(f, "*"),
        }
    }
}

/// Arithmetic combination left for the consumer to reduce
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BinaryOp {
    pub operator: Operator,
    pub lhs: Reference,
    pub rhs: Reference,
}

/// Result of evaluating a hint reference
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Reference {
    ApCellRef(i16),
    FpCellRef(i16),
    Deref(Deref),
    DoubleDeref(DoubleDeref),
    Immediate(Felt),
    BinaryOp(Box<BinaryOp>),
}

impl Reference {
    pub fn binary_op(operator: Operator, lhs: Reference, rhs: Reference) -> Self {
        Self::BinaryOp(Box::new(BinaryOp { operator, lhs, rhs }))
    }

    pub fn deref(cell: CellRef) -> Self {
        Self::Deref(Deref::new(cell))
    }

    pub fn double_deref(cell: CellRef, offset: i16) -> Self {
        Self::DoubleDeref(DoubleDeref::new(Deref::new(cell), offset))
    }

    /// The register cell this reference names, if it is one
    ///
    /// Only register cells accumulate additive offsets; everything else
    /// folds into `BinaryOp` nodes.
    pub fn as_cell_ref(&self) -> Option<CellRef> {
        match self {
            Self::ApCellRef(offset) => Some(CellRef::ap(*offset)),
            Self::FpCellRef(offset) => Some(CellRef::fp(*offset)),
            _ => None,
        }
    }

    #[inline]
    pub fn is_cell_like(&self) -> bool {
        self.as_cell_ref().is_some()
    }
}

impl From<CellRef> for Reference {
    fn from(cell: CellRef) -> Self {
        match cell.register {
            Register::Ap => Self::ApCellRef(cell.offset),
            Register::Fp => Self::FpCellRef(cell.offset),
        }
    }
}

impl From<Deref> for Reference {
    fn from(deref: Deref) -> Self {
        Self::Deref(deref)
    }
}

impl From<DoubleDeref> for Reference {
    fn from(dderef: DoubleDeref) -> Self {
        Self::DoubleDeref(dderef)
    }
}

impl From<Felt> for Reference {
    fn from(value: Felt) -> Self {
        Self::Immediate(value)
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ApCellRef(offset) => write!(f, "{}", CellRef::ap(*offset)),
            Self::FpCellRef(offset) => write!(f, "{}", CellRef::fp(*offset)),
            Self::Deref(deref) => write!(f, "{deref}"),
            Self::DoubleDeref(dderef) => write!(f, "{dderef}"),
            Self::Immediate(value) => write!(f, "{}", value.to_signed_bigint()),
            Self::BinaryOp(op) => write!(f, "({} {} {})", op.lhs, op.operator, op.rhs),
        }
    }
}
