//! Syntax tree of the reference language
//!
//! One type per production:
//!
//! ```text
//! identifier  := derefCast | cast
//! derefCast   := '[' cast ']'
//! cast        := 'cast' '(' arithExp ',' typeName ')'
//! typeName    := Ident ('.' Ident)* '*'? '*'?
//! arithExp    := term (('+'|'-') term)*
//! term        := prodExp | expression
//! prodExp     := expression '*' expression
//! expression  := dderef | deref | cellRefExp | offset
//! cellRefExp  := '(' registerOffset ')' | register
//! cellRef     := registerOffset | register
//! registerOffset := register ('+'|'-') offset
//! offset      := Number | '(' '-' Number ')'
//! deref       := '[' cellRef ']'
//! dderef      := '[' deref ('+'|'-') offset ']' | '[' deref ']'
//! ```

use hintvm_core::Register;
use num_bigint::BigUint;
use std::fmt;

/// Top-level reference
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IdentifierExp {
    /// `[cast(...)]`: the cast value is a pointer to dereference
    DerefCast(CastExp),
    /// `cast(...)`
    Cast(CastExp),
}

impl IdentifierExp {
    pub fn cast(&self) -> &CastExp {
        match self {
            Self::DerefCast(cast) | Self::Cast(cast) => cast,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CastExp {
    pub value: ArithExp,
    pub cast_type: TypeName,
}

/// Dotted type path with up to two pointer markers; informational only
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeName {
    pub path: Vec<String>,
    pub pointer_depth: u8,
}

impl TypeName {
    #[inline]
    pub fn is_pointer(&self) -> bool {
        self.pointer_depth > 0
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.join("."))?;
        for _ in 0..self.pointer_depth {
            write!(f, "*")?;
        }
        Ok(())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AddOperator {
    Plus,
    Minus,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArithExp {
    pub term: TermExp,
    pub additions: Vec<AddExp>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddExp {
    pub operator: AddOperator,
    pub term: TermExp,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TermExp {
    Prod(ProdExp),
    Exp(Expression),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProdExp {
    pub lhs: Expression,
    pub rhs: Expression,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expression {
    DDeref(DDerefExp),
    Deref(DerefExp),
    CellRef(CellRefExp),
    Int(OffsetExp),
}

/// Register cell, bare or with an offset
///
/// The parenthesised form `(ap + 3)` is required when the cell stands alone
/// as an operand, otherwise `ap + 3` parses as a sum of two terms.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CellRefExp {
    RegisterOffset(RegisterOffset),
    Register(Register),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegisterOffset {
    pub register: Register,
    pub operator: AddOperator,
    pub offset: OffsetExp,
}

/// Integer literal; negative literals only appear as `(-N)`
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OffsetExp {
    Number(BigUint),
    NegNumber(BigUint),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DerefExp {
    pub cell: CellRefExp,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DDerefExp {
    DerefOffset {
        deref: DerefExp,
        operator: AddOperator,
        offset: OffsetExp,
    },
    Deref(DerefExp),
}
