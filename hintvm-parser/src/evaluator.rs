//! Reduce a parsed reference to a [`Reference`]
//!
//! Offsets stay arbitrary-precision until they are combined with a register
//! or a deref, where they are narrowed to i16. Additive chains starting at a
//! register cell accumulate into that cell's offset; any other chain folds
//! into `BinaryOp` nodes for the consumer to reduce.

use crate::ast::{
    AddOperator, ArithExp, CastExp, CellRefExp, DDerefExp, DerefExp, Expression, IdentifierExp,
    OffsetExp, ProdExp, RegisterOffset, TermExp,
};
use crate::error::EvaluationError;
use hintvm_core::{CellRef, Deref, DoubleDeref, Felt, Operator, Reference};
use num_bigint::{BigInt, Sign};
use num_traits::ToPrimitive;

type EvalResult<T> = std::result::Result<T, EvaluationError>;

/// Narrow `value` to i16 and apply the sign of `operator`
fn signed_offset(value: &BigInt, operator: AddOperator) -> EvalResult<i16> {
    let offset = value.to_i16().ok_or(EvaluationError::OffsetOverflow)?;
    match operator {
        AddOperator::Plus => Ok(offset),
        AddOperator::Minus => offset.checked_neg().ok_or(EvaluationError::OffsetOverflow),
    }
}

fn negate(reference: Reference) -> Reference {
    match reference {
        Reference::Immediate(value) => Reference::Immediate(-value),
        other => Reference::binary_op(Operator::Mul, other, Reference::Immediate(Felt::from(-1i64))),
    }
}

impl IdentifierExp {
    pub fn evaluate(&self) -> EvalResult<Reference> {
        match self {
            Self::DerefCast(cast) => evaluate_deref_cast(cast),
            Self::Cast(cast) => cast.evaluate(),
        }
    }
}

/// `[cast(...)]`: dereference the pointer the cast evaluates to
fn evaluate_deref_cast(cast: &CastExp) -> EvalResult<Reference> {
    let value = cast.evaluate()?;
    if let Some(cell) = value.as_cell_ref() {
        return Ok(Reference::Deref(Deref::new(cell)));
    }

    match value {
        Reference::Deref(deref) => Ok(Reference::DoubleDeref(DoubleDeref::new(deref, 0))),
        Reference::BinaryOp(op) => match (op.operator, &op.lhs, &op.rhs) {
            (Operator::Add, Reference::Deref(deref), Reference::Immediate(value)) => {
                let offset = value.to_i16().ok_or(EvaluationError::InvalidDerefBinaryOp)?;
                Ok(Reference::DoubleDeref(DoubleDeref::new(*deref, offset)))
            }
            _ => Err(EvaluationError::InvalidDerefBinaryOp),
        },
        _ => Err(EvaluationError::UnexpectedDeref),
    }
}

impl CastExp {
    /// The type annotation does not affect the result
    pub fn evaluate(&self) -> EvalResult<Reference> {
        self.value.evaluate()
    }
}

impl ArithExp {
    pub fn evaluate(&self) -> EvalResult<Reference> {
        let first = self.term.evaluate()?;

        if let Some(mut cell) = first.as_cell_ref() {
            for addition in &self.additions {
                let Reference::Immediate(value) = addition.term.evaluate()? else {
                    return Err(EvaluationError::InvalidArithmetic);
                };
                let offset = signed_offset(&value.to_signed_bigint(), addition.operator)?;
                cell = cell.add_offset(offset).ok_or(EvaluationError::OffsetOverflow)?;
            }
            return Ok(cell.into());
        }

        let mut result = first;
        for addition in &self.additions {
            let rhs = addition.term.evaluate()?;
            let rhs = match addition.operator {
                AddOperator::Plus => rhs,
                AddOperator::Minus => negate(rhs),
            };
            result = Reference::binary_op(Operator::Add, result, rhs);
        }
        Ok(result)
    }
}

impl TermExp {
    pub fn evaluate(&self) -> EvalResult<Reference> {
        match self {
            Self::Prod(prod) => prod.evaluate(),
            Self::Exp(exp) => exp.evaluate(),
        }
    }
}

impl ProdExp {
    /// Products are never folded here
    pub fn evaluate(&self) -> EvalResult<Reference> {
        let lhs = self.lhs.evaluate()?;
        let rhs = self.rhs.evaluate()?;
        Ok(Reference::binary_op(Operator::Mul, lhs, rhs))
    }
}

impl Expression {
    pub fn evaluate(&self) -> EvalResult<Reference> {
        match self {
            Self::Int(offset) => Ok(Reference::Immediate(Felt::from_bigint(&offset.evaluate()))),
            Self::CellRef(cell) => cell.evaluate().map(Reference::from),
            Self::Deref(deref) => deref.evaluate().map(Reference::Deref),
            Self::DDeref(dderef) => dderef.evaluate().map(Reference::DoubleDeref),
        }
    }
}

impl CellRefExp {
    pub fn evaluate(&self) -> EvalResult<CellRef> {
        match self {
            Self::RegisterOffset(register_offset) => register_offset.evaluate(),
            Self::Register(register) => Ok(CellRef::new(*register, 0)),
        }
    }
}

impl RegisterOffset {
    pub fn evaluate(&self) -> EvalResult<CellRef> {
        let offset = signed_offset(&self.offset.evaluate(), self.operator)?;
        Ok(CellRef::new(self.register, offset))
    }
}

impl OffsetExp {
    pub fn evaluate(&self) -> BigInt {
        match self {
            Self::Number(value) => BigInt::from_biguint(Sign::Plus, value.clone()),
            Self::NegNumber(value) => BigInt::from_biguint(Sign::Minus, value.clone()),
        }
    }
}

impl DerefExp {
    pub fn evaluate(&self) -> EvalResult<Deref> {
        self.cell.evaluate().map(Deref::new)
    }
}

impl DDerefExp {
    pub fn evaluate(&self) -> EvalResult<DoubleDeref> {
        match self {
            Self::Deref(deref) => Ok(DoubleDeref::new(deref.evaluate()?, 0)),
            Self::DerefOffset {
                deref,
                operator,
                offset,
            } => {
                let deref = deref.evaluate()?;
                let offset = signed_offset(&offset.evaluate(), *operator)?;
                Ok(DoubleDeref::new(deref, offset))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn eval(source: &str) -> EvalResult<Reference> {
        parse(source).unwrap().evaluate()
    }

    fn imm(value: i64) -> Reference {
        Reference::Immediate(Felt::from(value))
    }

    #[test]
    fn test_register_cells() {
        assert_eq!(eval("cast(ap, felt)").unwrap(), Reference::ApCellRef(0));
        assert_eq!(eval("cast(fp + 5, felt)").unwrap(), Reference::FpCellRef(5));
        assert_eq!(eval("cast((fp - 5), felt)").unwrap(), Reference::FpCellRef(-5));
        assert_eq!(eval("cast(ap + (-3), felt)").unwrap(), Reference::ApCellRef(-3));
    }

    #[test]
    fn test_offset_accumulation_left_to_right() {
        assert_eq!(eval("cast(ap + 3 - 1, felt)").unwrap(), Reference::ApCellRef(2));
        assert_eq!(eval("cast(fp - 1 - 1 + 10, felt)").unwrap(), Reference::FpCellRef(8));
        assert_eq!(eval("cast((ap + 2) + 3, felt)").unwrap(), Reference::ApCellRef(5));
    }

    #[test]
    fn test_accumulation_rejects_non_immediate() {
        assert_eq!(eval("cast(ap + [fp], felt)"), Err(EvaluationError::InvalidArithmetic));
        assert_eq!(eval("cast(ap + 2 * 3, felt)"), Err(EvaluationError::InvalidArithmetic));
        assert_eq!(eval("cast(ap + fp, felt)"), Err(EvaluationError::InvalidArithmetic));
    }

    #[test]
    fn test_accumulation_overflow() {
        assert_eq!(eval("cast(ap + 32767 + 1, felt)"), Err(EvaluationError::OffsetOverflow));
        assert_eq!(eval("cast(ap + 40000, felt)"), Err(EvaluationError::OffsetOverflow));
        assert_eq!(eval("cast(ap + (-40000), felt)"), Err(EvaluationError::OffsetOverflow));
        assert_eq!(eval("cast(ap - (-32768), felt)"), Err(EvaluationError::OffsetOverflow));
    }

    #[test]
    fn test_register_offset_narrowing() {
        assert_eq!(eval("cast([ap + 40000], felt)"), Err(EvaluationError::OffsetOverflow));
        assert_eq!(eval("cast([ap + (-40000)], felt)"), Err(EvaluationError::OffsetOverflow));
        assert_eq!(eval("cast([ap - 32768], felt)"), Err(EvaluationError::OffsetOverflow));
        assert_eq!(
            eval("cast([ap + (-32768)], felt)").unwrap(),
            Reference::deref(CellRef::ap(-32768))
        );
    }

    #[test]
    fn test_deref_and_double_deref() {
        assert_eq!(eval("cast([fp - 2], felt*)").unwrap(), Reference::deref(CellRef::fp(-2)));
        assert_eq!(
            eval("cast([[fp - 2] + 3], felt*)").unwrap(),
            Reference::double_deref(CellRef::fp(-2), 3)
        );
        assert_eq!(
            eval("cast([[ap + 1] - 4], felt*)").unwrap(),
            Reference::double_deref(CellRef::ap(1), -4)
        );
        assert_eq!(eval("cast([[ap]], felt)").unwrap(), Reference::double_deref(CellRef::ap(0), 0));
    }

    #[test]
    fn test_immediates() {
        assert_eq!(eval("cast(17, felt)").unwrap(), imm(17));
        assert_eq!(eval("cast((-17), felt)").unwrap(), imm(-17));
    }

    #[test]
    fn test_products_stay_unresolved() {
        assert_eq!(
            eval("cast(2 * 3, felt)").unwrap(),
            Reference::binary_op(Operator::Mul, imm(2), imm(3))
        );
        assert_eq!(
            eval("cast([ap] * [fp], felt)").unwrap(),
            Reference::binary_op(
                Operator::Mul,
                Reference::deref(CellRef::ap(0)),
                Reference::deref(CellRef::fp(0))
            )
        );
    }

    #[test]
    fn test_non_cell_chain_folds_left() {
        assert_eq!(
            eval("cast([fp - 2] + 1, felt*)").unwrap(),
            Reference::binary_op(Operator::Add, Reference::deref(CellRef::fp(-2)), imm(1))
        );
        assert_eq!(
            eval("cast(5 + 6 - 7, felt)").unwrap(),
            Reference::binary_op(
                Operator::Add,
                Reference::binary_op(Operator::Add, imm(5), imm(6)),
                imm(-7)
            )
        );
        assert_eq!(
            eval("cast([ap] - [fp], felt)").unwrap(),
            Reference::binary_op(
                Operator::Add,
                Reference::deref(CellRef::ap(0)),
                Reference::binary_op(Operator::Mul, Reference::deref(CellRef::fp(0)), imm(-1))
            )
        );
    }

    #[test]
    fn test_deref_cast_reinterpretation() {
        assert_eq!(eval("[cast(fp - 2, felt*)]").unwrap(), Reference::deref(CellRef::fp(-2)));
        assert_eq!(eval("[cast(ap, felt*)]").unwrap(), Reference::deref(CellRef::ap(0)));
        assert_eq!(
            eval("[cast([fp - 2], felt*)]").unwrap(),
            Reference::double_deref(CellRef::fp(-2), 0)
        );
        assert_eq!(
            eval("[cast([fp - 2] + 3, felt*)]").unwrap(),
            Reference::double_deref(CellRef::fp(-2), 3)
        );
        assert_eq!(
            eval("[cast([fp - 2] - 3, felt*)]").unwrap(),
            Reference::double_deref(CellRef::fp(-2), -3)
        );
    }

    #[test]
    fn test_deref_cast_rejections() {
        assert_eq!(eval("[cast(5, felt*)]"), Err(EvaluationError::UnexpectedDeref));
        assert_eq!(eval("[cast([[ap]], felt*)]"), Err(EvaluationError::UnexpectedDeref));
        assert_eq!(eval("[cast(2 * 3, felt*)]"), Err(EvaluationError::InvalidDerefBinaryOp));
        assert_eq!(eval("[cast([ap] * 3, felt*)]"), Err(EvaluationError::InvalidDerefBinaryOp));
        assert_eq!(eval("[cast([ap] + [fp], felt*)]"), Err(EvaluationError::InvalidDerefBinaryOp));
        assert_eq!(eval("[cast([ap] + 40000, felt*)]"), Err(EvaluationError::InvalidDerefBinaryOp));
        assert_eq!(eval("[cast(1 + [ap], felt*)]"), Err(EvaluationError::InvalidDerefBinaryOp));
    }
}
