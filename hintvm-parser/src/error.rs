//! Reference parsing errors

use thiserror::Error;

/// Well-formed reference that reduces to an invalid shape
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluationError {
    #[error("offset does not fit in int16")]
    OffsetOverflow,

    #[error("invalid arithmetic expression")]
    InvalidArithmetic,

    #[error("invalid binary operation inside a deref")]
    InvalidDerefBinaryOp,

    #[error("unexpected deref expression")]
    UnexpectedDeref,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReferenceError {
    #[error("Syntax error at position {position}: {message}")]
    Syntax { position: usize, message: String },

    #[error("Evaluation error: {0}")]
    Evaluation(#[from] EvaluationError),
}

pub type Result<T> = std::result::Result<T, ReferenceError>;
