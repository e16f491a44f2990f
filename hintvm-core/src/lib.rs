//! # hintvm core types
//!
//! Value domain shared by the reference parser and the hint runtime.
//!
//! ## Key Features
//! - STARK field element (p = 2^251 + 17·2^192 + 1)
//! - Two addressable registers: `ap` and `fp`
//! - Segmented addresses (`segment:offset`) and tagged memory values
//! - Memory references produced by the hint-reference language
//! - Serialisable hint table binding hints to program counters

pub mod field;
pub mod register;
pub mod relocatable;
pub mod reference;
pub mod hint_table;
pub mod error;

pub use field::{Felt, STARK_PRIME_DEC};
pub use register::Register;
pub use relocatable::{MemoryValue, Relocatable};
pub use reference::{BinaryOp, CellRef, Deref, DoubleDeref, Operator, Reference};
pub use hint_table::{HintCode, HintDescriptor, HintTable};
pub use error::{CoreError, Result};

/// Index of the segment holding the program
pub const PROGRAM_SEGMENT: usize = 0;

/// Index of the segment `ap` and `fp` point into at start-up
pub const EXECUTION_SEGMENT: usize = 1;
