//! Hint reference parser
//!
//! Compile textual hint references into [`Reference`] values.
//!
//! ## Example
//!
//! ```rust
//! use hintvm_core::{CellRef, Reference};
//! use hintvm_parser::parse_reference;
//!
//! let reference = parse_reference("[cast(fp + (-3), felt*)]").unwrap();
//! assert_eq!(reference, Reference::deref(CellRef::fp(-3)));
//! ```

pub mod error;
pub mod lexer;
pub mod ast;
pub mod parser;
pub mod evaluator;

pub use ast::{IdentifierExp, TypeName};
pub use error::{EvaluationError, ReferenceError, Result};
pub use parser::parse;

use hintvm_core::Reference;

/// Parse and evaluate a hint reference
pub fn parse_reference(text: &str) -> Result<Reference> {
    Ok(parse(text)?.evaluate()?)
}

/// Like [`parse_reference`], also returning the declared cast type
pub fn parse_typed_reference(text: &str) -> Result<(Reference, TypeName)> {
    let exp = parse(text)?;
    let reference = exp.evaluate()?;
    Ok((reference, exp.cast().cast_type.clone()))
}
