//! Operand name lookup for hint construction
//!
//! The compiler names hint operands by their fully qualified path
//! (`starkware.cairo.common.memcpy.memcpy.n`) while hint bodies ask for the
//! short name (`n`). Lookup tries the exact name first and then a unique
//! dotted suffix.

use crate::error::{Result, RuntimeError};
use hintvm_core::{CellRef, Reference};
use hintvm_parser::parse_reference;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct HintReferenceResolver {
    references: BTreeMap<String, Reference>,
}

impl HintReferenceResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_reference(&mut self, name: impl Into<String>, reference: Reference) -> Result<()> {
        let name = name.into();
        if self.references.contains_key(&name) {
            return Err(RuntimeError::DuplicateOperand(name));
        }
        self.references.insert(name, reference);
        Ok(())
    }

    /// Parse `text` and register it under `name`
    pub fn add_reference_text(&mut self, name: impl Into<String>, text: &str) -> Result<()> {
        let reference = parse_reference(text)?;
        self.add_reference(name, reference)
    }

    pub fn get_reference(&self, name: &str) -> Result<&Reference> {
        if let Some(reference) = self.references.get(name) {
            return Ok(reference);
        }

        let suffix = format!(".{name}");
        let mut matches = self
            .references
            .iter()
            .filter(|(full_name, _)| full_name.ends_with(&suffix));

        match (matches.next(), matches.next()) {
            (Some((_, reference)), None) => Ok(reference),
            (None, _) => Err(RuntimeError::UnknownOperand(name.to_string())),
            (Some(_), Some(_)) => Err(RuntimeError::AmbiguousOperand {
                name: name.to_string(),
                candidates: self
                    .references
                    .keys()
                    .filter(|full_name| full_name.ends_with(&suffix))
                    .cloned()
                    .collect(),
            }),
        }
    }

    /// Operand that resolves to a value; bare register cells are rejected
    pub fn get_res_operand(&self, name: &str) -> Result<Reference> {
        let reference = self.get_reference(name)?;
        if reference.is_cell_like() {
            return Err(RuntimeError::InvalidOperand {
                name: name.to_string(),
                reason: "expected a resolvable operand, found a bare register cell",
            });
        }
        Ok(reference.clone())
    }

    /// Operand that must be a bare register cell
    pub fn get_cell_ref(&self, name: &str) -> Result<CellRef> {
        self.get_reference(name)?
            .as_cell_ref()
            .ok_or_else(|| RuntimeError::InvalidOperand {
                name: name.to_string(),
                reason: "expected a register cell",
            })
    }

    pub fn len(&self) -> usize {
        self.references.len()
    }

    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }
}
