//! # Scope manager
//!
//! A stack of variable maps shared by the hints of one run. Only the top scope
//! is visible: lookups never fall through to enclosing scopes. The root scope
//! exists from the start and can never be exited.

use crate::error::ScopeError;
use hintvm_core::{Felt, Relocatable};
use num_bigint::BigInt;
use std::collections::HashMap;
use tracing::debug;

type Result<T> = std::result::Result<T, ScopeError>;

/// Value held by a scope variable
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeValue {
    Felt(Felt),
    Address(Relocatable),
    Int(BigInt),
    Felts(Vec<Felt>),
}

impl From<Felt> for ScopeValue {
    fn from(value: Felt) -> Self {
        Self::Felt(value)
    }
}

impl From<Relocatable> for ScopeValue {
    fn from(value: Relocatable) -> Self {
        Self::Address(value)
    }
}

impl From<BigInt> for ScopeValue {
    fn from(value: BigInt) -> Self {
        Self::Int(value)
    }
}

impl From<Vec<Felt>> for ScopeValue {
    fn from(value: Vec<Felt>) -> Self {
        Self::Felts(value)
    }
}

pub type Scope = HashMap<String, ScopeValue>;

#[derive(Debug, Clone)]
pub struct ScopeManager {
    scopes: Vec<Scope>,
}

impl Default for ScopeManager {
    fn default() -> Self {
        Self {
            scopes: vec![Scope::new()],
        }
    }
}

impl ScopeManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a scope seeded with `initial`
    pub fn enter_scope(&mut self, initial: Scope) {
        self.scopes.push(initial);
        debug!("entered scope, depth {}", self.scopes.len());
    }

    /// Pop the top scope; the root scope stays
    pub fn exit_scope(&mut self) -> Result<()> {
        if self.scopes.len() <= 1 {
            return Err(ScopeError::CannotExitLastScope);
        }
        self.scopes.pop();
        debug!("exited scope, depth {}", self.scopes.len());
        Ok(())
    }

    /// Number of scopes on the stack, root included
    #[inline]
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn get_variable_value(&self, name: &str) -> Result<&ScopeValue> {
        self.top()
            .and_then(|scope| scope.get(name))
            .ok_or_else(|| ScopeError::VariableNotFound(name.to_string()))
    }

    /// Insert or overwrite `name` in the top scope
    pub fn assign_variable(&mut self, name: impl Into<String>, value: impl Into<ScopeValue>) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.into(), value.into());
        }
    }

    /// Read a variable as a field element; integers are reduced into the field
    pub fn get_felt(&self, name: &str) -> Result<Felt> {
        match self.get_variable_value(name)? {
            ScopeValue::Felt(value) => Ok(value.clone()),
            ScopeValue::Int(value) => Ok(Felt::from_bigint(value)),
            _ => Err(ScopeError::UnexpectedType {
                name: name.to_string(),
                expected: "a field element",
            }),
        }
    }

    pub fn get_address(&self, name: &str) -> Result<Relocatable> {
        match self.get_variable_value(name)? {
            ScopeValue::Address(address) => Ok(*address),
            _ => Err(ScopeError::UnexpectedType {
                name: name.to_string(),
                expected: "an address",
            }),
        }
    }

    fn top(&self) -> Option<&Scope> {
        self.scopes.last()
    }
}
