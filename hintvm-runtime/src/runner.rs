//! Hint runner
//!
//! Owns the hints of a program, keyed by program counter, and the context they
//! share. Hints at one pc run in order; the first failure stops the run and is
//! reported with the hint's name. Writes made before the failure are kept.

use crate::error::Result;
use crate::hinter::{HintRunnerContext, Hinter};
use crate::hints::create_hinter;
use crate::resolver::HintReferenceResolver;
use crate::vm::VirtualMachine;
use hintvm_core::HintTable;
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Default)]
pub struct HintRunner {
    hints: BTreeMap<u64, Vec<Box<dyn Hinter>>>,
    context: HintRunnerContext,
    /// Executed hints as (pc, name), recorded when the VM traces
    history: Vec<(u64, String)>,
}

impl HintRunner {
    pub fn new(hints: BTreeMap<u64, Vec<Box<dyn Hinter>>>) -> Self {
        Self {
            hints,
            ..Self::default()
        }
    }

    /// Parse every reference and build every hint of `table` up front
    pub fn from_table(table: &HintTable) -> Result<Self> {
        let mut hints: BTreeMap<u64, Vec<Box<dyn Hinter>>> = BTreeMap::new();
        for (&pc, descriptors) in &table.hints {
            for descriptor in descriptors {
                let name = descriptor.code.name();
                let mut resolver = HintReferenceResolver::new();
                for (operand, text) in &descriptor.references {
                    resolver
                        .add_reference_text(operand.as_str(), text)
                        .map_err(|err| err.in_hint(name))?;
                }
                let hinter =
                    create_hinter(descriptor.code, &resolver).map_err(|err| err.in_hint(name))?;
                hints.entry(pc).or_default().push(hinter);
            }
        }
        debug!("loaded {} hints", table.len());
        Ok(Self::new(hints))
    }

    /// Run the hints bound to `pc`; no hints is not an error
    pub fn run_hint(&mut self, vm: &mut VirtualMachine, pc: u64) -> Result<()> {
        let Some(hints) = self.hints.get(&pc) else {
            return Ok(());
        };

        for hint in hints {
            debug!("running hint {} at pc {}", hint.name(), pc);
            if vm.config.trace {
                self.history.push((pc, hint.name().to_string()));
            }
            hint.execute(vm, &mut self.context)
                .map_err(|err| err.in_hint(hint.name()))?;
        }
        Ok(())
    }

    pub fn has_hints(&self, pc: u64) -> bool {
        self.hints.contains_key(&pc)
    }

    /// Total number of hints across all program counters
    pub fn hint_count(&self) -> usize {
        self.hints.values().map(Vec::len).sum()
    }

    pub fn context(&self) -> &HintRunnerContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut HintRunnerContext {
        &mut self.context
    }

    pub fn history(&self) -> &[(u64, String)] {
        &self.history
    }
}
