//! Hint dispatch contract
//!
//! Every hint has a name for diagnostics and one operation over the VM and
//! the run's [`HintRunnerContext`].

use crate::error::Result;
use crate::scope::ScopeManager;
use crate::vm::VirtualMachine;
use std::fmt;

/// Per-run state shared by all hints
#[derive(Debug, Clone, Default)]
pub struct HintRunnerContext {
    pub scope_manager: ScopeManager,
}

pub trait Hinter {
    fn name(&self) -> &str;

    fn execute(&self, vm: &mut VirtualMachine, ctx: &mut HintRunnerContext) -> Result<()>;
}

pub type HintOp = Box<dyn Fn(&mut VirtualMachine, &mut HintRunnerContext) -> Result<()>>;

/// A hint whose body is a closure
pub struct GenericHinter {
    name: String,
    op: HintOp,
}

impl GenericHinter {
    pub fn new<F>(name: impl Into<String>, op: F) -> Self
    where
        F: Fn(&mut VirtualMachine, &mut HintRunnerContext) -> Result<()> + 'static,
    {
        Self {
            name: name.into(),
            op: Box::new(op),
        }
    }
}

impl Hinter for GenericHinter {
    fn name(&self) -> &str {
        &self.name
    }

    fn execute(&self, vm: &mut VirtualMachine, ctx: &mut HintRunnerContext) -> Result<()> {
        (self.op)(vm, ctx)
    }
}

impl fmt::Debug for GenericHinter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenericHinter").field("name", &self.name).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vm::VMConfig;
    use hintvm_core::{Felt, Relocatable};

    #[test]
    fn test_generic_hinter_runs_closure() {
        let hinter = GenericHinter::new("WriteSeven", |vm, ctx| {
            ctx.scope_manager.assign_variable("seen", Felt::one());
            let ap = vm.ap();
            vm.memory.write(ap, 7u64)?;
            Ok(())
        });
        assert_eq!(hinter.name(), "WriteSeven");

        let mut vm = VirtualMachine::new(VMConfig::default()).unwrap();
        let mut ctx = HintRunnerContext::default();
        hinter.execute(&mut vm, &mut ctx).unwrap();

        assert_eq!(vm.memory.read_felt(Relocatable::new(1, 0)).unwrap(), Felt::from(7u64));
        assert_eq!(ctx.scope_manager.get_felt("seen").unwrap(), Felt::one());
        // Second run hits the write-once rule
        assert!(hinter.execute(&mut vm, &mut ctx).is_err());
    }

    #[test]
    fn test_debug_shows_name() {
        let hinter = GenericHinter::new("Noop", |_, _| Ok(()));
        assert!(format!("{hinter:?}").contains("Noop"));
    }
}
