//! Segment allocation and scope hints

use crate::error::Result;
use crate::hinter::{GenericHinter, HintRunnerContext, Hinter};
use crate::operand::Operand;
use crate::scope::Scope;
use crate::vm::VirtualMachine;
use hintvm_core::{CellRef, HintCode};

/// Allocate a memory segment and store its base address in `dst`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocSegment {
    pub dst: CellRef,
}

impl Hinter for AllocSegment {
    fn name(&self) -> &str {
        HintCode::AllocSegment.name()
    }

    fn execute(&self, vm: &mut VirtualMachine, _ctx: &mut HintRunnerContext) -> Result<()> {
        let base = vm.memory.allocate_segment()?;
        let dst = self.dst.get_address(vm)?;
        vm.memory.write(dst, base)?;
        Ok(())
    }
}

/// Push an empty scope
pub fn vm_enter_scope() -> GenericHinter {
    GenericHinter::new(HintCode::VmEnterScope.name(), |_, ctx| {
        ctx.scope_manager.enter_scope(Scope::new());
        Ok(())
    })
}

/// Pop the top scope
pub fn vm_exit_scope() -> GenericHinter {
    GenericHinter::new(HintCode::VmExitScope.name(), |_, ctx| {
        Ok(ctx.scope_manager.exit_scope()?)
    })
}
