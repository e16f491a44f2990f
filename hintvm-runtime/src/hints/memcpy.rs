//! Memcpy loop hints
//!
//! The copy loop keeps its remaining length as the scope variable `n`.
//! `MemcpyEnterScope` seeds it and `MemcpyContinueCopying` counts it down,
//! writing the loop flag the program branches on.

use crate::hinter::GenericHinter;
use crate::operand::Operand;
use crate::scope::{Scope, ScopeValue};
use hintvm_core::{Felt, HintCode, Reference};
use tracing::trace;

/// Push a scope holding `n = len`
pub fn memcpy_enter_scope(len: Reference) -> GenericHinter {
    GenericHinter::new(HintCode::MemcpyEnterScope.name(), move |vm, ctx| {
        let len = len.resolve_as_felt(vm)?;
        ctx.scope_manager
            .enter_scope(Scope::from([("n".to_string(), ScopeValue::Felt(len))]));
        Ok(())
    })
}

/// Decrement `n` and write `1` to `output` once it is no longer positive
pub fn memcpy_continue_copying(output: Reference) -> GenericHinter {
    GenericHinter::new(HintCode::MemcpyContinueCopying.name(), move |vm, ctx| {
        let n = ctx.scope_manager.get_felt("n")? - Felt::one();
        let flag = if n.is_positive() { Felt::zero() } else { Felt::one() };
        trace!("memcpy n = {}, flag = {}", n, flag);
        ctx.scope_manager.assign_variable("n", n);

        let dst = output.get_address(vm)?;
        vm.memory.write(dst, flag)?;
        Ok(())
    })
}
