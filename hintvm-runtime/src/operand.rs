//! Operand resolution
//!
//! Turns [`CellRef`] and [`Reference`] values into concrete addresses and
//! memory values against the current VM registers and memory.

use crate::error::{Result, RuntimeError};
use crate::vm::VirtualMachine;
use hintvm_core::{CellRef, Felt, MemoryValue, Operator, Reference, Relocatable};

/// Something a hint can read from or write to
pub trait Operand {
    /// Address of the cell this operand names
    fn get_address(&self, vm: &VirtualMachine) -> Result<Relocatable>;

    /// Value this operand denotes
    fn resolve(&self, vm: &VirtualMachine) -> Result<MemoryValue>;

    fn resolve_as_felt(&self, vm: &VirtualMachine) -> Result<Felt> {
        let value = self.resolve(vm)?;
        Ok(value.as_felt()?.clone())
    }

    fn resolve_as_address(&self, vm: &VirtualMachine) -> Result<Relocatable> {
        Ok(self.resolve(vm)?.as_address()?)
    }
}

impl Operand for CellRef {
    fn get_address(&self, vm: &VirtualMachine) -> Result<Relocatable> {
        vm.cell_address(*self)
    }

    /// A bare cell denotes its own address
    fn resolve(&self, vm: &VirtualMachine) -> Result<MemoryValue> {
        self.get_address(vm).map(MemoryValue::Address)
    }
}

impl Operand for Reference {
    fn get_address(&self, vm: &VirtualMachine) -> Result<Relocatable> {
        match self {
            Reference::ApCellRef(offset) => CellRef::ap(*offset).get_address(vm),
            Reference::FpCellRef(offset) => CellRef::fp(*offset).get_address(vm),
            Reference::Deref(deref) => deref.cell.get_address(vm),
            Reference::DoubleDeref(dderef) => {
                let pointer = vm.memory.read_address(dderef.deref.cell.get_address(vm)?)?;
                Ok(pointer.offset_by(dderef.offset.into())?)
            }
            Reference::Immediate(_) | Reference::BinaryOp(_) => Err(RuntimeError::Unresolvable {
                reference: self.to_string(),
                reason: "does not name a memory cell",
            }),
        }
    }

    fn resolve(&self, vm: &VirtualMachine) -> Result<MemoryValue> {
        match self {
            Reference::ApCellRef(_) | Reference::FpCellRef(_) => {
                self.get_address(vm).map(MemoryValue::Address)
            }
            Reference::Deref(_) | Reference::DoubleDeref(_) => {
                Ok(vm.memory.read(self.get_address(vm)?)?)
            }
            Reference::Immediate(value) => Ok(MemoryValue::Felt(value.clone())),
            Reference::BinaryOp(op) => {
                let lhs = op.lhs.resolve(vm)?;
                let rhs = op.rhs.resolve(vm)?;
                match (op.operator, lhs, rhs) {
                    (Operator::Add, MemoryValue::Felt(lhs), MemoryValue::Felt(rhs)) => {
                        Ok(MemoryValue::Felt(lhs + rhs))
                    }
                    (Operator::Add, MemoryValue::Address(lhs), MemoryValue::Felt(rhs)) => {
                        Ok(MemoryValue::Address(lhs.add_felt(&rhs)?))
                    }
                    (Operator::Mul, MemoryValue::Felt(lhs), MemoryValue::Felt(rhs)) => {
                        Ok(MemoryValue::Felt(lhs * rhs))
                    }
                    _ => Err(RuntimeError::Unresolvable {
                        reference: self.to_string(),
                        reason: "unsupported operand types",
                    }),
                }
            }
        }
    }
}
