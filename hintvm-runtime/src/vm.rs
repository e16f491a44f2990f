//! Virtual machine state seen by hints
//!
//! Hints only need the memory and the three registers; instruction execution
//! lives outside this crate.

use crate::error::Result;
use crate::memory::Memory;
use hintvm_core::{CellRef, Register, Relocatable, EXECUTION_SEGMENT, PROGRAM_SEGMENT};

/// VM configuration
#[derive(Debug, Clone)]
pub struct VMConfig {
    /// Maximum number of memory segments, including program and execution
    pub max_segments: usize,

    /// Record every executed hint in the runner history
    pub trace: bool,
}

impl Default for VMConfig {
    fn default() -> Self {
        Self {
            max_segments: 65536,
            trace: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registers {
    pub pc: Relocatable,
    pub ap: Relocatable,
    pub fp: Relocatable,
}

#[derive(Debug, Clone)]
pub struct VirtualMachine {
    pub memory: Memory,
    pub registers: Registers,
    pub config: VMConfig,
}

impl VirtualMachine {
    /// Create a VM with the program and execution segments allocated
    ///
    /// `pc` starts at the program base, `ap` and `fp` at the execution base.
    pub fn new(config: VMConfig) -> Result<Self> {
        let mut memory = Memory::new(config.max_segments);
        let program = memory.allocate_segment()?;
        let execution = memory.allocate_segment()?;
        debug_assert_eq!(program.segment_index, PROGRAM_SEGMENT);
        debug_assert_eq!(execution.segment_index, EXECUTION_SEGMENT);

        Ok(Self {
            memory,
            registers: Registers {
                pc: program,
                ap: execution,
                fp: execution,
            },
            config,
        })
    }

    #[inline]
    pub fn pc(&self) -> Relocatable {
        self.registers.pc
    }

    #[inline]
    pub fn ap(&self) -> Relocatable {
        self.registers.ap
    }

    #[inline]
    pub fn fp(&self) -> Relocatable {
        self.registers.fp
    }

    pub fn set_pc(&mut self, pc: Relocatable) {
        self.registers.pc = pc;
    }

    pub fn set_ap(&mut self, ap: Relocatable) {
        self.registers.ap = ap;
    }

    pub fn set_fp(&mut self, fp: Relocatable) {
        self.registers.fp = fp;
    }

    pub fn register(&self, register: Register) -> Relocatable {
        match register {
            Register::Ap => self.registers.ap,
            Register::Fp => self.registers.fp,
        }
    }

    /// Address named by a register cell
    pub fn cell_address(&self, cell: CellRef) -> Result<Relocatable> {
        Ok(self.register(cell.register).offset_by(cell.offset.into())?)
    }
}
