//! # Hint runtime
//!
//! Execute hints against a segmented write-once memory.
//!
//! ## Features
//!
//! - **Memory**: independently growing segments, write-once cells holding
//!   field elements or addresses
//! - **Scopes**: a stack of variable maps shared by the hints of a run
//! - **Operands**: hint references resolved against `ap`, `fp` and memory
//! - **Hints**: segment allocation, scopes, memcpy loop, SHA-256 family
//!
//! ## Example
//!
//! ```rust
//! use hintvm_core::{Felt, HintCode, HintDescriptor, HintTable, Relocatable};
//! use hintvm_runtime::{HintRunner, VMConfig, VirtualMachine};
//!
//! let mut table = HintTable::new();
//! table.add(
//!     0,
//!     HintDescriptor::new(HintCode::MemcpyContinueCopying)
//!         .with_reference("output", "[cast(ap + (-1), felt*)]"),
//! );
//!
//! let mut vm = VirtualMachine::new(VMConfig::default()).unwrap();
//! vm.set_ap(Relocatable::new(1, 1));
//!
//! let mut runner = HintRunner::from_table(&table).unwrap();
//! runner.context_mut().scope_manager.assign_variable("n", Felt::from(1u64));
//! runner.run_hint(&mut vm, 0).unwrap();
//!
//! assert_eq!(vm.memory.read_felt(Relocatable::new(1, 0)).unwrap(), Felt::one());
//! ```

pub mod error;
pub mod memory;
pub mod vm;
pub mod scope;
pub mod operand;
pub mod resolver;
pub mod hinter;
pub mod crypto;
pub mod hints;
pub mod runner;

pub use error::{MemoryError, Result, RuntimeError, ScopeError};
pub use memory::Memory;
pub use vm::{Registers, VMConfig, VirtualMachine};
pub use scope::{Scope, ScopeManager, ScopeValue};
pub use operand::Operand;
pub use resolver::HintReferenceResolver;
pub use hinter::{GenericHinter, HintOp, HintRunnerContext, Hinter};
pub use hints::create_hinter;
pub use runner::HintRunner;
