//! Hint bodies and their construction from a hint code
//!
//! | code                    | operands                            |
//! |-------------------------|-------------------------------------|
//! | `AllocSegment`          | none, writes to `ap[0]`             |
//! | `VMEnterScope`          | none                                |
//! | `VMExitScope`           | none                                |
//! | `MemcpyEnterScope`      | `len`                               |
//! | `MemcpyContinueCopying` | `output` (counter `n` is in scope)  |
//! | `PackedSha256`          | `sha256_start`, `output`            |
//! | `Sha256Chunk`           | `sha256_start`, `state`, `output`   |
//! | `FinalizeSha256`        | `sha256_ptr_end`                    |

pub mod core;
pub mod memcpy;
pub mod sha256;

use crate::error::Result;
use crate::hinter::Hinter;
use crate::resolver::HintReferenceResolver;
use hintvm_core::{CellRef, HintCode};

pub use self::core::{vm_enter_scope, vm_exit_scope, AllocSegment};
pub use memcpy::{memcpy_continue_copying, memcpy_enter_scope};
pub use sha256::{finalize_sha256, packed_sha256, sha256_chunk};

/// Build the hint for `code`, looking up its operands in `resolver`
pub fn create_hinter(code: HintCode, resolver: &HintReferenceResolver) -> Result<Box<dyn Hinter>> {
    let hinter: Box<dyn Hinter> = match code {
        HintCode::AllocSegment => Box::new(AllocSegment { dst: CellRef::ap(0) }),
        HintCode::VmEnterScope => Box::new(vm_enter_scope()),
        HintCode::VmExitScope => Box::new(vm_exit_scope()),
        HintCode::MemcpyEnterScope => Box::new(memcpy_enter_scope(resolver.get_res_operand("len")?)),
        HintCode::MemcpyContinueCopying => {
            Box::new(memcpy_continue_copying(resolver.get_res_operand("output")?))
        }
        HintCode::PackedSha256 => Box::new(packed_sha256(
            resolver.get_res_operand("sha256_start")?,
            resolver.get_res_operand("output")?,
        )),
        HintCode::Sha256Chunk => Box::new(sha256_chunk(
            resolver.get_res_operand("sha256_start")?,
            resolver.get_res_operand("state")?,
            resolver.get_res_operand("output")?,
        )),
        HintCode::FinalizeSha256 => {
            Box::new(finalize_sha256(resolver.get_res_operand("sha256_ptr_end")?))
        }
    };
    Ok(hinter)
}
