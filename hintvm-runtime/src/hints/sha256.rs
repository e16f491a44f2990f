//! # SHA-256 hints
//!
//! Message blocks and states live in memory as field elements holding one
//! 32-bit word each. Operands name cells that store pointers to those
//! windows.

use crate::crypto::{sha256_compress, SHA256_IV};
use crate::error::{Result, RuntimeError};
use crate::hinter::GenericHinter;
use crate::operand::Operand;
use crate::vm::VirtualMachine;
use hintvm_core::{Felt, HintCode, Reference, Relocatable};
use tracing::trace;

/// Words in one message block
pub const SHA256_INPUT_CHUNK_SIZE_FELTS: usize = 16;

/// Words in the hash state
pub const SHA256_STATE_SIZE_FELTS: usize = 8;

/// Number of hash instances packed per batch
pub const BLOCK_SIZE: usize = 7;

/// Read `N` consecutive 32-bit words starting at `start`
fn read_words<const N: usize>(vm: &VirtualMachine, start: Relocatable) -> Result<[u32; N]> {
    let mut words = [0u32; N];
    let mut address = start;
    for word in &mut words {
        let value = vm.memory.read_felt(address)?;
        *word = value.to_u32().ok_or_else(|| RuntimeError::WordOutOfRange {
            address,
            value: value.to_string(),
        })?;
        address = address.add_usize(1)?;
    }
    Ok(words)
}

fn write_words(vm: &mut VirtualMachine, start: Relocatable, words: &[u32]) -> Result<()> {
    trace!("writing {} words at {}", words.len(), start);
    vm.memory
        .write_range(start, words.iter().map(|&word| Felt::from(word)))?;
    Ok(())
}

/// Compress the block at `[sha256_start]` from the standard IV into `[output]`
pub fn packed_sha256(sha256_start: Reference, output: Reference) -> GenericHinter {
    GenericHinter::new(HintCode::PackedSha256.name(), move |vm, _| {
        let input = sha256_start.resolve_as_address(vm)?;
        let block = read_words::<SHA256_INPUT_CHUNK_SIZE_FELTS>(vm, input)?;
        let state = sha256_compress(&SHA256_IV, &block);

        let dst = output.resolve_as_address(vm)?;
        write_words(vm, dst, &state)
    })
}

/// Compress the block at `[sha256_start]` from the state at `[state]` into `[output]`
pub fn sha256_chunk(sha256_start: Reference, state: Reference, output: Reference) -> GenericHinter {
    GenericHinter::new(HintCode::Sha256Chunk.name(), move |vm, _| {
        let input = sha256_start.resolve_as_address(vm)?;
        let block = read_words::<SHA256_INPUT_CHUNK_SIZE_FELTS>(vm, input)?;
        let initial = read_words::<SHA256_STATE_SIZE_FELTS>(vm, state.resolve_as_address(vm)?)?;
        let result = sha256_compress(&initial, &block);

        let dst = output.resolve_as_address(vm)?;
        write_words(vm, dst, &result)
    })
}

/// One padding instance: a zero block, the IV and the IV compressed over the zero block
pub fn finalize_padding() -> Vec<u32> {
    let zero_block = [0u32; SHA256_INPUT_CHUNK_SIZE_FELTS];
    let mut instance = Vec::with_capacity(SHA256_INPUT_CHUNK_SIZE_FELTS + 2 * SHA256_STATE_SIZE_FELTS);
    instance.extend_from_slice(&zero_block);
    instance.extend_from_slice(&SHA256_IV);
    instance.extend_from_slice(&sha256_compress(&SHA256_IV, &zero_block));

    instance.repeat(BLOCK_SIZE - 1)
}

/// Fill the rest of the batch at `[sha256_ptr_end]` with dummy instances
pub fn finalize_sha256(sha256_ptr_end: Reference) -> GenericHinter {
    GenericHinter::new(HintCode::FinalizeSha256.name(), move |vm, _| {
        let dst = sha256_ptr_end.resolve_as_address(vm)?;
        write_words(vm, dst, &finalize_padding())
    })
}
