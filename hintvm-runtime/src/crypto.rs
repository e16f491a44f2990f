//! SHA-256 block compression over 32-bit words
//!
//! Hints see SHA-256 state and message blocks as arrays of field elements,
//! one big-endian 32-bit word per element.

use sha2::digest::generic_array::GenericArray;

/// SHA-256 initial hash values
pub const SHA256_IV: [u32; 8] = [
    0x6a09e667, 0xbb67ae85, 0x3c6ef372, 0xa54ff53a,
    0x510e527f, 0x9b05688c, 0x1f83d9ab, 0x5be0cd19,
];

/// Run the compression function on one 16-word block
pub fn sha256_compress(state: &[u32; 8], block: &[u32; 16]) -> [u32; 8] {
    let mut bytes = [0u8; 64];
    for (chunk, word) in bytes.chunks_exact_mut(4).zip(block) {
        chunk.copy_from_slice(&word.to_be_bytes());
    }

    let mut state = *state;
    sha2::compress256(&mut state, &[GenericArray::clone_from_slice(&bytes)]);
    state
}
