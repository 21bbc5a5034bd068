//! PKCS#7 padding over 16-byte AES blocks, for the feedback modes.
//!
//! CBC pads through `cbc`'s own `Pkcs7` support; CFB and OFB run as
//! stream modes, so the final block is padded here with the same
//! `block_padding::Pkcs7`.

use cipher::block_padding::{Pkcs7, RawPadding};

use crate::error::{CryptError, CryptResult};

/// AES block size in bytes
pub const BLOCK_SIZE: usize = 16;

/// Pad to the next block boundary. Always adds 1..=16 bytes, so an
/// already aligned input gets a full extra block.
pub fn pad(data: &[u8]) -> Vec<u8> {
    let tail = data.len() % BLOCK_SIZE;
    let padded_len = data.len() - tail + BLOCK_SIZE;

    let mut padded = Vec::with_capacity(padded_len);
    padded.extend_from_slice(data);
    padded.resize(padded_len, 0);

    Pkcs7::raw_pad(&mut padded[padded_len - BLOCK_SIZE..], tail);
    padded
}

/// Validate and strip padding
pub fn unpad(mut data: Vec<u8>) -> CryptResult<Vec<u8>> {
    if data.is_empty() || data.len() % BLOCK_SIZE != 0 {
        return Err(CryptError::InvalidPadding);
    }

    let last = data.len() - BLOCK_SIZE;
    let kept = Pkcs7::raw_unpad(&data[last..])
        .map_err(|_| CryptError::InvalidPadding)?
        .len();

    data.truncate(last + kept);
    Ok(data)
}
