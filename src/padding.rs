//! PKCS#5/PKCS#7 padding over the AES block.
//!
//! The block modes in [`crate::cipher`] only ever see whole blocks; this
//! module adds and removes the padding around them.

use anyhow::{Result, ensure};
use block_padding::array::Array;
use block_padding::array::typenum::{U16, Unsigned};
use block_padding::{PaddedData, Padding, Pkcs7};

use crate::config::BLOCK_SIZE;

type BlockLen = U16;

const _: () = assert!(BlockLen::USIZE == BLOCK_SIZE);

/// Pads `data` to a whole number of blocks. Aligned input gains a full
/// block of padding, so empty input yields exactly one block.
pub fn pad(data: &[u8]) -> Result<Vec<u8>> {
    match Pkcs7::pad_detached::<BlockLen>(data) {
        PaddedData::Pad { blocks, tail_block } => {
            let mut result = Vec::with_capacity((blocks.len() + 1) * BLOCK_SIZE);
            for block in blocks {
                result.extend_from_slice(block.as_slice());
            }
            result.extend_from_slice(tail_block.as_slice());
            Ok(result)
        }
        PaddedData::NoPad { blocks } => Ok(blocks.iter().flat_map(|block| block.iter().copied()).collect()),
        PaddedData::Error => anyhow::bail!("padding error"),
    }
}

/// Strips and validates the padding of block-aligned `data`.
pub fn unpad(data: &[u8]) -> Result<Vec<u8>> {
    ensure!(!data.is_empty() && data.len().is_multiple_of(BLOCK_SIZE), "invalid padded data length: {}", data.len());

    let blocks: Vec<Array<u8, BlockLen>> = data
        .chunks_exact(BLOCK_SIZE)
        .map(|chunk| {
            let mut block = Array::default();
            block.copy_from_slice(chunk);
            block
        })
        .collect();

    Ok(Pkcs7::unpad_blocks::<BlockLen>(&blocks).map_err(|_| anyhow::anyhow!("bad padding"))?.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_empty_is_one_block() {
        let padded = pad(b"").unwrap();
        assert_eq!(padded, vec![16u8; 16]);
    }

    #[test]
    fn test_pad_aligned_adds_full_block() {
        let padded = pad(&[7u8; 16]).unwrap();
        assert_eq!(padded.len(), 32);
        assert!(padded[16..].iter().all(|&b| b == 16));
    }

    #[test]
    fn test_pad_partial_block() {
        let padded = pad(b"hello").unwrap();
        assert_eq!(padded.len(), 16);
        assert_eq!(&padded[..5], b"hello");
        assert!(padded[5..].iter().all(|&b| b == 11));
        assert_eq!(unpad(&padded).unwrap(), b"hello");
    }

    #[test]
    fn test_unpad_rejects_misaligned() {
        assert!(unpad(&[1u8; 15]).is_err());
        assert!(unpad(&[]).is_err());
    }

    #[test]
    fn test_unpad_rejects_bad_padding() {
        let mut block = [0u8; 16];
        block[15] = 0x20;
        assert!(unpad(&block).is_err());
    }
}
