//! Whole-buffer AES in ECB and CBC mode.
//!
//! Inputs must already be block aligned; padding is handled by the caller.

use aes::cipher::{Block, BlockCipher, BlockDecrypt, BlockDecryptMut, BlockEncrypt, BlockEncryptMut, BlockSizeUser, KeyInit, KeyIvInit};
use aes::{Aes128, Aes192, Aes256};
use anyhow::{Result, anyhow, bail};

use super::transformation::Mode;
use crate::types::ProcessorMode;

/// Runs AES over `data`, choosing the key schedule from the key length.
pub fn apply(mode: Mode, direction: ProcessorMode, key: &[u8], iv: Option<&[u8]>, data: &[u8]) -> Result<Vec<u8>> {
    match key.len() {
        16 => apply_with::<Aes128>(mode, direction, key, iv, data),
        24 => apply_with::<Aes192>(mode, direction, key, iv, data),
        32 => apply_with::<Aes256>(mode, direction, key, iv, data),
        n => bail!("invalid AES key length: {n} bytes"),
    }
}

/// Whether `len` bytes form a key the block cipher accepts.
#[inline]
pub fn is_valid_key_length(len: usize) -> bool {
    matches!(len, 16 | 24 | 32)
}

fn apply_with<C>(mode: Mode, direction: ProcessorMode, key: &[u8], iv: Option<&[u8]>, data: &[u8]) -> Result<Vec<u8>>
where
    C: BlockCipher + BlockEncrypt + BlockDecrypt + KeyInit,
{
    if !data.len().is_multiple_of(C::block_size()) {
        bail!("input length {} not a multiple of the {}-byte block", data.len(), C::block_size());
    }

    match (mode, direction) {
        (Mode::Ecb, ProcessorMode::Encrypt) => {
            let cipher = C::new_from_slice(key).map_err(|_| anyhow!("invalid key length: {}", key.len()))?;
            let mut blocks = to_blocks::<C>(data);
            cipher.encrypt_blocks(&mut blocks);
            Ok(from_blocks::<C>(&blocks))
        }
        (Mode::Ecb, ProcessorMode::Decrypt) => {
            let cipher = C::new_from_slice(key).map_err(|_| anyhow!("invalid key length: {}", key.len()))?;
            let mut blocks = to_blocks::<C>(data);
            cipher.decrypt_blocks(&mut blocks);
            Ok(from_blocks::<C>(&blocks))
        }
        (Mode::Cbc, ProcessorMode::Encrypt) => {
            let iv = iv.ok_or_else(|| anyhow!("CBC mode requires an IV"))?;
            let mut cipher = cbc::Encryptor::<C>::new_from_slices(key, iv).map_err(|_| anyhow!("invalid key or IV length"))?;
            let mut blocks = to_blocks::<cbc::Encryptor<C>>(data);
            cipher.encrypt_blocks_mut(&mut blocks);
            Ok(from_blocks::<cbc::Encryptor<C>>(&blocks))
        }
        (Mode::Cbc, ProcessorMode::Decrypt) => {
            let iv = iv.ok_or_else(|| anyhow!("CBC mode requires an IV"))?;
            let mut cipher = cbc::Decryptor::<C>::new_from_slices(key, iv).map_err(|_| anyhow!("invalid key or IV length"))?;
            let mut blocks = to_blocks::<cbc::Decryptor<C>>(data);
            cipher.decrypt_blocks_mut(&mut blocks);
            Ok(from_blocks::<cbc::Decryptor<C>>(&blocks))
        }
    }
}

fn to_blocks<B: BlockSizeUser>(data: &[u8]) -> Vec<Block<B>> {
    data.chunks_exact(B::block_size()).map(Block::<B>::clone_from_slice).collect()
}

fn from_blocks<B: BlockSizeUser>(blocks: &[Block<B>]) -> Vec<u8> {
    blocks.iter().flat_map(|block| block.iter().copied()).collect()
}
