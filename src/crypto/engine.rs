//! ALFA Image Crypt - Cipher Engine
//!
//! AES (128/192/256, chosen by key length) under CBC, CFB, OFB or CTR.
//! Output is an [`EncryptedRecord`]: a fresh random IV/nonce followed by
//! the raw ciphertext. There is no authentication tag; PKCS#7 padding is
//! the only check that decryption went right, and CTR has none at all.

use aes::{Aes128, Aes192, Aes256};
use cipher::{
    block_padding::Pkcs7, consts::U16, AsyncStreamCipher, BlockCipher, BlockDecryptMut,
    BlockEncryptMut, BlockSizeUser, KeyInit, KeyIvInit, StreamCipher,
};
use rand::RngCore;

use super::keys::{KeyMaterial, KeySize};
use super::modes::CipherMode;
use super::padding::{self, BLOCK_SIZE};
use super::record::{EncryptedRecord, IV_LEN};
use crate::error::{CryptError, CryptResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Encrypt,
    Decrypt,
}

impl Direction {
    fn failure(self, reason: impl Into<String>) -> CryptError {
        match self {
            Direction::Encrypt => CryptError::EncryptionFailed(reason.into()),
            Direction::Decrypt => CryptError::DecryptionFailed(reason.into()),
        }
    }
}

/// Generate a random IV / nonce. Never reuse one under the same key.
pub fn generate_iv() -> [u8; IV_LEN] {
    let mut iv = [0u8; IV_LEN];
    rand::thread_rng().fill_bytes(&mut iv);
    iv
}

/// Key + mode, ready to encrypt or decrypt buffers
#[derive(Debug)]
pub struct CipherEngine {
    key: KeyMaterial,
    mode: CipherMode,
}

impl CipherEngine {
    pub fn new(key: KeyMaterial, mode: CipherMode) -> Self {
        Self { key, mode }
    }

    /// Build from a mode tag such as `"CBC"`
    pub fn from_mode_name(key: KeyMaterial, mode: &str) -> CryptResult<Self> {
        Ok(Self::new(key, mode.parse()?))
    }

    pub fn mode(&self) -> CipherMode {
        self.mode
    }

    pub fn key(&self) -> &KeyMaterial {
        &self.key
    }

    /// Encrypt under a fresh IV/nonce.
    ///
    /// Returns the record to store and the raw IV for display.
    pub fn encrypt(&self, plaintext: &[u8]) -> CryptResult<(EncryptedRecord, [u8; IV_LEN])> {
        let iv = generate_iv();
        let ciphertext = self.apply(Direction::Encrypt, &iv, plaintext)?;

        log::debug!(
            "Encrypted {} bytes with AES-{}-{} ({} bytes ciphertext)",
            plaintext.len(),
            self.key.size().bits(),
            self.mode,
            ciphertext.len()
        );

        Ok((EncryptedRecord::new(iv, ciphertext), iv))
    }

    /// Decrypt a record produced by [`CipherEngine::encrypt`] with the same key and mode
    pub fn decrypt(&self, record: &EncryptedRecord) -> CryptResult<Vec<u8>> {
        let plaintext = self.apply(Direction::Decrypt, record.iv(), record.ciphertext())?;

        log::debug!(
            "Decrypted {} bytes with AES-{}-{}",
            plaintext.len(),
            self.key.size().bits(),
            self.mode
        );

        Ok(plaintext)
    }

    /// Decrypt raw file contents (iv || ciphertext)
    pub fn decrypt_bytes(&self, data: &[u8]) -> CryptResult<Vec<u8>> {
        let record = EncryptedRecord::from_bytes(data)?;
        self.decrypt(&record)
    }

    fn apply(&self, direction: Direction, iv: &[u8; IV_LEN], data: &[u8]) -> CryptResult<Vec<u8>> {
        let key = self.key.expose();
        match self.key.size() {
            KeySize::Aes128 => apply_mode::<Aes128>(self.mode, direction, key, iv, data),
            KeySize::Aes192 => apply_mode::<Aes192>(self.mode, direction, key, iv, data),
            KeySize::Aes256 => apply_mode::<Aes256>(self.mode, direction, key, iv, data),
        }
    }
}

fn pad_if_required(mode: CipherMode, data: &[u8]) -> Vec<u8> {
    if mode.requires_padding() {
        padding::pad(data)
    } else {
        data.to_vec()
    }
}

fn unpad_if_required(mode: CipherMode, data: Vec<u8>) -> CryptResult<Vec<u8>> {
    if mode.requires_padding() {
        padding::unpad(data)
    } else {
        Ok(data)
    }
}

/// Run one mode over `data`, padding on the way in and unpadding on the way out
fn apply_mode<C>(
    mode: CipherMode,
    direction: Direction,
    key: &[u8],
    iv: &[u8; IV_LEN],
    data: &[u8],
) -> CryptResult<Vec<u8>>
where
    C: BlockCipher + BlockSizeUser<BlockSize = U16> + BlockEncryptMut + BlockDecryptMut + KeyInit,
{
    let init_failed = |e: cipher::InvalidLength| direction.failure(e.to_string());

    match (mode, direction) {
        // cbc pads natively
        (CipherMode::Cbc, Direction::Encrypt) => Ok(cbc::Encryptor::<C>::new_from_slices(key, iv)
            .map_err(init_failed)?
            .encrypt_padded_vec_mut::<Pkcs7>(data)),
        (CipherMode::Cbc, Direction::Decrypt) => {
            let len = data.len();
            if len % BLOCK_SIZE != 0 {
                return Err(CryptError::CiphertextNotAligned { len });
            }

            let mut buf = data.to_vec();
            let kept = cbc::Decryptor::<C>::new_from_slices(key, iv)
                .map_err(init_failed)?
                .decrypt_padded_mut::<Pkcs7>(&mut buf)
                .map_err(|_| CryptError::InvalidPadding)?
                .len();
            buf.truncate(kept);
            Ok(buf)
        }
        (CipherMode::Cfb, Direction::Encrypt) => {
            let mut buf = pad_if_required(mode, data);
            cfb_mode::Encryptor::<C>::new_from_slices(key, iv)
                .map_err(init_failed)?
                .encrypt(&mut buf);
            Ok(buf)
        }
        (CipherMode::Cfb, Direction::Decrypt) => {
            let mut buf = data.to_vec();
            cfb_mode::Decryptor::<C>::new_from_slices(key, iv)
                .map_err(init_failed)?
                .decrypt(&mut buf);
            unpad_if_required(mode, buf)
        }
        // OFB and CTR are symmetric keystreams
        (CipherMode::Ofb, _) => {
            let cipher = ofb::Ofb::<C>::new_from_slices(key, iv).map_err(init_failed)?;
            run_keystream(mode, direction, cipher, data)
        }
        (CipherMode::Ctr, _) => {
            let cipher = ctr::Ctr128BE::<C>::new_from_slices(key, iv).map_err(init_failed)?;
            run_keystream(mode, direction, cipher, data)
        }
    }
}

fn run_keystream<S: StreamCipher>(
    mode: CipherMode,
    direction: Direction,
    mut cipher: S,
    data: &[u8],
) -> CryptResult<Vec<u8>> {
    let mut buf = match direction {
        Direction::Encrypt => pad_if_required(mode, data),
        Direction::Decrypt => data.to_vec(),
    };

    cipher
        .try_apply_keystream(&mut buf)
        .map_err(|_| direction.failure(format!("{} keystream exhausted", mode)))?;

    match direction {
        Direction::Encrypt => Ok(buf),
        Direction::Decrypt => unpad_if_required(mode, buf),
    }
}
