//! ALFA Image Crypt - Key Material
//!
//! Raw AES keys: generated, loaded from a flat key file, or persisted back.

use std::fmt;
use std::path::Path;

use rand::RngCore;
use secrecy::{ExposeSecret, SecretVec};

use crate::error::{CryptError, CryptResult};
use crate::secure_fs;

/// Length of a freshly generated key (AES-256)
pub const KEY_LEN: usize = 32;

/// Accepted key lengths
pub const VALID_KEY_LENGTHS: [usize; 3] = [16, 24, 32];

/// AES variant selected by the key length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySize {
    Aes128,
    Aes192,
    Aes256,
}

impl KeySize {
    fn from_len(len: usize) -> Option<Self> {
        match len {
            16 => Some(KeySize::Aes128),
            24 => Some(KeySize::Aes192),
            32 => Some(KeySize::Aes256),
            _ => None,
        }
    }

    /// Key strength in bits
    pub fn bits(&self) -> usize {
        match self {
            KeySize::Aes128 => 128,
            KeySize::Aes192 => 192,
            KeySize::Aes256 => 256,
        }
    }
}

/// Symmetric key of validated length, zeroized on drop
pub struct KeyMaterial {
    inner: SecretVec<u8>,
    size: KeySize,
}

impl KeyMaterial {
    /// Generate a random 256-bit key
    pub fn generate() -> Self {
        let mut bytes = vec![0u8; KEY_LEN];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self {
            inner: SecretVec::new(bytes),
            size: KeySize::Aes256,
        }
    }

    /// Build a key from caller-supplied bytes (16, 24 or 32 of them)
    pub fn from_bytes(bytes: &[u8]) -> CryptResult<Self> {
        let size = KeySize::from_len(bytes.len())
            .ok_or(CryptError::InvalidKeyLength { actual: bytes.len() })?;

        Ok(Self {
            inner: SecretVec::new(bytes.to_vec()),
            size,
        })
    }

    /// Load a key from a raw key file
    pub fn load<P: AsRef<Path>>(path: P) -> CryptResult<Self> {
        let path = path.as_ref();
        let bytes = zeroize::Zeroizing::new(secure_fs::read_file(path).map_err(|e| match e {
            CryptError::FileNotFound(p) => CryptError::KeyFileNotFound(p),
            other => other,
        })?);

        let key = Self::from_bytes(&bytes)?;
        log::debug!("Loaded {}-bit key from {}", key.size.bits(), path.display());
        Ok(key)
    }

    /// Write the raw key bytes, replacing any existing file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> CryptResult<()> {
        secure_fs::write_file(path.as_ref(), self.expose())
    }

    /// Lowercase hex, for display only
    pub fn to_hex(&self) -> String {
        hex::encode(self.expose())
    }

    /// Expose the key bytes (use with caution)
    pub fn expose(&self) -> &[u8] {
        self.inner.expose_secret()
    }

    pub fn size(&self) -> KeySize {
        self.size
    }

    pub fn len(&self) -> usize {
        self.expose().len()
    }

    pub fn is_empty(&self) -> bool {
        self.expose().is_empty()
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("size", &self.size)
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}
