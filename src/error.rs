//! ALFA Image Crypt - Error Types

use thiserror::Error;

/// Result type for crypt operations
pub type CryptResult<T> = Result<T, CryptError>;

/// Crypt error types
#[derive(Error, Debug)]
pub enum CryptError {
    // ═══════════════════════════════════════════════════════════════
    // KEY ERRORS
    // ═══════════════════════════════════════════════════════════════

    #[error("Invalid key length: expected 16, 24 or 32 bytes, got {actual}")]
    InvalidKeyLength { actual: usize },

    #[error("Key file not found: {0}")]
    KeyFileNotFound(String),

    // ═══════════════════════════════════════════════════════════════
    // CIPHER ERRORS
    // ═══════════════════════════════════════════════════════════════

    #[error("Unsupported cipher mode: {0} (expected one of CBC, CFB, OFB, CTR)")]
    UnsupportedMode(String),

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed: {0}")]
    DecryptionFailed(String),

    // ═══════════════════════════════════════════════════════════════
    // RECORD ERRORS
    // ═══════════════════════════════════════════════════════════════

    #[error("Encrypted record too short: {len} bytes (an IV needs 16)")]
    RecordTooShort { len: usize },

    #[error("Invalid padding - wrong key, wrong mode or corrupted data")]
    InvalidPadding,

    #[error("Ciphertext length {len} is not a multiple of the block size")]
    CiphertextNotAligned { len: usize },

    // ═══════════════════════════════════════════════════════════════
    // FILE / CONFIG ERRORS
    // ═══════════════════════════════════════════════════════════════

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CryptError {
    /// Missing input, key or output directory
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CryptError::FileNotFound(_) | CryptError::KeyFileNotFound(_)
        )
    }

    /// Decryption produced data that failed the only integrity check we have
    pub fn is_integrity_failure(&self) -> bool {
        matches!(
            self,
            CryptError::InvalidPadding | CryptError::CiphertextNotAligned { .. }
        )
    }
}

impl From<serde_json::Error> for CryptError {
    fn from(e: serde_json::Error) -> Self {
        CryptError::Config(e.to_string())
    }
}
