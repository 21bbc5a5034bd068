//! On-disk record framing.
//!
//! ```text
//! [IV/NONCE 16B][random, fresh per encryption]
//! [CIPHERTEXT variable][same length as padded-or-raw plaintext]
//! ```
//!
//! No magic, version, mode tag or authentication tag. The reader must
//! know the key and the mode.

use crate::error::{CryptError, CryptResult};

/// IV / nonce length in bytes
pub const IV_LEN: usize = 16;

/// IV/nonce followed by ciphertext
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedRecord {
    iv: [u8; IV_LEN],
    ciphertext: Vec<u8>,
}

impl EncryptedRecord {
    pub fn new(iv: [u8; IV_LEN], ciphertext: Vec<u8>) -> Self {
        Self { iv, ciphertext }
    }

    pub fn iv(&self) -> &[u8; IV_LEN] {
        &self.iv
    }

    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    /// Serialized length (IV + ciphertext)
    pub fn len(&self) -> usize {
        IV_LEN + self.ciphertext.len()
    }

    /// Always false, a record carries at least its IV
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Serialize to bytes (iv || ciphertext)
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len());
        out.extend_from_slice(&self.iv);
        out.extend_from_slice(&self.ciphertext);
        out
    }

    /// Split raw file contents into IV and ciphertext
    pub fn from_bytes(data: &[u8]) -> CryptResult<Self> {
        if data.len() < IV_LEN {
            return Err(CryptError::RecordTooShort { len: data.len() });
        }

        let (iv, ciphertext) = data.split_at(IV_LEN);
        let mut iv_bytes = [0u8; IV_LEN];
        iv_bytes.copy_from_slice(iv);

        Ok(Self {
            iv: iv_bytes,
            ciphertext: ciphertext.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        let record = EncryptedRecord::new([0xAA; IV_LEN], vec![1, 2, 3]);
        let bytes = record.to_bytes();

        assert_eq!(bytes.len(), 19);
        assert_eq!(&bytes[..IV_LEN], &[0xAA; IV_LEN]);
        assert_eq!(&bytes[IV_LEN..], &[1, 2, 3]);
        assert_eq!(EncryptedRecord::from_bytes(&bytes).unwrap(), record);
    }

    #[test]
    fn test_iv_only_record() {
        let record = EncryptedRecord::from_bytes(&[5u8; IV_LEN]).unwrap();
        assert_eq!(record.iv(), &[5u8; IV_LEN]);
        assert!(record.ciphertext().is_empty());
        assert_eq!(record.len(), IV_LEN);
    }

    #[test]
    fn test_too_short() {
        for len in [0usize, 1, 15] {
            let result = EncryptedRecord::from_bytes(&vec![0u8; len]);
            assert!(matches!(result, Err(CryptError::RecordTooShort { len: l }) if l == len));
        }
    }
}
