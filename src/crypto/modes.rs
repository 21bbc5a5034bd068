//! ALFA Image Crypt - Cipher Modes
//!
//! The four supported AES chaining modes. Every place that behaves
//! differently per mode matches on [`CipherMode`] exhaustively.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CryptError;

/// Block cipher mode of operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CipherMode {
    /// Cipher Block Chaining
    #[default]
    Cbc,
    /// Cipher Feedback (full 128-bit segments)
    Cfb,
    /// Output Feedback
    Ofb,
    /// Counter mode, nonce is the initial 128-bit big-endian counter block
    Ctr,
}

impl CipherMode {
    /// All supported modes
    pub const ALL: [CipherMode; 4] = [
        CipherMode::Cbc,
        CipherMode::Cfb,
        CipherMode::Ofb,
        CipherMode::Ctr,
    ];

    /// Whether plaintext is PKCS#7 padded before encryption.
    ///
    /// CFB and OFB are stream-like and would not need it, but files written
    /// by earlier releases pad them, so they stay padded for compatibility.
    pub fn requires_padding(&self) -> bool {
        match self {
            CipherMode::Cbc => true,
            CipherMode::Cfb => true,
            CipherMode::Ofb => true,
            CipherMode::Ctr => false,
        }
    }

    /// Canonical tag
    pub fn as_str(&self) -> &'static str {
        match self {
            CipherMode::Cbc => "CBC",
            CipherMode::Cfb => "CFB",
            CipherMode::Ofb => "OFB",
            CipherMode::Ctr => "CTR",
        }
    }
}

impl fmt::Display for CipherMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CipherMode {
    type Err = CryptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CipherMode::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CryptError::UnsupportedMode(s.to_string()))
    }
}
