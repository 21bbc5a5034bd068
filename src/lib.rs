//! # ALFA Image Crypt
//!
//! AES encryption of image files (or any file) under a selectable mode.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                    ALFA IMAGE CRYPT                      │
//! │  ┌─────────────┐  ┌─────────────────┐  ┌─────────────┐  │
//! │  │  CLI        │  │  IMAGE CRYPT    │  │  CONFIG     │  │
//! │  │  (clap)     │──│  file in / out  │──│  JSON opts  │  │
//! │  └─────────────┘  └────────┬────────┘  └─────────────┘  │
//! │                            │                             │
//! │  ┌─────────────────────────┴──────────────────────────┐ │
//! │  │                  CIPHER ENGINE                      │ │
//! │  │   AES-128/192/256 × CBC | CFB | OFB | CTR          │ │
//! │  │   fresh IV per call, PKCS#7 for CBC/CFB/OFB        │ │
//! │  └─────────────────────────┬──────────────────────────┘ │
//! │                            │                             │
//! │  ┌─────────────┐  ┌────────┴────────┐  ┌─────────────┐  │
//! │  │  KEY        │  │  RECORD         │  │  SECURE FS  │  │
//! │  │  MATERIAL   │  │  IV ‖ CIPHERTEXT│  │  atomic I/O │  │
//! │  └─────────────┘  └─────────────────┘  └─────────────┘  │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Security Model
//!
//! - Fresh random 16-byte IV/nonce for every encryption
//! - Keys zeroized on drop, never printed by `Debug`
//! - No authentication tag: PKCS#7 padding is the only corruption check,
//!   and CTR output is not checked at all. An AEAD mode would close this
//!   gap but changes the file format.

pub mod crypto;
pub mod secure_fs;
pub mod error;
pub mod config;
pub mod image_crypt;

pub use error::{CryptError, CryptResult};
pub use crypto::{CipherEngine, CipherMode, EncryptedRecord, KeyMaterial, KeySize, IV_LEN};
pub use config::{CryptConfig, DecryptOptions, EncryptOptions};
pub use image_crypt::{
    decrypt_with_options, encrypt_with_options, EncryptReport, ImageEncryptor, KeyDisposition,
};

/// ALFA Image Crypt version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
