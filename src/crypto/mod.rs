//! ALFA Image Crypt - Cryptographic Core
//!
//! AES with selectable chaining mode, PKCS#7 padding and IV-prefixed records.

pub mod keys;
pub mod modes;
pub mod padding;
pub mod record;
pub mod engine;

pub use keys::*;
pub use modes::*;
pub use record::*;
pub use engine::*;
