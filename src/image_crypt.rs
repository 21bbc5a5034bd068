//! Image (file) encryption for ALFA Image Crypt
//!
//! Format pliku .enc:
//! ```text
//! [IV/NONCE 16B][random, fresh per file]
//! [CIPHERTEXT variable][AES-CBC/CFB/OFB/CTR]
//! ```
//!
//! The file is treated as opaque bytes and processed fully in memory.

use std::path::{Path, PathBuf};

use crate::config::{DecryptOptions, EncryptOptions};
use crate::crypto::{CipherEngine, CipherMode, EncryptedRecord, KeyMaterial, IV_LEN};
use crate::error::CryptResult;
use crate::secure_fs;

// ---------------------------------------------------------------------------
// ImageEncryptor
// ---------------------------------------------------------------------------

/// Encrypts and decrypts image files with one key and one mode
#[derive(Debug)]
pub struct ImageEncryptor {
    engine: CipherEngine,
}

impl ImageEncryptor {
    /// Create encryptor; generates a fresh AES-256 key when `key` is `None`
    pub fn new(key: Option<KeyMaterial>, mode: CipherMode) -> Self {
        let key = key.unwrap_or_else(|| {
            log::warn!("No key supplied, generated a new 256-bit key");
            KeyMaterial::generate()
        });

        Self {
            engine: CipherEngine::new(key, mode),
        }
    }

    /// Create encryptor from a mode tag such as `"CTR"`
    pub fn from_mode_name(key: Option<KeyMaterial>, mode: &str) -> CryptResult<Self> {
        Ok(Self::new(key, mode.parse()?))
    }

    pub fn mode(&self) -> CipherMode {
        self.engine.mode()
    }

    /// Load a raw key file
    pub fn load_key<P: AsRef<Path>>(path: P) -> CryptResult<KeyMaterial> {
        KeyMaterial::load(path)
    }

    /// Persist the key in use
    pub fn save_key<P: AsRef<Path>>(&self, path: P) -> CryptResult<()> {
        self.engine.key().save(path.as_ref())?;
        log::info!("Key saved to {}", path.as_ref().display());
        Ok(())
    }

    pub fn key_hex(&self) -> String {
        self.engine.key().to_hex()
    }

    /// Encrypt an image file
    ///
    /// # Arguments
    /// * `input_path` - Path to the plaintext image
    /// * `output_path` - Path to write `iv || ciphertext`
    ///
    /// # Returns
    /// The IV/nonce used for this file
    pub fn encrypt_image<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
    ) -> CryptResult<[u8; IV_LEN]> {
        let (record, iv) = self.seal(input_path.as_ref())?;
        self.store(input_path.as_ref(), output_path.as_ref(), &record)?;
        Ok(iv)
    }

    /// Read and encrypt in memory, nothing touches the output yet
    fn seal(&self, input_path: &Path) -> CryptResult<(EncryptedRecord, [u8; IV_LEN])> {
        let plaintext = secure_fs::read_file(input_path)?;
        self.engine.encrypt(&plaintext)
    }

    fn store(&self, input_path: &Path, output_path: &Path, record: &EncryptedRecord) -> CryptResult<()> {
        secure_fs::write_file(output_path, &record.to_bytes())?;

        log::info!(
            "Encrypted {} -> {} ({}, {} bytes)",
            input_path.display(),
            output_path.display(),
            self.mode(),
            record.len()
        );

        Ok(())
    }

    /// Decrypt an image file. Nothing is written when decryption fails.
    pub fn decrypt_image<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
    ) -> CryptResult<()> {
        let data = secure_fs::read_file(input_path.as_ref())?;

        let plaintext = self.engine.decrypt_bytes(&data)?;
        secure_fs::write_file(output_path.as_ref(), &plaintext)?;

        log::info!(
            "Decrypted {} -> {} ({}, {} bytes)",
            input_path.as_ref().display(),
            output_path.as_ref().display(),
            self.mode(),
            plaintext.len()
        );

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Option-driven runs
// ---------------------------------------------------------------------------

/// Where the key of an encrypt run ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyDisposition {
    /// Written to this path
    Saved(PathBuf),
    /// Not persisted; the caller must show and retain this hex key
    Unsaved(String),
}

/// Outcome of [`encrypt_with_options`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptReport {
    pub mode: CipherMode,
    pub iv: [u8; IV_LEN],
    pub key: KeyDisposition,
}

impl EncryptReport {
    pub fn iv_hex(&self) -> String {
        hex::encode(self.iv)
    }
}

/// Encrypt `input` to `output`: load or generate the key, save it if asked.
///
/// The key is persisted before the output is written, so a failed key save
/// never leaves behind a file nobody can decrypt.
pub fn encrypt_with_options<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    opts: &EncryptOptions,
) -> CryptResult<EncryptReport> {
    let key = opts.key.as_deref().map(KeyMaterial::load).transpose()?;
    let encryptor = ImageEncryptor::new(key, opts.mode);

    let (record, iv) = encryptor.seal(input.as_ref())?;

    let key = match &opts.save_key {
        Some(path) => {
            encryptor.save_key(path)?;
            KeyDisposition::Saved(path.clone())
        }
        None => KeyDisposition::Unsaved(encryptor.key_hex()),
    };

    encryptor.store(input.as_ref(), output.as_ref(), &record)?;

    Ok(EncryptReport {
        mode: encryptor.mode(),
        iv,
        key,
    })
}

/// Decrypt `input` to `output` with the configured key file and mode
pub fn decrypt_with_options<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    opts: &DecryptOptions,
) -> CryptResult<()> {
    let key = KeyMaterial::load(&opts.key)?;
    ImageEncryptor::new(Some(key), opts.mode).decrypt_image(input, output)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CryptError;
    use std::fs;
    use tempfile::tempdir;

    const FAKE_PNG: &[u8] = b"\x89PNG\r\n\x1a\nFAKE IMAGE DATA 1234567890 abcdefghij";

    #[test]
    fn test_encrypt_decrypt_file_all_modes() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("photo.png");
        fs::write(&input, FAKE_PNG).unwrap();

        for mode in CipherMode::ALL {
            let enc = dir.path().join(format!("photo.{}.enc", mode));
            let dec = dir.path().join(format!("photo.{}.png", mode));

            let encryptor = ImageEncryptor::new(None, mode);
            let iv = encryptor.encrypt_image(&input, &enc).unwrap();

            let stored = fs::read(&enc).unwrap();
            assert_eq!(&stored[..IV_LEN], &iv);
            assert_ne!(&stored[IV_LEN..], FAKE_PNG);

            encryptor.decrypt_image(&enc, &dec).unwrap();
            assert_eq!(fs::read(&dec).unwrap(), FAKE_PNG);
        }
    }

    #[test]
    fn test_missing_input() {
        let dir = tempdir().unwrap();
        let encryptor = ImageEncryptor::new(None, CipherMode::Cbc);

        let result = encryptor.encrypt_image(dir.path().join("nope.png"), dir.path().join("out"));
        assert!(matches!(result, Err(CryptError::FileNotFound(_))));
    }

    #[test]
    fn test_missing_output_dir() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("photo.png");
        fs::write(&input, FAKE_PNG).unwrap();

        let encryptor = ImageEncryptor::new(None, CipherMode::Ctr);
        let result = encryptor.encrypt_image(&input, dir.path().join("missing").join("out.enc"));
        assert!(result.unwrap_err().is_not_found());
    }

    #[test]
    fn test_wrong_key_writes_nothing() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("photo.png");
        let enc = dir.path().join("photo.enc");
        let dec = dir.path().join("photo.out.png");
        fs::write(&input, FAKE_PNG).unwrap();

        ImageEncryptor::new(None, CipherMode::Cbc)
            .encrypt_image(&input, &enc)
            .unwrap();

        // Single block: a wrong key fails the padding check ~255/256 of the time
        let stored = fs::read(&enc).unwrap();
        fs::write(&enc, &stored[..IV_LEN + 16]).unwrap();

        let other = ImageEncryptor::new(Some(KeyMaterial::generate()), CipherMode::Cbc);
        if let Err(e) = other.decrypt_image(&enc, &dec) {
            assert!(e.is_integrity_failure());
            assert!(!dec.exists());
        }
    }

    #[test]
    fn test_from_mode_name() {
        let encryptor = ImageEncryptor::from_mode_name(None, "CFB").unwrap();
        assert_eq!(encryptor.mode(), CipherMode::Cfb);

        let result = ImageEncryptor::from_mode_name(None, "ECB");
        assert!(matches!(result, Err(CryptError::UnsupportedMode(_))));
    }

    #[test]
    fn test_options_generate_and_save_key() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("photo.png");
        let enc = dir.path().join("photo.enc");
        let dec = dir.path().join("photo.out.png");
        let key_path = dir.path().join("photo.key");
        fs::write(&input, FAKE_PNG).unwrap();

        let opts = EncryptOptions {
            mode: CipherMode::Ofb,
            key: None,
            save_key: Some(key_path.clone()),
        };
        let report = encrypt_with_options(&input, &enc, &opts).unwrap();
        assert_eq!(report.mode, CipherMode::Ofb);
        assert_eq!(report.key, KeyDisposition::Saved(key_path.clone()));
        assert_eq!(report.iv_hex().len(), IV_LEN * 2);
        assert_eq!(fs::read(&key_path).unwrap().len(), 32);

        let dopts = DecryptOptions {
            mode: CipherMode::Ofb,
            key: key_path,
        };
        decrypt_with_options(&enc, &dec, &dopts).unwrap();
        assert_eq!(fs::read(&dec).unwrap(), FAKE_PNG);
    }

    #[test]
    fn test_options_existing_key_unsaved() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("photo.png");
        let enc = dir.path().join("photo.enc");
        let key_path = dir.path().join("aes128.key");
        fs::write(&input, FAKE_PNG).unwrap();
        fs::write(&key_path, [0x24u8; 16]).unwrap();

        let opts = EncryptOptions {
            mode: CipherMode::Ctr,
            key: Some(key_path),
            save_key: None,
        };
        let report = encrypt_with_options(&input, &enc, &opts).unwrap();
        assert_eq!(report.key, KeyDisposition::Unsaved("24".repeat(16)));

        // CTR is never padded
        assert_eq!(fs::read(&enc).unwrap().len(), IV_LEN + FAKE_PNG.len());
    }

    #[test]
    fn test_options_failed_key_save_writes_no_output() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("photo.png");
        let enc = dir.path().join("photo.enc");
        fs::write(&input, FAKE_PNG).unwrap();

        let opts = EncryptOptions {
            mode: CipherMode::Cbc,
            key: None,
            save_key: Some(dir.path().join("missing_dir").join("photo.key")),
        };
        let result = encrypt_with_options(&input, &enc, &opts);

        assert!(matches!(result, Err(CryptError::FileNotFound(_))));
        assert!(!enc.exists());
    }

    #[test]
    fn test_options_missing_input_writes_no_key() {
        let dir = tempdir().unwrap();
        let key_path = dir.path().join("photo.key");

        let opts = EncryptOptions {
            mode: CipherMode::Cbc,
            key: None,
            save_key: Some(key_path.clone()),
        };
        let result = encrypt_with_options(dir.path().join("nope.png"), dir.path().join("out.enc"), &opts);

        assert!(matches!(result, Err(CryptError::FileNotFound(_))));
        assert!(!key_path.exists());
    }

    #[test]
    fn test_options_missing_key_file() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("photo.png");
        fs::write(&input, FAKE_PNG).unwrap();

        let result = decrypt_with_options(
            &input,
            dir.path().join("out.png"),
            &DecryptOptions::new(dir.path().join("missing.key")),
        );
        assert!(matches!(result, Err(CryptError::KeyFileNotFound(_))));
    }
}
