//! ALFA Image Crypt - Configuration
//!
//! Per-operation options and an optional JSON defaults file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::crypto::CipherMode;
use crate::error::CryptResult;
use crate::secure_fs;

/// Defaults loaded from a config file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CryptConfig {
    /// Mode used when `--mode` is not given
    pub default_mode: CipherMode,
}

impl CryptConfig {
    /// Load from a JSON file; missing fields fall back to defaults
    pub fn load<P: AsRef<Path>>(path: P) -> CryptResult<Self> {
        let data = secure_fs::read_file(path.as_ref())?;
        Ok(serde_json::from_slice(&data)?)
    }

    /// Explicit mode wins over the configured default
    pub fn resolve_mode(&self, explicit: Option<CipherMode>) -> CipherMode {
        explicit.unwrap_or(self.default_mode)
    }
}

/// Options for an encrypt run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptOptions {
    pub mode: CipherMode,
    /// Existing key file; a new key is generated when absent
    pub key: Option<PathBuf>,
    /// Where to persist the key used for this run
    pub save_key: Option<PathBuf>,
}

/// Options for a decrypt run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecryptOptions {
    /// Must match the mode used at encryption time
    pub mode: CipherMode,
    pub key: PathBuf,
}

impl DecryptOptions {
    pub fn new(key: impl Into<PathBuf>) -> Self {
        Self {
            mode: CipherMode::default(),
            key: key.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CryptError;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = CryptConfig::default();
        assert_eq!(config.default_mode, CipherMode::Cbc);
        assert_eq!(config.resolve_mode(None), CipherMode::Cbc);
        assert_eq!(config.resolve_mode(Some(CipherMode::Ctr)), CipherMode::Ctr);

        let opts = EncryptOptions::default();
        assert_eq!(opts.mode, CipherMode::Cbc);
        assert!(opts.key.is_none() && opts.save_key.is_none());

        assert_eq!(DecryptOptions::new("k.key").mode, CipherMode::Cbc);
    }

    #[test]
    fn test_load_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("crypt.json");

        std::fs::write(&path, r#"{"default_mode": "OFB"}"#).unwrap();
        let config = CryptConfig::load(&path).unwrap();
        assert_eq!(config.resolve_mode(None), CipherMode::Ofb);

        std::fs::write(&path, "{}").unwrap();
        assert_eq!(CryptConfig::load(&path).unwrap(), CryptConfig::default());
    }

    #[test]
    fn test_load_bad_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("crypt.json");

        std::fs::write(&path, r#"{"default_mode": "ECB"}"#).unwrap();
        assert!(matches!(CryptConfig::load(&path), Err(CryptError::Config(_))));

        let missing = CryptConfig::load(dir.path().join("missing.json"));
        assert!(matches!(missing, Err(CryptError::FileNotFound(_))));
    }
}
