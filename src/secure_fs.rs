//! ALFA Image Crypt - Filesystem Operations
//!
//! Whole-file reads and atomic whole-file writes.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{CryptError, CryptResult};

fn not_found_or_io(path: &Path, e: io::Error) -> CryptError {
    if e.kind() == io::ErrorKind::NotFound {
        CryptError::FileNotFound(path.display().to_string())
    } else {
        CryptError::Io(e)
    }
}

/// Read an entire file into memory
pub fn read_file(path: &Path) -> CryptResult<Vec<u8>> {
    fs::read(path).map_err(|e| not_found_or_io(path, e))
}

/// Write file atomically: uniquely named temp file in the same
/// directory, fsync, rename over the target.
///
/// The parent directory must already exist. The temp file is removed
/// when any step fails.
pub fn write_file(path: &Path, data: &[u8]) -> CryptResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let result = (|| -> io::Result<()> {
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(data)?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| e.error)?;
        Ok(())
    })();

    result.map_err(|e| not_found_or_io(path, e))?;

    log::debug!("Wrote {} bytes to {}", data.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("photo.enc");

        write_file(&path, b"encrypted data").unwrap();
        assert_eq!(read_file(&path).unwrap(), b"encrypted data");

        // Overwrite, no temp file left behind
        write_file(&path, b"new").unwrap();
        assert_eq!(read_file(&path).unwrap(), b"new");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_read_missing() {
        let dir = tempdir().unwrap();
        let result = read_file(&dir.path().join("nope.png"));
        assert!(matches!(result, Err(CryptError::FileNotFound(_))));
    }

    #[test]
    fn test_write_missing_parent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("out.enc");

        let result = write_file(&path, b"data");
        assert!(matches!(result, Err(CryptError::FileNotFound(_))));
        assert!(!path.exists());
    }

    #[test]
    fn test_write_keeps_tmp_sibling() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("photo.enc");
        let sibling = dir.path().join("photo.enc.tmp");
        fs::write(&sibling, b"user data").unwrap();

        write_file(&path, b"encrypted data").unwrap();

        assert_eq!(read_file(&path).unwrap(), b"encrypted data");
        assert_eq!(read_file(&sibling).unwrap(), b"user data");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn test_failed_rename_removes_temp() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("taken");
        fs::create_dir(&target).unwrap();

        // rename onto a directory fails after the temp file was written
        let result = write_file(&target, b"data");
        assert!(matches!(result, Err(CryptError::Io(_))));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
        assert!(target.is_dir());
    }
}
