//! File helpers shared by the word list and the stats store.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Maximum file size that can be read into memory (4 MB).
///
/// Word lists and stats records are tiny; anything larger is a misconfigured
/// path, not data.
pub const MAX_FILE_SIZE: u64 = 4 * 1024 * 1024;

/// Read a file into a string, refusing files over `MAX_FILE_SIZE`.
pub fn read_to_string_limited(path: &Path) -> io::Result<String> {
    read_to_string_with_limit(path, MAX_FILE_SIZE)
}

/// Read a file into a string with a custom size limit.
pub fn read_to_string_with_limit(path: &Path, max_size: u64) -> io::Result<String> {
    let size = fs::metadata(path)?.len();
    if size > max_size {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "file {} is too large ({} bytes, max {} bytes)",
                path.display(),
                size,
                max_size
            ),
        ));
    }

    fs::read_to_string(path)
}

/// Temp file used while replacing `path`.
pub fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.tmp", name))
}

/// Replace `path` with `contents` via temp file + rename.
///
/// Readers never observe a partially written file: they see either the old
/// contents or the new ones.
pub fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let temp_path = temp_path_for(path);
    {
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(contents)?;
        file.sync_all()?;
    }

    // Atomic on POSIX
    fs::rename(&temp_path, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_to_string_limited_success() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("words.json");
        fs::write(&path, "[\"crane\"]").unwrap();

        assert_eq!(read_to_string_limited(&path).unwrap(), "[\"crane\"]");
    }

    #[test]
    fn test_read_to_string_limited_nonexistent() {
        let temp = TempDir::new().unwrap();
        let err = read_to_string_limited(&temp.path().join("missing.json")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_read_to_string_with_limit_at_boundary() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("boundary.txt");
        fs::write(&path, "x".repeat(100)).unwrap();

        assert!(read_to_string_with_limit(&path, 100).is_ok());

        let err = read_to_string_with_limit(&path, 99).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert!(err.to_string().contains("too large"));
    }

    #[test]
    fn test_write_atomic_creates_parent_and_replaces() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("gamestats.json");

        write_atomic(&path, b"first").unwrap();
        write_atomic(&path, b"second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
        assert!(!temp_path_for(&path).exists());
    }

    #[test]
    fn test_temp_path_is_hidden_sibling() {
        let path = Path::new("/var/lib/wordle/gamestats.json");
        assert_eq!(
            temp_path_for(path),
            PathBuf::from("/var/lib/wordle/.gamestats.json.tmp")
        );
    }
}
