use super::document::{parse_document, serialize_document};
use crate::entry::Snapshot;
use crate::error::Error;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveMode {
    /// Write a sibling temp file, then rename it over the target.
    #[default]
    Atomic,
    /// Truncate and write the target in place.
    Direct,
}

impl SaveMode {
    pub fn from_atomic(atomic: bool) -> Self {
        if atomic { Self::Atomic } else { Self::Direct }
    }
}

/// Read the entries file. A missing, empty or whitespace-only file is an
/// empty store, not an error.
///
/// Bytes that are not UTF-8 are corrupt data, same as malformed JSON. Only
/// failures to read the file at all are `PersistenceIo`.
pub fn load_entries(path: &Path) -> Result<Vec<(String, String)>, Error> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "No entries file yet");
            return Ok(Vec::new());
        }
        Err(e) => return Err(Error::io(path, e)),
    };

    let content = String::from_utf8(bytes)
        .map_err(|e| Error::corrupt(path, format!("not valid UTF-8: {}", e.utf8_error())))?;

    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    parse_document(&content).map_err(|shape| Error::corrupt(path, shape.0))
}

pub fn save_entries(path: &Path, snapshot: &Snapshot, mode: SaveMode) -> Result<(), Error> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    // Nothing touches the file unless the whole document encoded.
    let content = serialize_document(
        snapshot
            .records
            .iter()
            .map(|(title, content)| (title.as_str(), content.as_str())),
    )
    .map_err(|e| Error::io(path, e.into()))?;

    match mode {
        SaveMode::Direct => fs::write(path, content).map_err(|e| Error::io(path, e)),
        SaveMode::Atomic => {
            let temp_path = temp_path_for(path);
            fs::write(&temp_path, content).map_err(|e| Error::io(&temp_path, e))?;
            fs::rename(&temp_path, path).map_err(|e| Error::io(path, e))
        }
    }
}

/// Copy a corrupt entries file aside so a later save cannot overwrite the
/// only copy of it. Returns the backup location.
///
/// Earlier backups are never overwritten: if `<file>.corrupt` is taken the
/// copy goes to `<file>.corrupt.1`, `<file>.corrupt.2` and so on.
pub fn preserve_corrupt_file(path: &Path) -> Result<PathBuf, Error> {
    let backup = next_free_backup_path(path);
    fs::copy(path, &backup).map_err(|e| Error::io(&backup, e))?;
    warn!(
        path = %path.display(),
        backup = %backup.display(),
        "Preserved corrupt entries file"
    );
    Ok(backup)
}

pub fn corrupt_backup_path(path: &Path) -> PathBuf {
    with_suffix(path, "corrupt")
}

fn next_free_backup_path(path: &Path) -> PathBuf {
    let first = corrupt_backup_path(path);
    if !first.exists() {
        return first;
    }
    (1u32..)
        .map(|n| with_suffix(&first, &n.to_string()))
        .find(|candidate| !candidate.exists())
        .unwrap_or(first)
}

fn temp_path_for(path: &Path) -> PathBuf {
    with_suffix(path, "tmp")
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".");
    name.push(suffix);
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;
    use tempfile::TempDir;

    fn setup_test_dir() -> TempDir {
        TempDir::new().unwrap()
    }

    fn snapshot(records: &[(&str, &str)]) -> Snapshot {
        Snapshot {
            records: records
                .iter()
                .map(|(t, c)| (t.to_string(), c.to_string()))
                .collect(),
        }
    }

    #[test]
    fn test_save_and_load_round_trip_as_set() {
        let temp_dir = setup_test_dir();
        let path = temp_dir.path().join("entries.json");
        let input = snapshot(&[("zeta", "last"), ("alpha", "first"), ("sig", "Jane\nDoe")]);

        save_entries(&path, &input, SaveMode::Atomic).unwrap();
        let loaded = load_entries(&path).unwrap();

        let expected: HashSet<_> = input.records.into_iter().collect();
        let actual: HashSet<_> = loaded.into_iter().collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_direct_save_round_trip() {
        let temp_dir = setup_test_dir();
        let path = temp_dir.path().join("entries.json");

        save_entries(&path, &snapshot(&[("todo", "buy milk")]), SaveMode::Direct).unwrap();

        assert_eq!(
            load_entries(&path).unwrap(),
            vec![("todo".to_string(), "buy milk".to_string())]
        );
    }

    #[test]
    fn test_save_replaces_prior_content() {
        let temp_dir = setup_test_dir();
        let path = temp_dir.path().join("entries.json");

        save_entries(&path, &snapshot(&[("a", "1"), ("b", "2")]), SaveMode::Atomic).unwrap();
        save_entries(&path, &snapshot(&[("c", "3")]), SaveMode::Atomic).unwrap();

        assert_eq!(
            load_entries(&path).unwrap(),
            vec![("c".to_string(), "3".to_string())]
        );
        assert!(!temp_path_for(&path).exists());
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let temp_dir = setup_test_dir();
        let path = temp_dir.path().join("nested").join("dir").join("entries.json");

        save_entries(&path, &snapshot(&[("a", "1")]), SaveMode::Atomic).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let temp_dir = setup_test_dir();
        let path = temp_dir.path().join("does-not-exist.json");
        assert!(load_entries(&path).unwrap().is_empty());
    }

    #[test]
    fn test_load_blank_file_is_empty() {
        let temp_dir = setup_test_dir();
        let path = temp_dir.path().join("entries.json");

        fs::write(&path, "").unwrap();
        assert!(load_entries(&path).unwrap().is_empty());

        fs::write(&path, "  \n\t  ").unwrap();
        assert!(load_entries(&path).unwrap().is_empty());
    }

    #[test]
    fn test_load_bare_number_is_corrupt() {
        let temp_dir = setup_test_dir();
        let path = temp_dir.path().join("entries.json");

        save_entries(&path, &snapshot(&[("todo", "buy milk")]), SaveMode::Atomic).unwrap();
        fs::write(&path, "42").unwrap();

        let err = load_entries(&path).unwrap_err();
        assert!(err.is_corrupt());
    }

    #[test]
    fn test_load_malformed_text_is_corrupt() {
        let temp_dir = setup_test_dir();
        let path = temp_dir.path().join("entries.json");
        fs::write(&path, "{\"todo\": \"buy milk\"").unwrap();

        assert!(load_entries(&path).unwrap_err().is_corrupt());
    }

    #[test]
    fn test_load_invalid_utf8_is_corrupt() {
        let temp_dir = setup_test_dir();
        let path = temp_dir.path().join("entries.json");
        fs::write(&path, b"{\"todo\": \"caf\xe9\"}").unwrap();

        let err = load_entries(&path).unwrap_err();
        assert!(err.is_corrupt());
        assert!(err.to_string().contains("UTF-8"));
    }

    #[test]
    fn test_load_directory_is_io_error() {
        let temp_dir = setup_test_dir();
        let path = temp_dir.path().join("entries.json");
        fs::create_dir(&path).unwrap();

        let err = load_entries(&path).unwrap_err();
        assert!(matches!(err, Error::PersistenceIo { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_load_unreadable_file_is_io_error() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = setup_test_dir();
        let path = temp_dir.path().join("entries.json");
        fs::write(&path, r#"{"todo": "buy milk"}"#).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o000)).unwrap();

        // Root ignores file modes; nothing to check there.
        if fs::read(&path).is_ok() {
            return;
        }

        let err = load_entries(&path).unwrap_err();
        assert!(matches!(err, Error::PersistenceIo { .. }));
    }

    #[test]
    fn test_save_into_unwritable_location_is_io_error() {
        let temp_dir = setup_test_dir();
        let blocker = temp_dir.path().join("not-a-dir");
        fs::write(&blocker, "file").unwrap();
        let path = blocker.join("entries.json");

        let err = save_entries(&path, &snapshot(&[("a", "1")]), SaveMode::Atomic).unwrap_err();
        assert!(matches!(err, Error::PersistenceIo { .. }));
    }

    #[test]
    fn test_preserve_corrupt_file() {
        let temp_dir = setup_test_dir();
        let path = temp_dir.path().join("entries.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        let backup = preserve_corrupt_file(&path).unwrap();

        assert_eq!(backup, temp_dir.path().join("entries.json.corrupt"));
        assert_eq!(fs::read_to_string(&backup).unwrap(), "[1, 2, 3]");
        assert!(path.exists());
    }

    #[test]
    fn test_preserve_keeps_earlier_backups() {
        let temp_dir = setup_test_dir();
        let path = temp_dir.path().join("entries.json");

        fs::write(&path, "first").unwrap();
        let first = preserve_corrupt_file(&path).unwrap();
        fs::write(&path, "second").unwrap();
        let second = preserve_corrupt_file(&path).unwrap();
        fs::write(&path, "third").unwrap();
        let third = preserve_corrupt_file(&path).unwrap();

        assert_eq!(first, temp_dir.path().join("entries.json.corrupt"));
        assert_eq!(second, temp_dir.path().join("entries.json.corrupt.1"));
        assert_eq!(third, temp_dir.path().join("entries.json.corrupt.2"));
        assert_eq!(fs::read_to_string(&first).unwrap(), "first");
        assert_eq!(fs::read_to_string(&second).unwrap(), "second");
        assert_eq!(fs::read_to_string(&third).unwrap(), "third");
    }

    #[test]
    fn test_save_mode_from_atomic() {
        assert_eq!(SaveMode::from_atomic(true), SaveMode::Atomic);
        assert_eq!(SaveMode::from_atomic(false), SaveMode::Direct);
    }
}
