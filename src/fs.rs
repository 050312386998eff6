//! Blocking file helpers used by the ledger storage, which reads and writes synchronously.

use crate::Result;
use anyhow::Context;
use std::io::{ErrorKind, Write};
use std::path::Path;

pub(crate) fn create_dir_all(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    std::fs::create_dir_all(path)
        .with_context(|| format!("Unable to create directory {}", path.display()))
}

/// Reads the file at `path`, returning `None` if it does not exist.
pub(crate) fn read_optional(path: impl AsRef<Path>) -> Result<Option<String>> {
    let path = path.as_ref();
    match std::fs::read_to_string(path) {
        Ok(s) => Ok(Some(s)),
        Err(e) => match e.kind() {
            ErrorKind::NotFound => Ok(None),
            _ => Err(e).context(format!("Unable to read file {}", path.display())),
        },
    }
}

/// Replaces the contents of `path` by writing a sibling temp file and renaming it over `path`.
pub(crate) fn write_replace(path: impl AsRef<Path>, data: &[u8]) -> Result<()> {
    let path = path.as_ref();
    let tmp = path.with_extension("tmp");
    {
        let mut f = std::fs::File::create(&tmp)
            .with_context(|| format!("Unable to create file {}", tmp.display()))?;
        f.write_all(data)
            .with_context(|| format!("Unable to write data to {}", tmp.display()))?;
        f.sync_all()
            .with_context(|| format!("Unable to flush {}", tmp.display()))?;
    }
    std::fs::rename(&tmp, path).with_context(|| {
        format!(
            "Unable to move '{}' to '{}'",
            tmp.display(),
            path.display()
        )
    })
}

#[test]
fn read_optional_missing_file_test() {
    let tempdir = tempfile::TempDir::new().unwrap();
    let missing = tempdir.path().join("nope.json");
    assert!(read_optional(&missing).unwrap().is_none());
}

#[test]
fn write_replace_test() {
    let tempdir = tempfile::TempDir::new().unwrap();
    let path = tempdir.path().join("a").join("data.json");
    create_dir_all(path.parent().unwrap()).unwrap();
    write_replace(&path, b"first").unwrap();
    write_replace(&path, b"second").unwrap();
    assert_eq!(read_optional(&path).unwrap().unwrap(), "second");
    assert!(!path.with_extension("tmp").exists());
}
