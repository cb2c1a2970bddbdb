//! Whole-file replacement without exposing partial writes.

use std::{
    ffi::OsString,
    fs, io,
    path::{Path, PathBuf},
};

use crate::{Error, Result};

/// Sibling path used for staging writes to `path`: the same name with
/// `.tmp` appended.
pub fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

/// Publish `contents` at `path` via `tmp_path`.
///
/// The payload is written in full to `tmp_path` and then renamed onto
/// `path`, so readers polling `path` see either the previous complete file or
/// the new one. Where the platform refuses to rename over an existing file,
/// the old file is removed first and readers may briefly see no file at all.
pub fn publish(path: &Path, tmp_path: &Path, contents: &[u8]) -> Result<()> {
    fs::write(tmp_path, contents)
        .map_err(|source| Error::io(format!("write {}", tmp_path.display()), source))?;
    let rename_error = |source| {
        Error::io(
            format!("rename {} to {}", tmp_path.display(), path.display()),
            source,
        )
    };
    match fs::rename(tmp_path, path) {
        Ok(()) => Ok(()),
        Err(_) if path.exists() => {
            remove_if_exists(path)?;
            fs::rename(tmp_path, path).map_err(rename_error)
        }
        Err(source) => Err(rename_error(source)),
    }
}

/// Replace `path` with `contents`, staging through [`tmp_path_for`].
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    publish(path, &tmp_path_for(path), contents)
}

/// Remove `path`, treating "already gone" as success.
pub fn remove_if_exists(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(Error::io(format!("remove {}", path.display()), source)),
    }
}
