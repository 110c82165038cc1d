//! JSON-file state store adapter.
//!
//! Each storage key maps to one `<key>.json` file inside the state
//! directory. Writes go through a temp-file-and-rename so a crash mid-write
//! never leaves a partially written record.

use std::io::{self, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use cap_std::ambient_authority;
use cap_std::fs::{Dir, OpenOptions};

use crate::domain::ports::{StateKey, StateStore, StateStoreError};

/// Durable state store rooted at a capability-scoped directory.
pub struct JsonStateStore {
    dir: Dir,
}

impl JsonStateStore {
    /// Open (creating if needed) the state directory at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StateStoreError::Backend`] when the directory cannot be
    /// created or opened.
    pub fn open(path: &Path) -> Result<Self, StateStoreError> {
        std::fs::create_dir_all(path).map_err(|e| {
            StateStoreError::backend(format!(
                "cannot create state directory '{}': {e}",
                path.display()
            ))
        })?;
        let dir = Dir::open_ambient_dir(path, ambient_authority()).map_err(|e| {
            StateStoreError::backend(format!(
                "cannot open state directory '{}': {e}",
                path.display()
            ))
        })?;
        Ok(Self { dir })
    }

    fn file_name(key: StateKey) -> String {
        format!("{}.json", key.as_str())
    }
}

impl StateStore for JsonStateStore {
    fn load(&self, key: StateKey) -> Result<Option<String>, StateStoreError> {
        match self.dir.read_to_string(Self::file_name(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StateStoreError::io(key, err.to_string())),
        }
    }

    fn save(&self, key: StateKey, contents: &str) -> Result<(), StateStoreError> {
        let target = Self::file_name(key);
        let tmp_name = temp_name_for(&target);

        write_temp_file(&self.dir, &tmp_name, contents)
            .and_then(|()| rename_over(&self.dir, &tmp_name, &target))
            .map_err(|err| {
                drop(self.dir.remove_file(&tmp_name));
                StateStoreError::io(key, err.to_string())
            })?;

        sync_directory(&self.dir);
        Ok(())
    }
}

/// Builds a process-unique hidden temp file name beside the target.
fn temp_name_for(file_name: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos());
    format!(".{file_name}.tmp.{}.{nanos}", std::process::id())
}

fn write_temp_file(dir: &Dir, tmp_name: &str, contents: &str) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let mut file = dir.open_with(tmp_name, &options)?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()
}

#[cfg(windows)]
fn rename_over(dir: &Dir, tmp_name: &str, target_name: &str) -> io::Result<()> {
    // Windows rename fails if the target exists, so remove it first.
    match dir.remove_file(target_name) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }
    dir.rename(tmp_name, dir, target_name)
}

#[cfg(not(windows))]
fn rename_over(dir: &Dir, tmp_name: &str, target_name: &str) -> io::Result<()> {
    dir.rename(tmp_name, dir, target_name)
}

fn sync_directory(dir: &Dir) {
    // Best-effort directory sync; ignore failures.
    if dir.open(".").and_then(|handle| handle.sync_all()).is_err() {
        // Ignore sync failures.
    }
}
