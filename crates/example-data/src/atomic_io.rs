//! Atomic file write operations.
//!
//! This module provides a helper for writing registry files atomically using
//! a temporary file and rename strategy, ensuring partial writes do not
//! corrupt the target file.

use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use camino::{Utf8Component, Utf8Path};
use cap_std::fs::{Dir, OpenOptions};

use crate::error::RegistryError;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Writes contents to a file atomically using a temp file and rename.
///
/// The function writes to a hidden temporary file in the same directory,
/// then renames it to the target path. This ensures the target file is
/// never partially written.
///
/// # Errors
///
/// Returns [`RegistryError::WriteError`] if the file cannot be written.
pub(crate) fn write_atomic(
    dir: &Dir,
    path: &Utf8Path,
    contents: &str,
) -> Result<(), RegistryError> {
    let mut components = path.components();
    let (Some(Utf8Component::Normal(file_name)), None) = (components.next(), components.next())
    else {
        return Err(RegistryError::WriteError {
            path: path.as_std_path().to_path_buf(),
            message: "registry path must be a bare file name".to_owned(),
        });
    };
    let tmp_name = temp_name_for(file_name);

    write_temp_file(dir, &tmp_name, path, contents)?;
    promote_temp_file(dir, &tmp_name, file_name, path)?;
    sync_directory(dir);

    Ok(())
}

/// Builds a process-unique hidden temp file name beside the target.
fn temp_name_for(file_name: &str) -> String {
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos());
    format!(".{file_name}.tmp.{}.{nanos}.{counter}", std::process::id())
}

fn write_temp_file(
    dir: &Dir,
    tmp_name: &str,
    target_path: &Utf8Path,
    contents: &str,
) -> Result<(), RegistryError> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);

    let result = dir.open_with(tmp_name, &options).and_then(|mut file| {
        file.write_all(contents.as_bytes())?;
        file.sync_all()
    });

    result.map_err(|err| {
        // Leave no temp file behind on failure; cleanup errors are ignored.
        drop(dir.remove_file(tmp_name));
        RegistryError::WriteError {
            path: target_path.with_file_name(tmp_name).into_std_path_buf(),
            message: err.to_string(),
        }
    })
}

fn promote_temp_file(
    dir: &Dir,
    tmp_name: &str,
    target_name: &str,
    target_path: &Utf8Path,
) -> Result<(), RegistryError> {
    rename_over(dir, tmp_name, target_name).map_err(|err| {
        drop(dir.remove_file(tmp_name));
        RegistryError::WriteError {
            path: target_path.as_std_path().to_path_buf(),
            message: err.to_string(),
        }
    })
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

#[cfg(test)]
mod tests {
    use std::time::{SystemTime, UNIX_EPOCH};

    use cap_std::ambient_authority;

    use super::*;

    fn scratch_dir(label: &str) -> (std::path::PathBuf, Dir) {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_nanos());
        let path = std::env::temp_dir().join(format!("example-data-{label}-{nanos}"));
        std::fs::create_dir_all(&path).expect("create scratch dir");
        let dir = Dir::open_ambient_dir(&path, ambient_authority()).expect("open scratch dir");
        (path, dir)
    }

    #[test]
    fn writes_contents_to_target() {
        let (path, dir) = scratch_dir("write");
        write_atomic(&dir, Utf8Path::new("registry.json"), r#"{"version":1}"#)
            .expect("atomic write succeeds");

        let contents = dir.read_to_string("registry.json").expect("read back");
        assert_eq!(contents, r#"{"version":1}"#);
        std::fs::remove_dir_all(path).expect("clean up");
    }

    #[test]
    fn overwrites_existing_target() {
        let (path, dir) = scratch_dir("overwrite");
        write_atomic(&dir, Utf8Path::new("registry.json"), "first").expect("first write");
        write_atomic(&dir, Utf8Path::new("registry.json"), "second").expect("second write");

        let contents = dir.read_to_string("registry.json").expect("read back");
        assert_eq!(contents, "second");
        std::fs::remove_dir_all(path).expect("clean up");
    }

    #[test]
    fn rejects_nested_paths() {
        let (path, dir) = scratch_dir("nested");
        let result = write_atomic(&dir, Utf8Path::new("nested/registry.json"), "data");

        assert!(matches!(result, Err(RegistryError::WriteError { .. })));
        std::fs::remove_dir_all(path).expect("clean up");
    }

    #[test]
    fn leaves_no_temp_files_behind() {
        let (path, dir) = scratch_dir("tempfiles");
        write_atomic(&dir, Utf8Path::new("registry.json"), "data").expect("write succeeds");

        let leftovers: Vec<_> = std::fs::read_dir(&path)
            .expect("list scratch dir")
            .filter_map(Result::ok)
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .filter(|name| name.contains(".tmp."))
            .collect();
        assert!(leftovers.is_empty(), "temp files left behind: {leftovers:?}");
        std::fs::remove_dir_all(path).expect("clean up");
    }
}
