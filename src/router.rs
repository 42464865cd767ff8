//! Moving matched files into their destination folders.

use std::{
    ffi::{OsStr, OsString},
    fs::{self, OpenOptions},
    io::{self, ErrorKind},
    path::{Path, PathBuf},
};

use log::{debug, info, warn};

use crate::error::{Result, SortError};

/// Move `source` into `destination_dir`, creating the directory if needed.
///
/// When the file name is already taken, `" (N)"` is inserted before the
/// extension with N counting up from 2 until a free name is found. The name
/// is reserved with an exclusively created placeholder before the move, so
/// concurrent movers never overwrite each other. Returns the final path.
///
/// # Errors
///
/// Returns an error if `source` has no file name, does not exist, or the
/// move fails. A failed move leaves no file behind at the destination.
pub fn move_file(source: &Path, destination_dir: &Path) -> Result<PathBuf> {
    let file_name = source
        .file_name()
        .ok_or_else(|| SortError::MissingFileName(source.to_path_buf()))?;
    if !source.is_file() {
        return Err(io::Error::new(
            ErrorKind::NotFound,
            format!("{} is not a file", source.display()),
        )
        .into());
    }

    fs::create_dir_all(destination_dir)?;
    let destination = reserve_destination(destination_dir, file_name)?;

    if let Err(e) = fs::rename(source, &destination) {
        debug!(
            "Rename {} -> {} failed ({}), falling back to copy",
            source.display(),
            destination.display(),
            e
        );
        copy_then_remove(source, &destination, |path| fs::remove_file(path))?;
    }

    info!("Moved {} -> {}", source.display(), destination.display());
    Ok(destination)
}

/// Copy `source` over `destination`, then delete `source` with `remove`.
/// On any failure the destination is deleted again so the file only ever
/// lives in one place.
fn copy_then_remove<F>(source: &Path, destination: &Path, remove: F) -> Result<()>
where
    F: FnOnce(&Path) -> io::Result<()>,
{
    let result = fs::copy(source, destination).and_then(|_| remove(source));
    if let Err(e) = result {
        if let Err(cleanup) = fs::remove_file(destination) {
            warn!(
                "Could not remove {} after failed move: {}",
                destination.display(),
                cleanup
            );
        }
        return Err(e.into());
    }
    Ok(())
}

/// Claim the first free name for `file_name` in `dir` by creating an empty
/// placeholder with `create_new`.
///
/// # Errors
///
/// Returns an error if a candidate cannot be created for a reason other
/// than already existing.
pub fn reserve_destination(dir: &Path, file_name: &OsStr) -> Result<PathBuf> {
    let mut n: u64 = 1;
    loop {
        let candidate = dir.join(numbered_name(file_name, n));
        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&candidate)
        {
            Ok(_) => return Ok(candidate),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => n += 1,
            Err(e) => return Err(e.into()),
        }
    }
}

/// First path in `dir` for `file_name` that does not exist yet. Only a
/// prediction; [`move_file`] reserves its destination atomically.
#[must_use]
pub fn free_destination(dir: &Path, file_name: &OsStr) -> PathBuf {
    let mut n: u64 = 1;
    loop {
        let candidate = dir.join(numbered_name(file_name, n));
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}

/// `file_name` itself for `n == 1`, otherwise `"stem (n).ext"`.
fn numbered_name(file_name: &OsStr, n: u64) -> OsString {
    if n == 1 {
        return file_name.to_os_string();
    }

    let name = Path::new(file_name);
    let stem = name.file_stem().unwrap_or(file_name);

    let mut numbered = stem.to_os_string();
    numbered.push(format!(" ({n})"));
    if let Some(extension) = name.extension() {
        numbered.push(".");
        numbered.push(extension);
    }
    numbered
}
