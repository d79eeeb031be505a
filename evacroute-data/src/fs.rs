//! Capability-based file access on UTF-8 paths.

use std::io::{self, Read};

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8};

/// Open a UTF-8 file path using ambient authority.
///
/// # Errors
///
/// Returns the underlying I/O error when the file cannot be opened.
pub fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Read a whole UTF-8 file into a string.
///
/// # Errors
///
/// Returns the underlying I/O error when the file cannot be opened or is not
/// valid UTF-8.
pub fn read_to_string(path: &Utf8Path) -> io::Result<String> {
    let mut contents = String::new();
    open_utf8_file(path)?.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Report whether `path` exists and is a regular file.
///
/// # Errors
///
/// Returns an I/O error when the parent directory cannot be opened or the
/// entry cannot be inspected. A missing entry yields `Ok(false)`.
pub fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let parent = match path.parent() {
        Some(dir) if !dir.as_str().is_empty() => dir,
        _ => Utf8Path::new("."),
    };
    let Some(name) = path.file_name() else {
        return Ok(false);
    };
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    match dir.metadata(name) {
        Ok(meta) => Ok(meta.is_file()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err),
    }
}
