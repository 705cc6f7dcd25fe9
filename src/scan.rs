use crate::error::{Result, ShrinkError};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Checks that `root` exists and is a directory.
///
/// # Returns
/// * `Err(ShrinkError::NotFound)` if nothing exists at `root`
/// * `Err(ShrinkError::NotADirectory)` if `root` is a file
pub fn validate_root(root: &Path) -> Result<()> {
    match fs::metadata(root) {
        Ok(metadata) if metadata.is_dir() => Ok(()),
        Ok(_) => Err(ShrinkError::NotADirectory(root.to_path_buf())),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(ShrinkError::NotFound(root.to_path_buf())),
        Err(e) => Err(ShrinkError::fs("stat", root, e)),
    }
}

/// Lists every regular file below `root`, at any depth.
///
/// The walk keeps its pending directories on an explicit stack (walkdir), so
/// deep trees do not grow the call stack. Symlinks below the root are never
/// followed and are not reported. Any unreadable directory aborts the scan,
/// whatever its depth. Order of the result is unspecified.
pub fn scan_directory(root: &Path) -> Result<Vec<PathBuf>> {
    validate_root(root)?;

    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}
