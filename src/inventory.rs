use crate::constants::SUPPORTED_EXTENSIONS;
use crate::error::{Result, ShrinkError};
use crate::scan::scan_directory;
use crate::verbose;
use std::fs;
use std::path::{Path, PathBuf};

/// One file found during a scan.
///
/// `relative_path` is the identity used to match the same logical file in the
/// source tree, the staging tree and the tree after the swap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub absolute_path: PathBuf,
    pub relative_path: PathBuf,
    pub size_bytes: u64,
    pub is_eligible: bool,
}

/// Returns true if the path carries one of the supported extensions.
///
/// Comparison is case-sensitive: `a.png` matches, `a.PNG` does not.
pub fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext))
        .unwrap_or(false)
}

/// Computes `path` relative to `root` without touching the filesystem.
pub fn relative_to(path: &Path, root: &Path) -> Result<PathBuf> {
    path.strip_prefix(root)
        .map(Path::to_path_buf)
        .map_err(|_| ShrinkError::OutsideRoot {
            path: path.to_path_buf(),
            root: root.to_path_buf(),
        })
}

/// Builds the record for `path`, found below `root`.
///
/// Size and type come from a single `symlink_metadata` call. When that call
/// fails (the file vanished since the scan) the record is kept, marked
/// ineligible with a size of 0.
pub fn classify(path: &Path, root: &Path) -> Result<FileRecord> {
    let relative_path = relative_to(path, root)?;

    let (size_bytes, is_file) = match fs::symlink_metadata(path) {
        Ok(metadata) => (metadata.len(), metadata.file_type().is_file()),
        Err(e) => {
            verbose!("Cannot stat {:?}, skipping: {}", path, e);
            (0, false)
        }
    };

    Ok(FileRecord {
        absolute_path: path.to_path_buf(),
        relative_path,
        size_bytes,
        is_eligible: is_file && has_supported_extension(path),
    })
}

/// Immutable snapshot of the files below a root directory.
#[derive(Debug, Clone)]
pub struct Inventory {
    root: PathBuf,
    records: Vec<FileRecord>,
    total_bytes: u64,
}

impl Inventory {
    pub fn from_records(root: impl Into<PathBuf>, records: Vec<FileRecord>) -> Self {
        let total_bytes = records
            .iter()
            .filter(|r| r.is_eligible)
            .map(|r| r.size_bytes)
            .sum();

        Self {
            root: root.into(),
            records,
            total_bytes,
        }
    }

    /// Scans `root` and classifies every regular file found.
    pub fn scan(root: &Path) -> Result<Self> {
        let records = scan_directory(root)?
            .iter()
            .map(|path| classify(path, root))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::from_records(root, records))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn records(&self) -> &[FileRecord] {
        &self.records
    }

    pub fn eligible(&self) -> impl Iterator<Item = &FileRecord> {
        self.records.iter().filter(|r| r.is_eligible)
    }

    pub fn eligible_count(&self) -> usize {
        self.eligible().count()
    }

    /// Sum of `size_bytes` over eligible records.
    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }
}
