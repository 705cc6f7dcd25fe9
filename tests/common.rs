#![allow(dead_code)]

use image::{ImageBuffer, Rgb};
use img_shrink::{Compressor, Result, ShrinkError};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Writes `len` filler bytes at `path`, creating parent directories.
pub fn write_sized_file(path: &Path, len: usize) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    File::create(path)
        .unwrap()
        .write_all(&vec![0xABu8; len])
        .unwrap();
}

/// Saves a small real PNG with some texture so oxipng has work to do.
pub fn write_test_png(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let img = ImageBuffer::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    });
    img.save(path).unwrap();
}

/// A parent temp directory holding the source tree `<parent>/img`, so the
/// staging sibling lands inside the temp directory too.
pub fn create_source_tree() -> (TempDir, PathBuf) {
    let parent = TempDir::new().unwrap();
    let source = parent.path().join("img");
    fs::create_dir(&source).unwrap();
    (parent, source)
}

/// Copies input unchanged.
pub struct CopyCompressor;

impl Compressor for CopyCompressor {
    fn compress(&self, input: &Path, output_dir: &Path) -> Result<()> {
        let target = output_dir.join(input.file_name().unwrap());
        fs::copy(input, &target).map_err(|e| ShrinkError::fs("copy", &target, e))?;
        Ok(())
    }
}

/// Keeps the first half of the input bytes.
pub struct HalvingCompressor;

impl Compressor for HalvingCompressor {
    fn compress(&self, input: &Path, output_dir: &Path) -> Result<()> {
        let data = fs::read(input).map_err(|e| ShrinkError::fs("read", input, e))?;
        let target = output_dir.join(input.file_name().unwrap());
        fs::write(&target, &data[..data.len() / 2])
            .map_err(|e| ShrinkError::fs("write", &target, e))
    }
}

/// Fails on every call.
pub struct FailingCompressor;

impl Compressor for FailingCompressor {
    fn compress(&self, input: &Path, _output_dir: &Path) -> Result<()> {
        Err(ShrinkError::compression(input, "simulated backend failure"))
    }
}

/// Relative paths of all regular files below `root`, sorted.
pub fn list_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = img_shrink::scan_directory(root)
        .unwrap()
        .into_iter()
        .map(|p| p.strip_prefix(root).unwrap().to_path_buf())
        .collect();
    files.sort();
    files
}
