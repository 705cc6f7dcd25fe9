use crate::constants::{
    HIGH_QUALITY_THRESHOLD, LIBDEFLATER_HIGH_LEVEL, LIBDEFLATER_LOW_LEVEL, MAX_IMAGE_DIMENSION,
    OXIPNG_PRESET, TARGET_QUALITY, ZOPFLI_ITERATIONS, ZOPFLI_QUALITY_THRESHOLD,
};
use crate::error::{Result, ShrinkError};
use oxipng::{Deflaters, InFile, Options, OutFile};
use std::num::NonZeroU8;
use std::path::Path;

/// Shrinks one file into a destination directory.
///
/// Implementations write exactly one file into `output_dir`, named like the
/// base name of `input`. Any failure is reported as an error and treated as
/// fatal by the caller.
pub trait Compressor: Sync {
    fn compress(&self, input: &Path, output_dir: &Path) -> Result<()>;
}

/// Quality band accepted by a compressor, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualityRange {
    pub min: u8,
    pub max: u8,
}

impl QualityRange {
    /// A band collapsed to a single target value.
    pub const fn point(quality: u8) -> Self {
        Self {
            min: quality,
            max: quality,
        }
    }
}

/// Production backend: lossless PNG re-encoding through oxipng.
#[derive(Debug, Clone)]
pub struct PngCompressor {
    quality: QualityRange,
}

impl Default for PngCompressor {
    fn default() -> Self {
        Self {
            quality: TARGET_QUALITY,
        }
    }
}

impl PngCompressor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quality(&self) -> QualityRange {
        self.quality
    }

    /// Maps the quality target onto an oxipng configuration.
    pub fn oxipng_options(&self) -> Options {
        let mut options = Options::from_preset(OXIPNG_PRESET);
        // The staging tree needs one output per input, even without any gain.
        options.force = true;

        options.deflate = if self.quality.max >= ZOPFLI_QUALITY_THRESHOLD {
            Deflaters::Zopfli {
                iterations: NonZeroU8::new(ZOPFLI_ITERATIONS).unwrap_or(NonZeroU8::MIN),
            }
        } else if self.quality.max >= HIGH_QUALITY_THRESHOLD {
            Deflaters::Libdeflater {
                compression: LIBDEFLATER_HIGH_LEVEL,
            }
        } else {
            Deflaters::Libdeflater {
                compression: LIBDEFLATER_LOW_LEVEL,
            }
        };

        options
    }
}

impl Compressor for PngCompressor {
    fn compress(&self, input: &Path, output_dir: &Path) -> Result<()> {
        let file_name = input
            .file_name()
            .ok_or_else(|| ShrinkError::compression(input, "input has no file name"))?;

        // Header-only read: rejects non-PNG data and oversized images early.
        let (width, height) =
            image::image_dimensions(input).map_err(|e| ShrinkError::compression(input, e))?;
        if width > MAX_IMAGE_DIMENSION || height > MAX_IMAGE_DIMENSION {
            return Err(ShrinkError::compression(
                input,
                format!(
                    "dimensions {}x{} exceed {}x{}",
                    width, height, MAX_IMAGE_DIMENSION, MAX_IMAGE_DIMENSION
                ),
            ));
        }

        let in_file = InFile::Path(input.to_path_buf());
        let out_file = OutFile::Path {
            path: Some(output_dir.join(file_name)),
            preserve_attrs: false,
        };

        oxipng::optimize(&in_file, &out_file, &self.oxipng_options())
            .map_err(|e| ShrinkError::compression(input, e))
    }
}
