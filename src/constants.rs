use crate::compressor::QualityRange;

/// Extensions (without the dot) eligible for shrinking. Matched case-sensitively.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png"];

/// Suffix appended to the source directory name for the transient staging tree.
pub const STAGING_SUFFIX: &str = "_optimized";

/// Fixed quality target handed to the compressor (a single-point range).
pub const TARGET_QUALITY: QualityRange = QualityRange::point(90);

pub const ZOPFLI_QUALITY_THRESHOLD: u8 = 90;
pub const HIGH_QUALITY_THRESHOLD: u8 = 70;
pub const OXIPNG_PRESET: u8 = 4;
pub const ZOPFLI_ITERATIONS: u8 = 15;
pub const LIBDEFLATER_HIGH_LEVEL: u8 = 12;
pub const LIBDEFLATER_LOW_LEVEL: u8 = 8;

/// Images wider or taller than this are rejected before optimization.
pub const MAX_IMAGE_DIMENSION: u32 = 16384;

pub const SIZE_UNITS: &[&str] = &["b", "k", "m", "g"];
pub const SIZE_STEP: f64 = 1024.0;

pub const PROGRESS_BAR_TEMPLATE: &str = "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}";

pub const USAGE_SUMMARY: &str =
    "optimize image (.png) files losslessly and rewrite to the original location";
pub const USAGE_LINE: &str = "usage: img-shrink <dirname>";
