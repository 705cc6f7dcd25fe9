pub mod compressor;
pub mod constants;
pub mod error;
pub mod inventory;
pub mod logger;
pub mod pipeline;
pub mod scan;
pub mod stage;
pub mod swap;
pub mod utils;

pub use compressor::{Compressor, PngCompressor, QualityRange};
pub use error::{Result, ShrinkError};
pub use inventory::{classify, has_supported_extension, relative_to, FileRecord, Inventory};
pub use pipeline::{
    first_free_name, staging_dir_for, InventorySummary, Pipeline, PipelineState, Report,
    ShrinkOptions,
};
pub use scan::{scan_directory, validate_root};
pub use stage::{stage_inventory, StageSummary};
pub use swap::{swap_into_place, verify_staged, SwapSummary};
pub use utils::{compression_ratio, format_file_size};
