use crate::compressor::Compressor;
use crate::error::{Result, ShrinkError};
use crate::inventory::{FileRecord, Inventory};
use crate::utils::create_progress_bar;
use crate::{info, verbose};
use rayon::prelude::*;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageSummary {
    pub processed: usize,
}

/// Directory that receives the compressed copy of `record`.
pub fn staged_output_dir(staging_root: &Path, record: &FileRecord) -> PathBuf {
    match record.relative_path.parent() {
        Some(parent) => staging_root.join(parent),
        None => staging_root.to_path_buf(),
    }
}

/// Fails unless `staging_root` is absent or an empty directory.
fn ensure_staging_root_free(staging_root: &Path) -> Result<()> {
    match fs::read_dir(staging_root) {
        Ok(mut entries) => {
            if entries.next().is_some() {
                return Err(ShrinkError::StagingNotEmpty(staging_root.to_path_buf()));
            }
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(ShrinkError::fs("read", staging_root, e)),
    }
}

fn stage_one<C: Compressor + ?Sized>(
    record: &FileRecord,
    staging_root: &Path,
    compressor: &C,
) -> Result<()> {
    let output_dir = staged_output_dir(staging_root, record);
    // Siblings may race to create the same parent; create_dir_all tolerates that.
    fs::create_dir_all(&output_dir).map_err(|e| ShrinkError::fs("create", &output_dir, e))?;

    verbose!("Compressing {:?} -> {:?}", record.absolute_path, output_dir);
    compressor.compress(&record.absolute_path, &output_dir)
}

/// Compresses every eligible file of `inventory` into `staging_root`.
///
/// Output lands at `staging_root/<relative path>`. Work is spread over a pool
/// of `threads` workers, but the call only returns once all files are done,
/// or with the first failure. Nothing partial is reported as success.
pub fn stage_inventory<C: Compressor + ?Sized>(
    inventory: &Inventory,
    staging_root: &Path,
    compressor: &C,
    threads: usize,
) -> Result<StageSummary> {
    ensure_staging_root_free(staging_root)?;

    let records: Vec<&FileRecord> = inventory.eligible().collect();
    fs::create_dir_all(staging_root).map_err(|e| ShrinkError::fs("create", staging_root, e))?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads.max(1))
        .build()
        .map_err(|e| ShrinkError::ThreadPool(e.to_string()))?;

    let progress = create_progress_bar(records.len() as u64);

    let result: Result<()> = pool.install(|| {
        records.par_iter().try_for_each(|record| {
            let outcome = stage_one(record, staging_root, compressor);
            progress.inc(1);
            outcome
        })
    });

    match result {
        Ok(()) => progress.finish_and_clear(),
        Err(_) => progress.abandon(),
    }
    result?;

    info!(
        "image size optimization complete, processed {} images",
        records.len()
    );

    Ok(StageSummary {
        processed: records.len(),
    })
}
