use crate::compressor::Compressor;
use crate::constants::{STAGING_SUFFIX, SUPPORTED_EXTENSIONS};
use crate::error::{Result, ShrinkError};
use crate::inventory::Inventory;
use crate::scan::validate_root;
use crate::stage::stage_inventory;
use crate::swap::swap_into_place;
use crate::utils::{compression_ratio, format_file_size, format_ratio};
use crate::{info, step, verbose};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Runtime knobs coming from the command line.
#[derive(Debug, Clone)]
pub struct ShrinkOptions {
    pub threads: usize,
}

impl Default for ShrinkOptions {
    fn default() -> Self {
        Self {
            threads: num_cpus::get(),
        }
    }
}

impl ShrinkOptions {
    pub fn new(threads: Option<usize>) -> Self {
        match threads {
            Some(threads) => Self {
                threads: threads.max(1),
            },
            None => Self::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Scanning,
    Staging,
    Swapping,
    Rescanning,
    Reporting,
    Done,
    Failed,
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineState::Scanning => "scanning",
            PipelineState::Staging => "staging",
            PipelineState::Swapping => "swapping",
            PipelineState::Rescanning => "rescanning",
            PipelineState::Reporting => "reporting",
            PipelineState::Done => "done",
            PipelineState::Failed => "failed",
        };
        write!(f, "{}", name)
    }
}

/// Count and total size of the eligible files of one scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InventorySummary {
    pub count: usize,
    pub total_bytes: u64,
}

impl From<&Inventory> for InventorySummary {
    fn from(inventory: &Inventory) -> Self {
        Self {
            count: inventory.eligible_count(),
            total_bytes: inventory.total_bytes(),
        }
    }
}

/// Before/after comparison produced at the end of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub before: InventorySummary,
    pub after: InventorySummary,
    /// `after / before` rounded to 2 decimals; `None` when nothing was there before.
    pub ratio: Option<f64>,
}

impl Report {
    pub fn new(before: InventorySummary, after: InventorySummary) -> Self {
        Self {
            before,
            after,
            ratio: compression_ratio(before.total_bytes, after.total_bytes),
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "summary:")?;
        writeln!(
            f,
            "   discover image files: {} ({})",
            self.before.count,
            format_file_size(self.before.total_bytes)
        )?;
        writeln!(
            f,
            "   optimized image files: {} ({})",
            self.after.count,
            format_file_size(self.after.total_bytes)
        )?;
        write!(f, "   compress ratio: {}", format_ratio(self.ratio))
    }
}

/// Returns `desired`, or `desired_<n>` with the smallest `n >= 1`, whichever
/// `exists` reports as free first.
///
/// Pure over the oracle: there is no lock against other processes taking the
/// name afterwards.
pub fn first_free_name<F>(desired: &str, exists: F) -> String
where
    F: Fn(&str) -> bool,
{
    if !exists(desired) {
        return desired.to_string();
    }

    let mut n: u64 = 1;
    loop {
        let candidate = format!("{}_{}", desired, n);
        if !exists(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

/// Staging directory for `source_root`: a free `<basename>_optimized[_<n>]`
/// sibling of it.
pub fn staging_dir_for(source_root: &Path) -> Result<PathBuf> {
    let (parent, base) = match (source_root.parent(), source_root.file_name()) {
        (Some(parent), Some(base)) => (parent, base),
        _ => return Err(ShrinkError::NoStagingLocation(source_root.to_path_buf())),
    };

    let desired = format!("{}{}", base.to_string_lossy(), STAGING_SUFFIX);
    // symlink_metadata: a dangling link still occupies the name.
    let name = first_free_name(&desired, |candidate| {
        fs::symlink_metadata(parent.join(candidate)).is_ok()
    });
    Ok(parent.join(name))
}

/// Scans and logs one inventory the way both the first scan and the rescan do.
fn collect_images(root: &Path) -> Result<Inventory> {
    let inventory = Inventory::scan(root)?;
    let extensions: Vec<String> = SUPPORTED_EXTENSIONS
        .iter()
        .map(|ext| format!(".{}", ext))
        .collect();

    info!(
        "found {} image files ({})",
        inventory.eligible_count(),
        extensions.join(", ")
    );
    info!("disk usage {}", format_file_size(inventory.total_bytes()));
    Ok(inventory)
}

/// Drives scan → stage → swap → rescan → report over one directory tree.
pub struct Pipeline<C: Compressor> {
    compressor: C,
    options: ShrinkOptions,
    state: PipelineState,
}

impl<C: Compressor> Pipeline<C> {
    pub fn new(compressor: C, options: ShrinkOptions) -> Self {
        Self {
            compressor,
            options,
            state: PipelineState::Scanning,
        }
    }

    /// Last state reached; `Failed` after an aborted run.
    pub fn state(&self) -> PipelineState {
        self.state
    }

    fn enter(&mut self, state: PipelineState) {
        step!(state);
        self.state = state;
    }

    /// Shrinks every eligible file below `source_root` in place.
    ///
    /// Any error aborts the run where it happened. A staging directory left
    /// behind by a failed run is not cleaned up.
    pub fn run(&mut self, source_root: &Path) -> Result<Report> {
        self.state = PipelineState::Scanning;
        let result = self.run_stages(source_root);
        if let Err(e) = &result {
            verbose!("pipeline aborted while {}: {}", self.state, e);
            self.state = PipelineState::Failed;
        }
        result
    }

    fn run_stages(&mut self, source_root: &Path) -> Result<Report> {
        validate_root(source_root)?;
        let source_root = fs::canonicalize(source_root)
            .map_err(|e| ShrinkError::fs("resolve", source_root, e))?;
        let staging_root = staging_dir_for(&source_root)?;
        verbose!("Staging into {:?}", staging_root);

        let before = collect_images(&source_root)?;

        self.enter(PipelineState::Staging);
        stage_inventory(
            &before,
            &staging_root,
            &self.compressor,
            self.options.threads,
        )?;
        info!("");

        self.enter(PipelineState::Swapping);
        swap_into_place(&before, &staging_root, &source_root)?;

        self.enter(PipelineState::Rescanning);
        let after = collect_images(&source_root)?;

        self.enter(PipelineState::Reporting);
        let report = Report::new(InventorySummary::from(&before), InventorySummary::from(&after));
        info!("");
        info!("{}", report);

        self.enter(PipelineState::Done);
        Ok(report)
    }
}
