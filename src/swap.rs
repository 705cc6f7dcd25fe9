use crate::error::{Result, ShrinkError};
use crate::inventory::Inventory;
use crate::verbose;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapSummary {
    pub replaced: usize,
}

/// Confirms that every eligible record has a staged regular file.
///
/// Runs before any move so that a missing output is reported while the
/// source tree is still untouched.
pub fn verify_staged(inventory: &Inventory, staging_root: &Path) -> Result<()> {
    for record in inventory.eligible() {
        let staged = staging_root.join(&record.relative_path);
        match fs::symlink_metadata(&staged) {
            Ok(metadata) if metadata.file_type().is_file() => {}
            _ => return Err(ShrinkError::MissingStagedFile(staged)),
        }
    }
    Ok(())
}

/// Moves staged files back over their originals, then removes the staging tree.
///
/// Files are moved one by one, in inventory order: only eligible files were
/// staged, and everything else in `source_root` must stay where it is. A
/// failure part way leaves some files replaced and some not; nothing is
/// rolled back.
pub fn swap_into_place(
    inventory: &Inventory,
    staging_root: &Path,
    source_root: &Path,
) -> Result<SwapSummary> {
    verify_staged(inventory, staging_root)?;

    let mut replaced = 0;
    for record in inventory.eligible() {
        let staged = staging_root.join(&record.relative_path);
        let target = source_root.join(&record.relative_path);

        if fs::symlink_metadata(&target).is_ok() {
            fs::remove_file(&target).map_err(|e| ShrinkError::fs("remove", &target, e))?;
        }

        fs::rename(&staged, &target).map_err(|e| ShrinkError::fs("move", &staged, e))?;
        verbose!("Replaced {:?}", target);
        replaced += 1;
    }

    fs::remove_dir_all(staging_root).map_err(|e| ShrinkError::fs("remove", staging_root, e))?;

    Ok(SwapSummary { replaced })
}
