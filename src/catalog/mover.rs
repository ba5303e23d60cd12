//! Moving the selected image into a destination slot
//!
//! The move is the only destructive operation in the application: it
//! relocates the file on disk, drops the entry from the catalog, and
//! advances the selection. Nothing is removed from the catalog until the
//! filesystem move has succeeded.

use super::{Catalog, CatalogEntry};
use crate::error::{PicsortError, Result};
use crate::grouping::DestinationSlot;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Result of [`Catalog::move_current_to`]
#[derive(Debug)]
pub enum MoveOutcome {
    /// The file was relocated; `next` is the new selection, if any remained
    Moved {
        destination: PathBuf,
        next: Option<CatalogEntry>,
    },
    /// A precondition was unmet (no selection, slot out of range, slot
    /// unset); nothing happened and nothing was reported
    Skipped,
}

impl Catalog {
    /// Moves the selected image into the destination folder of
    /// `slots[slot_index]`.
    ///
    /// Preconditions failing quietly is deliberate: an unconfigured slot key
    /// simply does nothing. A file already present at the destination is an
    /// error rather than an overwrite. On any filesystem failure the catalog
    /// and selection are left exactly as they were.
    pub fn move_current_to(
        &mut self,
        slots: &[DestinationSlot],
        slot_index: usize,
    ) -> Result<MoveOutcome> {
        let Some(index) = self.selected else {
            return Ok(MoveOutcome::Skipped);
        };
        let Some(slot) = slots.get(slot_index) else {
            return Ok(MoveOutcome::Skipped);
        };
        let Some(folder) = slot.path() else {
            return Ok(MoveOutcome::Skipped);
        };

        let destination = folder.join(&self.entries[index].name);
        fs::create_dir_all(folder)?;
        if destination.exists() {
            return Err(PicsortError::DestinationExists(destination));
        }
        move_file(&self.entries[index].full_path, &destination)?;

        let moved = self.entries.remove(index);
        info!("moved {} -> {}", moved.full_path.display(), destination.display());

        // The entry that followed the moved one now sits at `index`
        self.selected = if index < self.entries.len() {
            Some(index)
        } else {
            None
        };

        Ok(MoveOutcome::Moved {
            destination,
            next: self.selected().cloned(),
        })
    }
}

/// Renames `from` to `to`, falling back to copy-then-delete when the rename
/// fails (typically a cross-device move). The fallback cleans up a partial
/// copy and reports the original rename error.
fn move_file(from: &Path, to: &Path) -> Result<()> {
    let rename_err = match fs::rename(from, to) {
        Ok(()) => return Ok(()),
        Err(e) => e,
    };

    match fs::copy(from, to).and_then(|_| fs::remove_file(from)) {
        Ok(()) => Ok(()),
        Err(_) => {
            let _ = fs::remove_file(to);
            Err(PicsortError::Move {
                from: from.to_path_buf(),
                to: to.to_path_buf(),
                source: rename_err,
            })
        }
    }
}
