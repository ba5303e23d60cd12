//! Image catalog: folder scan, ordering, and selection
//!
//! The catalog holds one row per image discovered under a source folder,
//! keeps them in a sortable order, and tracks the single active selection.
//! Moving the selected image out of the catalog lives in [`mover`].

pub mod mover;

pub use mover::MoveOutcome;

use chrono::{DateTime, Local};
use image::ImageReader;
use std::cmp::Ordering;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::WalkDir;

/// One row of the catalog. Created during a scan and never mutated;
/// entries only ever leave the catalog (on move or rescan).
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    /// Base file name, for display
    pub name: String,
    /// Canonical path; unique key within one catalog snapshot
    pub full_path: PathBuf,
    /// Pixel dimensions read once at scan time
    pub dimensions: (u32, u32),
    /// Width/height reduced to lowest terms
    pub aspect_ratio: (u32, u32),
    /// Lower-cased suffix including the leading dot
    pub extension: String,
    /// File creation time, or modification time where unavailable
    pub created_at: DateTime<Local>,
}

impl CatalogEntry {
    /// Builds an entry for `path`, returning `None` when the file cannot be
    /// decoded as an image. Scan-time failures are deliberately silent.
    fn read(path: &Path) -> Option<Self> {
        let dimensions = ImageReader::open(path)
            .ok()?
            .with_guessed_format()
            .ok()?
            .into_dimensions()
            .map_err(|e| trace!("skipping {}: {e}", path.display()))
            .ok()?;

        let metadata = fs::metadata(path).ok()?;
        let created = metadata.created().or_else(|_| metadata.modified()).ok()?;

        let name = path.file_name()?.to_string_lossy().to_string();
        let extension = path
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
            .unwrap_or_default();

        let divisor = gcd(dimensions.0, dimensions.1);
        Some(CatalogEntry {
            name,
            full_path: path.to_path_buf(),
            dimensions,
            aspect_ratio: (dimensions.0 / divisor, dimensions.1 / divisor),
            extension,
            created_at: DateTime::from(created),
        })
    }

    pub fn dimensions_display(&self) -> String {
        format!("{} x {}", self.dimensions.0, self.dimensions.1)
    }

    pub fn ratio_display(&self) -> String {
        format!("{}:{}", self.aspect_ratio.0, self.aspect_ratio.1)
    }

    pub fn created_display(&self) -> String {
        self.created_at.format("%Y/%m/%d %H:%M").to_string()
    }
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a.max(1)
}

/// Columns the catalog can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Name,
    Dimensions,
    AspectRatio,
    Extension,
    CreatedAt,
}

impl SortColumn {
    fn compare(self, a: &CatalogEntry, b: &CatalogEntry) -> Ordering {
        match self {
            SortColumn::Name => a.name.cmp(&b.name),
            SortColumn::Dimensions => a.dimensions.cmp(&b.dimensions),
            // Cross-multiplied so 16:9 orders after 4:3 without float math
            SortColumn::AspectRatio => {
                let left = a.aspect_ratio.0 as u64 * b.aspect_ratio.1 as u64;
                let right = b.aspect_ratio.0 as u64 * a.aspect_ratio.1 as u64;
                left.cmp(&right)
            }
            SortColumn::Extension => a.extension.cmp(&b.extension),
            SortColumn::CreatedAt => a.created_at.cmp(&b.created_at),
        }
    }
}

/// Ordered, selectable list of images under one source folder.
///
/// Invariant: at most one entry is selected, and a selection always refers
/// to an entry still present in `entries`.
#[derive(Debug)]
pub struct Catalog {
    folder: PathBuf,
    entries: Vec<CatalogEntry>,
    selected: Option<usize>,
    sort_state: Option<(SortColumn, bool)>,
}

impl Catalog {
    /// Walks `folder` recursively and catalogs every file whose lower-cased
    /// extension is in `extensions` and whose dimensions can be read.
    /// Unreadable or corrupt images are skipped without an error. The first
    /// entry, if any, is auto-selected.
    pub fn scan(folder: &Path, extensions: &[String]) -> io::Result<Catalog> {
        let mut entries = Vec::new();
        for entry in WalkDir::new(folder).into_iter().filter_map(|e| e.ok()) {
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            let ext = match path.extension() {
                Some(ext) => format!(".{}", ext.to_string_lossy().to_lowercase()),
                None => continue,
            };
            if !extensions.iter().any(|supported| *supported == ext) {
                continue;
            }
            if let Some(row) = CatalogEntry::read(path) {
                entries.push(row);
            }
        }

        debug!("scanned {}: {} images", folder.display(), entries.len());
        let selected = if entries.is_empty() { None } else { Some(0) };
        Ok(Catalog {
            folder: folder.to_path_buf(),
            entries,
            selected,
            sort_state: None,
        })
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn selected(&self) -> Option<&CatalogEntry> {
        self.selected.map(|index| &self.entries[index])
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Current sort column and direction, if the catalog has been sorted
    pub fn sort_state(&self) -> Option<(SortColumn, bool)> {
        self.sort_state
    }

    /// Moves the selection down one row. No wraparound: at the last row, or
    /// with no selection at all, this is a no-op returning `None`.
    pub fn select_next(&mut self) -> Option<&CatalogEntry> {
        let index = self.selected?;
        if index + 1 >= self.entries.len() {
            return None;
        }
        self.selected = Some(index + 1);
        self.selected()
    }

    /// Moves the selection up one row; the mirror of [`Self::select_next`].
    pub fn select_previous(&mut self) -> Option<&CatalogEntry> {
        let index = self.selected?;
        if index == 0 {
            return None;
        }
        self.selected = Some(index - 1);
        self.selected()
    }

    /// Re-orders by `column`, toggling direction when the same column is
    /// sorted twice in a row.
    pub fn sort_by(&mut self, column: SortColumn) {
        let descending = match self.sort_state {
            Some((current, descending)) if current == column => !descending,
            _ => false,
        };
        self.sort_by_with(column, descending);
    }

    /// Re-orders by `column` in the given direction. The sort is stable, so
    /// ties keep their previous relative order, and the selection follows
    /// its entry to the entry's new position.
    pub fn sort_by_with(&mut self, column: SortColumn, descending: bool) {
        let selected_path = self.selected().map(|entry| entry.full_path.clone());

        self.entries.sort_by(|a, b| {
            if descending {
                column.compare(b, a)
            } else {
                column.compare(a, b)
            }
        });
        self.sort_state = Some((column, descending));

        if let Some(path) = selected_path {
            self.selected = self.entries.iter().position(|e| e.full_path == path);
        }
    }
}
