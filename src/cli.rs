// CLI module for argument parsing

use crate::catalog::SortColumn;
use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

/// Picsort - keyboard-driven image triage for the terminal
///
/// Review the images in a folder one by one and move each into one of four
/// destination folders with a single keypress.
#[derive(Parser, Debug, Clone)]
#[command(name = "picsort")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Folder to scan for images
    ///
    /// If not specified, the last opened folder from the configuration is
    /// reopened (when it still exists).
    pub directory: Option<PathBuf>,

    /// Sort the catalog by this column on startup
    #[arg(short = 's', long = "sort", value_enum)]
    pub sort: Option<SortColumnArg>,

    /// Reverse the initial sort order
    #[arg(short = 'r', long = "reverse", action = ArgAction::SetTrue)]
    pub reverse: bool,

    /// Use an alternate configuration file
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
}

/// Sortable catalog columns as CLI values
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortColumnArg {
    /// File name (alphabetical)
    Name,
    /// Pixel dimensions
    Size,
    /// Aspect ratio
    Ratio,
    /// File extension
    Ext,
    /// Creation time
    Created,
}

impl From<SortColumnArg> for SortColumn {
    fn from(arg: SortColumnArg) -> Self {
        match arg {
            SortColumnArg::Name => SortColumn::Name,
            SortColumnArg::Size => SortColumn::Dimensions,
            SortColumnArg::Ratio => SortColumn::AspectRatio,
            SortColumnArg::Ext => SortColumn::Extension,
            SortColumnArg::Created => SortColumn::CreatedAt,
        }
    }
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Args::parse()
    }

    /// Validate the arguments and return any errors
    pub fn validate(&self) -> Result<(), String> {
        if let Some(directory) = &self.directory {
            if !directory.exists() {
                return Err(format!("Directory does not exist: {}", directory.display()));
            }
            if !directory.is_dir() {
                return Err(format!("Path is not a directory: {}", directory.display()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_validate_accepts_missing_directory_argument() {
        let args = Args::parse_from(["picsort"]);
        assert!(args.validate().is_ok());
        assert!(args.directory.is_none());
    }

    #[test]
    fn test_validate_accepts_existing_directory() {
        let dir = TempDir::new().unwrap();
        let args = Args::parse_from(["picsort", dir.path().to_str().unwrap()]);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_nonexistent_directory() {
        let args = Args::parse_from(["picsort", "/no/such/folder"]);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_file_as_directory() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("plain.txt");
        std::fs::write(&file, "x").unwrap();

        let args = Args::parse_from(["picsort", file.to_str().unwrap()]);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_sort_argument_maps_to_catalog_column() {
        let args = Args::parse_from(["picsort", "--sort", "ratio"]);
        assert_eq!(
            SortColumn::from(args.sort.unwrap()),
            SortColumn::AspectRatio
        );
    }
}
