//! Picsort - a keyboard-driven image triage library
//!
//! This crate provides the core functionality for the Picsort application:
//! scanning a folder tree for images, navigating and sorting the resulting
//! catalog, rendering the selected image to fit a pane, and moving images
//! into user-configured destination folders.

pub mod app;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod grouping;
pub mod tui;

// Re-export primary types for convenience
pub use app::{App, Outcome};
pub use catalog::{Catalog, CatalogEntry, MoveOutcome, SortColumn};
pub use config::{Config, ConfigStore};
pub use display::{DisplayState, ZoomMode};
pub use error::{PicsortError, Result};
pub use grouping::{DestinationSlot, GroupingPanel, SLOT_COUNT};
