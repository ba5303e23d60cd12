//! Error types shared across the crate

use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PicsortError>;

#[derive(Debug, Error)]
pub enum PicsortError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to load image {}: {source}", path.display())]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("destination already contains {}", .0.display())]
    DestinationExists(PathBuf),

    #[error("failed to move {} to {}: {source}", from.display(), to.display())]
    Move {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no destination slot {0}")]
    UnknownSlot(usize),

    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error(transparent)]
    Io(#[from] io::Error),
}
