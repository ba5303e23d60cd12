//! The image renderer: owns the currently loaded image and derives a
//! pane-sized copy from it on demand.
//!
//! The source image is never resampled in place. Every render starts from
//! the original, so repeated resizes cannot degrade quality.

use crate::error::{PicsortError, Result};
use image::imageops::FilterType;
use image::DynamicImage;
use std::path::{Path, PathBuf};
use tracing::debug;

/// How the loaded image maps onto the viewing pane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZoomMode {
    /// Scale to fit the pane, preserving aspect ratio
    #[default]
    Fit,
    /// Pixel-for-pixel, clipped by the pane
    Original,
}

impl ZoomMode {
    pub fn toggled(self) -> Self {
        match self {
            ZoomMode::Fit => ZoomMode::Original,
            ZoomMode::Original => ZoomMode::Fit,
        }
    }
}

/// Scale-to-fit target size: `min(pane_w/img_w, pane_h/img_h)` applied to
/// both axes, floored, and clamped to at least one pixel per axis.
pub fn fit_dimensions(image: (u32, u32), pane: (u32, u32)) -> (u32, u32) {
    let (img_w, img_h) = image;
    if img_w == 0 || img_h == 0 {
        return (1, 1);
    }
    let scale = (pane.0 as f64 / img_w as f64).min(pane.1 as f64 / img_h as f64);
    let width = ((img_w as f64 * scale).floor() as u32).max(1);
    let height = ((img_h as f64 * scale).floor() as u32).max(1);
    (width, height)
}

struct LoadedImage {
    path: PathBuf,
    image: DynamicImage,
}

struct RenderedFrame {
    pane: (u32, u32),
    zoom: ZoomMode,
    image: DynamicImage,
}

/// Currently displayed image plus its derived pane-sized frame
#[derive(Default)]
pub struct DisplayState {
    source: Option<LoadedImage>,
    zoom: ZoomMode,
    frame: Option<RenderedFrame>,
}

impl DisplayState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes the image at `path` and makes it current.
    ///
    /// Unlike the bulk scan, a failure here is surfaced: the user asked for
    /// this specific file. The previous image stays on display.
    pub fn load(&mut self, path: &Path) -> Result<()> {
        let image = image::open(path).map_err(|source| PicsortError::ImageLoad {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("loaded {} ({}x{})", path.display(), image.width(), image.height());
        self.source = Some(LoadedImage {
            path: path.to_path_buf(),
            image,
        });
        self.frame = None;
        Ok(())
    }

    /// Drops the current image; the pane goes blank.
    pub fn clear(&mut self) {
        self.source = None;
        self.frame = None;
    }

    pub fn has_image(&self) -> bool {
        self.source.is_some()
    }

    pub fn current_path(&self) -> Option<&Path> {
        self.source.as_ref().map(|loaded| loaded.path.as_path())
    }

    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.source
            .as_ref()
            .map(|loaded| (loaded.image.width(), loaded.image.height()))
    }

    pub fn zoom(&self) -> ZoomMode {
        self.zoom
    }

    pub fn set_zoom(&mut self, zoom: ZoomMode) {
        if self.zoom != zoom {
            self.zoom = zoom;
            self.frame = None;
        }
    }

    pub fn toggle_zoom(&mut self) -> ZoomMode {
        self.set_zoom(self.zoom.toggled());
        self.zoom
    }

    /// Returns the image derived for `pane`, recomputing only when the pane
    /// size or zoom mode changed since the last call.
    pub fn render(&mut self, pane: (u32, u32)) -> Option<&DynamicImage> {
        let source = self.source.as_ref()?;

        let stale = !matches!(
            &self.frame,
            Some(frame) if frame.pane == pane && frame.zoom == self.zoom
        );
        if stale {
            let image = match self.zoom {
                ZoomMode::Fit => {
                    let (w, h) = fit_dimensions((source.image.width(), source.image.height()), pane);
                    source.image.resize_exact(w, h, FilterType::Lanczos3)
                }
                ZoomMode::Original => source.image.clone(),
            };
            self.frame = Some(RenderedFrame {
                pane,
                zoom: self.zoom,
                image,
            });
        }
        self.frame.as_ref().map(|frame| &frame.image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;
    use std::fs;
    use tempfile::TempDir;

    fn write_image(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
        let path = dir.join(name);
        RgbImage::new(width, height).save(&path).unwrap();
        path
    }

    #[test]
    fn test_fit_scales_down_preserving_aspect() {
        assert_eq!(fit_dimensions((1000, 500), (100, 100)), (100, 50));
        assert_eq!(fit_dimensions((500, 1000), (100, 100)), (50, 100));
    }

    #[test]
    fn test_fit_scales_up_small_images() {
        assert_eq!(fit_dimensions((10, 10), (100, 80)), (80, 80));
    }

    #[test]
    fn test_fit_never_returns_a_zero_axis() {
        assert_eq!(fit_dimensions((1000, 10), (10, 10)).1, 1);
        assert_eq!(fit_dimensions((10, 1000), (10, 10)).0, 1);
        assert_eq!(fit_dimensions((10, 10), (0, 0)), (1, 1));
    }

    #[test]
    fn test_load_and_render_fit() {
        let dir = TempDir::new().unwrap();
        let path = write_image(dir.path(), "wide.png", 40, 20);

        let mut display = DisplayState::new();
        display.load(&path).unwrap();
        assert_eq!(display.dimensions(), Some((40, 20)));

        let frame = display.render((10, 10)).unwrap();
        assert_eq!((frame.width(), frame.height()), (10, 5));
    }

    #[test]
    fn test_render_original_keeps_source_size() {
        let dir = TempDir::new().unwrap();
        let path = write_image(dir.path(), "img.png", 8, 6);

        let mut display = DisplayState::new();
        display.load(&path).unwrap();
        display.set_zoom(ZoomMode::Original);

        let frame = display.render((2, 2)).unwrap();
        assert_eq!((frame.width(), frame.height()), (8, 6));
    }

    #[test]
    fn test_zoom_toggle_rederives_from_source() {
        let dir = TempDir::new().unwrap();
        let path = write_image(dir.path(), "img.png", 8, 6);

        let mut display = DisplayState::new();
        display.load(&path).unwrap();

        let fitted = display.render((4, 4)).unwrap();
        assert!(fitted.width() < 8);

        display.toggle_zoom();
        let original = display.render((4, 4)).unwrap();
        assert_eq!((original.width(), original.height()), (8, 6));

        display.toggle_zoom();
        let refitted = display.render((4, 4)).unwrap();
        assert!(refitted.width() < 8);
    }

    #[test]
    fn test_failed_load_is_surfaced_and_display_unchanged() {
        let dir = TempDir::new().unwrap();
        let good = write_image(dir.path(), "good.png", 4, 4);
        let bad = dir.path().join("bad.png");
        fs::write(&bad, b"not an image").unwrap();

        let mut display = DisplayState::new();
        display.load(&good).unwrap();

        let result = display.load(&bad);
        assert!(matches!(result, Err(PicsortError::ImageLoad { .. })));
        assert_eq!(display.current_path(), Some(good.as_path()));
        assert!(display.has_image());
    }

    #[test]
    fn test_clear_blanks_the_pane() {
        let dir = TempDir::new().unwrap();
        let path = write_image(dir.path(), "img.png", 4, 4);

        let mut display = DisplayState::new();
        display.load(&path).unwrap();
        display.clear();
        assert!(!display.has_image());
        assert!(display.render((10, 10)).is_none());
    }
}
