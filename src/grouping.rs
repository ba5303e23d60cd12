//! Destination folder slots
//!
//! Four slots, each holding an optional destination folder. A slot's display
//! name is always derived from the path's base name; it cannot drift out of
//! sync with the path.

use crate::config::{normalize_path, Config};
use crate::error::{PicsortError, Result};
use std::path::{Path, PathBuf};
use tracing::info;

/// Number of destination slots, matching the four move shortcut keys
pub const SLOT_COUNT: usize = 4;

/// One destination folder assignment
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DestinationSlot {
    path: Option<PathBuf>,
}

impl DestinationSlot {
    pub fn new(path: PathBuf) -> Self {
        Self { path: Some(path) }
    }

    pub fn unset() -> Self {
        Self { path: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_set(&self) -> bool {
        self.path.is_some()
    }

    /// Base name of the assigned folder, or an empty string when unset
    pub fn display_name(&self) -> String {
        self.path
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    fn from_config_value(value: &str) -> Self {
        if value.is_empty() {
            Self::unset()
        } else {
            Self::new(PathBuf::from(value))
        }
    }
}

/// The panel of destination slots shown under the catalog.
///
/// Slots are read-only to the move operation and the rendering layer;
/// [`GroupingPanel::assign_slot`] is the single mutator.
#[derive(Debug)]
pub struct GroupingPanel {
    slots: Vec<DestinationSlot>,
}

impl GroupingPanel {
    pub fn from_config(config: &Config) -> Self {
        let mut slots: Vec<DestinationSlot> = config
            .folders
            .paths
            .iter()
            .take(SLOT_COUNT)
            .map(|path| DestinationSlot::from_config_value(path))
            .collect();
        slots.resize(SLOT_COUNT, DestinationSlot::unset());
        Self { slots }
    }

    pub fn slots(&self) -> &[DestinationSlot] {
        &self.slots
    }

    /// Assigns `folder` to the slot at `index`, updating path and derived
    /// display name atomically. The folder must be an existing directory;
    /// the picker only ever hands over validated directories, so a failure
    /// here means the caller bypassed it.
    pub fn assign_slot(&mut self, index: usize, folder: &Path) -> Result<&DestinationSlot> {
        if index >= self.slots.len() {
            return Err(PicsortError::UnknownSlot(index));
        }
        if !folder.is_dir() {
            return Err(PicsortError::NotADirectory(folder.to_path_buf()));
        }

        self.slots[index] = DestinationSlot::new(folder.to_path_buf());
        info!("slot {index} -> {}", folder.display());
        Ok(&self.slots[index])
    }

    /// Writes the slot paths back into the configuration for persisting
    pub fn apply_to_config(&self, config: &mut Config) {
        config.folders.paths = self
            .slots
            .iter()
            .map(|slot| {
                slot.path()
                    .map(|p| normalize_path(&p.to_string_lossy()))
                    .unwrap_or_default()
            })
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_display_name_is_derived_from_path() {
        let slot = DestinationSlot::new(PathBuf::from("/srv/photos/holiday"));
        assert_eq!(slot.display_name(), "holiday");
        assert_eq!(DestinationSlot::unset().display_name(), "");
    }

    #[test]
    fn test_panel_from_config_pads_to_slot_count() {
        let mut config = Config::default();
        config.folders.paths = vec!["/srv/a".to_string()];

        let panel = GroupingPanel::from_config(&config);
        assert_eq!(panel.slots().len(), SLOT_COUNT);
        assert!(panel.slots()[0].is_set());
        assert!(!panel.slots()[1].is_set());
    }

    #[test]
    fn test_assign_slot_updates_path_and_name() {
        let dir = TempDir::new().unwrap();
        let mut panel = GroupingPanel::from_config(&Config::default());

        let slot = panel.assign_slot(2, dir.path()).unwrap();
        assert_eq!(slot.path().unwrap(), dir.path());
        assert_eq!(
            slot.display_name(),
            dir.path().file_name().unwrap().to_string_lossy()
        );
    }

    #[test]
    fn test_assign_slot_rejects_missing_directory() {
        let mut panel = GroupingPanel::from_config(&Config::default());
        let result = panel.assign_slot(0, Path::new("/no/such/place"));
        assert!(matches!(result, Err(PicsortError::NotADirectory(_))));
        assert!(!panel.slots()[0].is_set());
    }

    #[test]
    fn test_assign_slot_rejects_bad_index() {
        let dir = TempDir::new().unwrap();
        let mut panel = GroupingPanel::from_config(&Config::default());
        let result = panel.assign_slot(SLOT_COUNT, dir.path());
        assert!(matches!(result, Err(PicsortError::UnknownSlot(_))));
    }

    #[test]
    fn test_apply_to_config_round_trips_assignments() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        let mut panel = GroupingPanel::from_config(&config);
        panel.assign_slot(1, dir.path()).unwrap();

        panel.apply_to_config(&mut config);
        assert_eq!(config.folders.paths.len(), SLOT_COUNT);
        assert_eq!(
            config.folders.paths[1],
            normalize_path(&dir.path().to_string_lossy())
        );
        assert_eq!(config.folders.paths[0], "");

        let reloaded = GroupingPanel::from_config(&config);
        assert_eq!(reloaded.slots(), panel.slots());
    }
}
