//! Application state and the action handler
//!
//! [`App`] couples the catalog, the renderer, the grouping panel, and the
//! configuration store. The main loop feeds it [`Action`]s; everything that
//! happens to the state happens here, so the whole control flow is testable
//! without a terminal.

use crate::catalog::{Catalog, MoveOutcome};
use crate::config::{normalize_path, Config, ConfigStore};
use crate::display::DisplayState;
use crate::error::Result;
use crate::grouping::{GroupingPanel, SLOT_COUNT};
use crate::tui::Action;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// What the folder prompt is being opened for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptTarget {
    /// Choose a new source folder to scan
    SourceFolder,
    /// Assign a destination folder to a slot
    Slot(usize),
}

/// What the main loop should do after an action was applied
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    /// Open the folder prompt with the given target and initial text
    OpenPrompt(PromptTarget, String),
    Quit,
}

pub struct App {
    pub config: Config,
    store: ConfigStore,
    pub catalog: Option<Catalog>,
    pub display: DisplayState,
    pub panel: GroupingPanel,
    /// One-line user-visible message shown in the footer
    pub status: Option<String>,
}

impl App {
    pub fn new(mut store: ConfigStore) -> Self {
        let config = store.load().clone();
        let panel = GroupingPanel::from_config(&config);
        Self {
            config,
            store,
            catalog: None,
            display: DisplayState::new(),
            panel,
            status: None,
        }
    }

    /// Scans `folder` into a fresh catalog, shows its first image, and
    /// persists the folder as the last opened directory.
    pub fn open_folder(&mut self, folder: &Path) -> Result<()> {
        let catalog = Catalog::scan(folder, &self.config.images.supported_extensions)?;
        self.status = Some(format!(
            "{}: {} images",
            folder.display(),
            catalog.len()
        ));
        self.catalog = Some(catalog);
        self.show_selected();

        self.config.viewer.last_opened_directory =
            normalize_path(&folder.to_string_lossy());
        self.save_config();
        Ok(())
    }

    /// Assigns `folder` to a destination slot and writes the configuration
    /// through to disk.
    pub fn assign_slot(&mut self, index: usize, folder: &Path) -> Result<()> {
        let name = self.panel.assign_slot(index, folder)?.display_name();
        self.status = Some(format!("slot {} -> {name}", index + 1));
        self.save_config();
        Ok(())
    }

    /// Handles the result of the folder prompt. An empty input or a path
    /// that is not an existing directory is reported, not applied.
    pub fn accept_prompt(&mut self, target: PromptTarget, input: &str) {
        let input = input.trim();
        if input.is_empty() {
            return;
        }
        let folder = PathBuf::from(input);
        if !folder.is_dir() {
            self.status = Some(format!("not a directory: {input}"));
            return;
        }
        let result = match target {
            PromptTarget::SourceFolder => self.open_folder(&folder),
            PromptTarget::Slot(index) => self.assign_slot(index, &folder),
        };
        if let Err(e) = result {
            warn!("prompt action failed: {e}");
            self.status = Some(e.to_string());
        }
    }

    /// Applies one routed action and reports what the main loop should do.
    pub fn apply_action(&mut self, action: Action) -> Outcome {
        match action {
            Action::Quit => {
                self.save_config();
                return Outcome::Quit;
            }
            Action::Next => {
                let changed = self
                    .catalog
                    .as_mut()
                    .and_then(|catalog| catalog.select_next())
                    .is_some();
                if changed {
                    self.show_selected();
                }
            }
            Action::Previous => {
                let changed = self
                    .catalog
                    .as_mut()
                    .and_then(|catalog| catalog.select_previous())
                    .is_some();
                if changed {
                    self.show_selected();
                }
            }
            Action::MoveToSlot(slot) => self.move_current_to(slot),
            Action::SortBy(column) => {
                // Selection follows its entry, so the displayed image is unchanged
                if let Some(catalog) = self.catalog.as_mut() {
                    catalog.sort_by(column);
                }
            }
            Action::OpenFolder => {
                let initial = self.config.viewer.last_opened_directory.clone();
                return Outcome::OpenPrompt(PromptTarget::SourceFolder, initial);
            }
            Action::AssignSlot(slot) => {
                if slot < SLOT_COUNT {
                    return Outcome::OpenPrompt(PromptTarget::Slot(slot), String::new());
                }
            }
            Action::ToggleZoom => {
                let zoom = self.display.toggle_zoom();
                self.status = Some(format!("zoom: {zoom:?}"));
            }
            Action::DebugState => {
                debug!(
                    "state: folder={:?} selected={:?} zoom={:?}",
                    self.catalog.as_ref().map(|c| c.folder().display().to_string()),
                    self.catalog
                        .as_ref()
                        .and_then(|c| c.selected())
                        .map(|e| e.name.clone()),
                    self.display.zoom(),
                );
            }
            Action::None => {}
        }
        Outcome::Continue
    }

    fn move_current_to(&mut self, slot: usize) {
        let Some(catalog) = self.catalog.as_mut() else {
            return;
        };
        match catalog.move_current_to(self.panel.slots(), slot) {
            Ok(MoveOutcome::Moved { destination, .. }) => {
                self.status = Some(format!("moved to {}", destination.display()));
                self.show_selected();
            }
            // Unmet precondition: the key does nothing when not configured
            Ok(MoveOutcome::Skipped) => {}
            Err(e) => {
                warn!("move failed: {e}");
                self.status = Some(e.to_string());
            }
        }
    }

    /// Forwards the catalog selection to the renderer. A load failure is a
    /// user-facing error; the previous image stays up.
    fn show_selected(&mut self) {
        let selected = self
            .catalog
            .as_ref()
            .and_then(|catalog| catalog.selected())
            .map(|entry| entry.full_path.clone());
        match selected {
            Some(path) => {
                if let Err(e) = self.display.load(&path) {
                    warn!("{e}");
                    self.status = Some(e.to_string());
                }
            }
            None => self.display.clear(),
        }
    }

    fn save_config(&mut self) {
        self.panel.apply_to_config(&mut self.config);
        if let Err(e) = self.store.save(self.config.clone()) {
            warn!("could not save configuration: {e}");
            self.status = Some(format!("could not save configuration: {e}"));
        } else {
            self.config = self.store.load().clone();
        }
    }
}
