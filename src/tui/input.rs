//! Keyboard dispatch: one action enum, one key map
//!
//! Key identity is decoupled from behavior; the main loop only ever sees
//! [`Action`] values.

use crate::catalog::SortColumn;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Keys that move an image map to slots in order: z, x, c, v.
/// The shifted variants assign a folder to the same slot.
const SLOT_KEYS: [char; 4] = ['z', 'x', 'c', 'v'];

/// Everything a key press can mean while browsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application
    Quit,
    /// Select the next catalog entry
    Next,
    /// Select the previous catalog entry
    Previous,
    /// Move the selected image into a destination slot
    MoveToSlot(usize),
    /// Pick a folder for a destination slot
    AssignSlot(usize),
    /// Pick a new source folder to scan
    OpenFolder,
    /// Re-order the catalog by a column
    SortBy(SortColumn),
    /// Switch between fit-to-pane and original size
    ToggleZoom,
    /// Log the current UI state (diagnostic only)
    DebugState,
    /// No action
    None,
}

/// Maps a key event to an [`Action`] for the browsing view
pub fn handle_key_event(key: KeyEvent) -> Action {
    if let Some(slot) = slot_for_key(key) {
        return slot;
    }

    match (key.code, key.modifiers) {
        (KeyCode::Esc, KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,

        (KeyCode::Down, KeyModifiers::NONE) => Action::Next,
        (KeyCode::Up, KeyModifiers::NONE) => Action::Previous,

        (KeyCode::Char(' '), KeyModifiers::NONE) => Action::OpenFolder,
        (KeyCode::Char('o'), KeyModifiers::NONE) => Action::ToggleZoom,

        (KeyCode::Char('1'), KeyModifiers::NONE) => Action::SortBy(SortColumn::Name),
        (KeyCode::Char('2'), KeyModifiers::NONE) => Action::SortBy(SortColumn::Dimensions),
        (KeyCode::Char('3'), KeyModifiers::NONE) => Action::SortBy(SortColumn::AspectRatio),
        (KeyCode::Char('4'), KeyModifiers::NONE) => Action::SortBy(SortColumn::Extension),
        (KeyCode::Char('5'), KeyModifiers::NONE) => Action::SortBy(SortColumn::CreatedAt),

        (KeyCode::F(1), KeyModifiers::NONE) => Action::DebugState,

        _ => Action::None,
    }
}

fn slot_for_key(key: KeyEvent) -> Option<Action> {
    let KeyCode::Char(pressed) = key.code else {
        return None;
    };
    for (slot, &letter) in SLOT_KEYS.iter().enumerate() {
        if key.modifiers == KeyModifiers::NONE && pressed == letter {
            return Some(Action::MoveToSlot(slot));
        }
        if key.modifiers == KeyModifiers::SHIFT && pressed == letter.to_ascii_uppercase() {
            return Some(Action::AssignSlot(slot));
        }
    }
    None
}

/// Input for the folder-path prompt overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptAction {
    /// Append a character to the path being typed
    Input(char),
    /// Delete the last character
    Backspace,
    /// Submit the typed path
    Accept,
    /// Dismiss the prompt without a result
    Cancel,
    /// No action
    None,
}

/// Maps a key event to a [`PromptAction`] while the prompt overlay is open
pub fn handle_prompt_input(key: KeyEvent) -> PromptAction {
    match (key.code, key.modifiers) {
        (KeyCode::Esc, KeyModifiers::NONE) => PromptAction::Cancel,
        (KeyCode::Enter, KeyModifiers::NONE) => PromptAction::Accept,
        (KeyCode::Backspace, _) => PromptAction::Backspace,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => PromptAction::Cancel,
        (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => PromptAction::Input(c),
        _ => PromptAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_key_quit() {
        assert_eq!(handle_key_event(press(KeyCode::Esc)), Action::Quit);
        assert_eq!(handle_key_event(press(KeyCode::Char('q'))), Action::Quit);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(ctrl_c), Action::Quit);
    }

    #[test]
    fn test_key_navigation() {
        assert_eq!(handle_key_event(press(KeyCode::Down)), Action::Next);
        assert_eq!(handle_key_event(press(KeyCode::Up)), Action::Previous);
    }

    #[test]
    fn test_key_move_to_slots() {
        assert_eq!(
            handle_key_event(press(KeyCode::Char('z'))),
            Action::MoveToSlot(0)
        );
        assert_eq!(
            handle_key_event(press(KeyCode::Char('x'))),
            Action::MoveToSlot(1)
        );
        assert_eq!(
            handle_key_event(press(KeyCode::Char('c'))),
            Action::MoveToSlot(2)
        );
        assert_eq!(
            handle_key_event(press(KeyCode::Char('v'))),
            Action::MoveToSlot(3)
        );
    }

    #[test]
    fn test_key_assign_slots_shifted() {
        let shift_z = KeyEvent::new(KeyCode::Char('Z'), KeyModifiers::SHIFT);
        assert_eq!(handle_key_event(shift_z), Action::AssignSlot(0));
        let shift_v = KeyEvent::new(KeyCode::Char('V'), KeyModifiers::SHIFT);
        assert_eq!(handle_key_event(shift_v), Action::AssignSlot(3));
    }

    #[test]
    fn test_key_open_folder_and_zoom() {
        assert_eq!(handle_key_event(press(KeyCode::Char(' '))), Action::OpenFolder);
        assert_eq!(handle_key_event(press(KeyCode::Char('o'))), Action::ToggleZoom);
    }

    #[test]
    fn test_key_sort_columns() {
        assert_eq!(
            handle_key_event(press(KeyCode::Char('1'))),
            Action::SortBy(SortColumn::Name)
        );
        assert_eq!(
            handle_key_event(press(KeyCode::Char('5'))),
            Action::SortBy(SortColumn::CreatedAt)
        );
    }

    #[test]
    fn test_key_debug_state() {
        assert_eq!(handle_key_event(press(KeyCode::F(1))), Action::DebugState);
    }

    #[test]
    fn test_key_none() {
        assert_eq!(handle_key_event(press(KeyCode::Char('m'))), Action::None);
        assert_eq!(handle_key_event(press(KeyCode::Home)), Action::None);
    }

    #[test]
    fn test_prompt_accept_and_cancel() {
        assert_eq!(handle_prompt_input(press(KeyCode::Enter)), PromptAction::Accept);
        assert_eq!(handle_prompt_input(press(KeyCode::Esc)), PromptAction::Cancel);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_prompt_input(ctrl_c), PromptAction::Cancel);
    }

    #[test]
    fn test_prompt_text_entry() {
        assert_eq!(
            handle_prompt_input(press(KeyCode::Char('/'))),
            PromptAction::Input('/')
        );
        let shifted = KeyEvent::new(KeyCode::Char('P'), KeyModifiers::SHIFT);
        assert_eq!(handle_prompt_input(shifted), PromptAction::Input('P'));
        assert_eq!(
            handle_prompt_input(press(KeyCode::Backspace)),
            PromptAction::Backspace
        );
    }
}
