use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, ManageFocus, Mode, Route};
use crate::keymap::Keymap;

/// Input action that can be performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    // Stage paging
    PageNext,
    PagePrevious,
    PageFirst,
    PageLast,
    // Navbar entries
    NavIntroduction,
    NavNews,
    // Lists
    MoveDown,
    MoveUp,
    LoadMore,
    OpenImage,
    Select,
    // Routes and session
    Login,
    Logout,
    Manage,
    Help,
    ExitMode,
    // Manage console
    NewItem,
    EditItem,
    DeleteItem,
    FocusEditor,
    // Forms
    NextField,
    PrevField,
    Submit,
    SwitchForm,
    InputChar(char),
    Backspace,
    // Confirmation popups
    Confirm,
    Cancel,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App, keymap: &Keymap) -> Action {
    match &app.mode {
        Mode::DeleteConfirm(_) => return handle_confirm_mode(key),
        // Any key closes help
        Mode::Help => return Action::ExitMode,
        Mode::Normal => {}
    }

    if app.is_input_mode() {
        return handle_input_mode(key);
    }

    if app.route == Route::Manage && app.manage_focus == ManageFocus::List {
        match (key.code, key.modifiers) {
            (KeyCode::Char('n'), KeyModifiers::NONE) => return Action::NewItem,
            (KeyCode::Char('e'), KeyModifiers::NONE) => return Action::EditItem,
            (KeyCode::Char('d'), KeyModifiers::NONE) => return Action::DeleteItem,
            (KeyCode::Tab, _) => return Action::FocusEditor,
            _ => {}
        }
    }

    let action = keymap.lookup(&key).unwrap_or(Action::None);

    // Outside the stage the paging keys walk lists instead
    match (app.route, action) {
        (Route::Manage, Action::PageNext) => Action::MoveDown,
        (Route::Manage, Action::PagePrevious) => Action::MoveUp,
        (_, action) => action,
    }
}

/// Handle key events while a form owns the keyboard
fn handle_input_mode(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,
        (KeyCode::Char('r'), KeyModifiers::CONTROL) => Action::SwitchForm,
        (KeyCode::Enter, _) => Action::Submit,
        (KeyCode::Esc, _) => Action::Cancel,
        (KeyCode::Tab, _) | (KeyCode::Down, _) => Action::NextField,
        (KeyCode::BackTab, _) | (KeyCode::Up, _) => Action::PrevField,
        (KeyCode::Backspace, _) => Action::Backspace,
        (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
            Action::InputChar(c)
        }
        _ => Action::None,
    }
}

/// Handle key events in confirmation mode
fn handle_confirm_mode(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Action::Confirm,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Action::Cancel,
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_confirm_mode() {
        assert_eq!(handle_confirm_mode(key(KeyCode::Char('y'))), Action::Confirm);
        assert_eq!(handle_confirm_mode(key(KeyCode::Esc)), Action::Cancel);
        assert_eq!(handle_confirm_mode(key(KeyCode::Char('x'))), Action::None);
    }

    #[test]
    fn test_input_mode() {
        assert_eq!(handle_input_mode(key(KeyCode::Char('a'))), Action::InputChar('a'));
        assert_eq!(
            handle_input_mode(KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT)),
            Action::InputChar('A')
        );
        assert_eq!(handle_input_mode(key(KeyCode::Enter)), Action::Submit);
        assert_eq!(handle_input_mode(key(KeyCode::BackTab)), Action::PrevField);
        assert_eq!(
            handle_input_mode(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL)),
            Action::SwitchForm
        );
    }
}
