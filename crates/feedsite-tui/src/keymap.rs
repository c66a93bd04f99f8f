use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use feedsite_core::config::KeymapConfig;
use tracing::warn;

use crate::input::Action;

/// Parsed key binding (key code + modifiers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn simple(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CONTROL)
    }

    pub fn shift(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::SHIFT)
    }
}

/// Runtime keymap for key-to-action lookup
pub struct Keymap {
    bindings: HashMap<KeyBinding, Action>,
}

impl Default for Keymap {
    fn default() -> Self {
        Self::from_config(&KeymapConfig::default())
    }
}

impl Keymap {
    /// Create a keymap from configuration
    pub fn from_config(config: &KeymapConfig) -> Self {
        let mut bindings = HashMap::new();

        let mut add_binding = |key_str: &str, action: Action| {
            if let Some(binding) = parse_key_binding(key_str) {
                if let Some(existing) = bindings.get(&binding) {
                    warn!(
                        "Key conflict: '{}' already bound to {:?}, ignoring binding to {:?}",
                        key_str, existing, action
                    );
                } else {
                    bindings.insert(binding, action);
                }
            } else {
                warn!("Invalid key binding: '{}', ignoring", key_str);
            }
        };

        add_binding(&config.quit, Action::Quit);
        add_binding(&config.page_down, Action::PageNext);
        add_binding(&config.page_up, Action::PagePrevious);
        add_binding(&config.first_page, Action::PageFirst);
        add_binding(&config.last_page, Action::PageLast);
        add_binding(&config.nav_introduction, Action::NavIntroduction);
        add_binding(&config.nav_news, Action::NavNews);
        add_binding(&config.move_down, Action::MoveDown);
        add_binding(&config.move_up, Action::MoveUp);
        add_binding(&config.load_more, Action::LoadMore);
        add_binding(&config.open_image, Action::OpenImage);
        add_binding(&config.login, Action::Login);
        add_binding(&config.logout, Action::Logout);
        add_binding(&config.manage, Action::Manage);
        add_binding(&config.help, Action::Help);

        // Ctrl+C always quits
        bindings.insert(KeyBinding::ctrl(KeyCode::Char('c')), Action::Quit);
        // Arrow keys page like PageDown/PageUp
        bindings.entry(KeyBinding::simple(KeyCode::Down)).or_insert(Action::PageNext);
        bindings.entry(KeyBinding::simple(KeyCode::Up)).or_insert(Action::PagePrevious);
        bindings.entry(KeyBinding::simple(KeyCode::Enter)).or_insert(Action::Select);
        bindings.insert(KeyBinding::simple(KeyCode::Esc), Action::ExitMode);

        Self { bindings }
    }

    /// Get action for a key binding
    pub fn get(&self, binding: &KeyBinding) -> Option<&Action> {
        self.bindings.get(binding)
    }

    /// Resolve a key event
    ///
    /// Terminals disagree on whether shifted symbols like `?` carry the
    /// SHIFT modifier, so a miss is retried with SHIFT toggled.
    pub fn lookup(&self, key: &KeyEvent) -> Option<Action> {
        let binding = KeyBinding::new(key.code, key.modifiers);
        if let Some(action) = self.bindings.get(&binding) {
            return Some(action.clone());
        }
        if let KeyCode::Char(_) = key.code {
            let toggled = KeyBinding::new(key.code, key.modifiers ^ KeyModifiers::SHIFT);
            return self.bindings.get(&toggled).cloned();
        }
        None
    }
}

/// Named keys accepted inside `<...>`; the paging and form keys the app binds
const NAMED_KEYS: &[(&str, KeyCode)] = &[
    ("cr", KeyCode::Enter),
    ("enter", KeyCode::Enter),
    ("esc", KeyCode::Esc),
    ("tab", KeyCode::Tab),
    ("space", KeyCode::Char(' ')),
    ("up", KeyCode::Up),
    ("down", KeyCode::Down),
    ("pageup", KeyCode::PageUp),
    ("pgup", KeyCode::PageUp),
    ("pagedown", KeyCode::PageDown),
    ("pgdn", KeyCode::PageDown),
    ("home", KeyCode::Home),
    ("end", KeyCode::End),
];

/// Parse a keymap entry
///
/// A bare character binds itself, with uppercase letters implying Shift.
/// Bracketed entries name a key from `NAMED_KEYS`, optionally prefixed by
/// `C-` or `S-`: "<PageDown>", "<C-r>", "<S-Tab>".
pub fn parse_key_binding(s: &str) -> Option<KeyBinding> {
    let s = s.trim();
    let Some(inner) = s.strip_prefix('<').and_then(|rest| rest.strip_suffix('>')) else {
        let mut chars = s.chars();
        let c = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        let modifiers = if c.is_ascii_uppercase() {
            KeyModifiers::SHIFT
        } else {
            KeyModifiers::NONE
        };
        return Some(KeyBinding::new(KeyCode::Char(c), modifiers));
    };

    let (modifiers, name) = match inner.split_once('-') {
        Some(("C" | "c", name)) if !name.is_empty() => (KeyModifiers::CONTROL, name),
        Some(("S" | "s", name)) if !name.is_empty() => (KeyModifiers::SHIFT, name),
        _ => (KeyModifiers::NONE, inner),
    };
    let lower = name.to_ascii_lowercase();
    let code = match NAMED_KEYS.iter().find(|(key, _)| *key == lower) {
        Some((_, code)) => *code,
        // "<C-r>" and friends carry a plain character
        None if modifiers != KeyModifiers::NONE && lower.chars().count() == 1 => {
            KeyCode::Char(lower.chars().next()?)
        }
        None => return None,
    };
    Some(KeyBinding::new(code, modifiers))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_characters() {
        assert_eq!(parse_key_binding("q"), Some(KeyBinding::simple(KeyCode::Char('q'))));
        assert_eq!(parse_key_binding(" 2 "), Some(KeyBinding::simple(KeyCode::Char('2'))));
        assert_eq!(parse_key_binding("?"), Some(KeyBinding::simple(KeyCode::Char('?'))));
        // Account shortcuts are uppercase
        assert_eq!(parse_key_binding("M"), Some(KeyBinding::shift(KeyCode::Char('M'))));
        assert_eq!(parse_key_binding(""), None);
        assert_eq!(parse_key_binding("gg"), None);
    }

    #[test]
    fn test_parse_named_paging_keys() {
        let cases = [
            ("<PageDown>", KeyCode::PageDown),
            ("<pgdn>", KeyCode::PageDown),
            ("<PageUp>", KeyCode::PageUp),
            ("<Home>", KeyCode::Home),
            ("<END>", KeyCode::End),
            ("<CR>", KeyCode::Enter),
            ("<Space>", KeyCode::Char(' ')),
        ];
        for (notation, code) in cases {
            assert_eq!(parse_key_binding(notation), Some(KeyBinding::simple(code)), "{}", notation);
        }
        assert_eq!(parse_key_binding("<F1>"), None);
        assert_eq!(parse_key_binding("<>"), None);
    }

    #[test]
    fn test_parse_modifiers() {
        assert_eq!(parse_key_binding("<C-r>"), Some(KeyBinding::ctrl(KeyCode::Char('r'))));
        assert_eq!(parse_key_binding("<C-R>"), Some(KeyBinding::ctrl(KeyCode::Char('r'))));
        assert_eq!(parse_key_binding("<S-Tab>"), Some(KeyBinding::shift(KeyCode::Tab)));
        assert_eq!(parse_key_binding("<C-nope>"), None);
    }

    #[test]
    fn test_keymap_from_config() {
        let keymap = Keymap::from_config(&KeymapConfig::default());

        assert_eq!(
            keymap.get(&KeyBinding::simple(KeyCode::Char('q'))),
            Some(&Action::Quit)
        );
        assert_eq!(
            keymap.get(&KeyBinding::simple(KeyCode::PageDown)),
            Some(&Action::PageNext)
        );
        assert_eq!(
            keymap.get(&KeyBinding::simple(KeyCode::Down)),
            Some(&Action::PageNext)
        );
        assert_eq!(
            keymap.get(&KeyBinding::simple(KeyCode::Home)),
            Some(&Action::PageFirst)
        );
        assert_eq!(
            keymap.get(&KeyBinding::simple(KeyCode::Char('2'))),
            Some(&Action::NavNews)
        );
        assert_eq!(
            keymap.get(&KeyBinding::shift(KeyCode::Char('M'))),
            Some(&Action::Manage)
        );
    }

    #[test]
    fn test_lookup_tolerates_shift_on_symbols() {
        let keymap = Keymap::default();
        let plain = KeyEvent::new(KeyCode::Char('?'), KeyModifiers::NONE);
        let shifted = KeyEvent::new(KeyCode::Char('?'), KeyModifiers::SHIFT);
        assert_eq!(keymap.lookup(&plain), Some(Action::Help));
        assert_eq!(keymap.lookup(&shifted), Some(Action::Help));
        let unbound = KeyEvent::new(KeyCode::Char('z'), KeyModifiers::NONE);
        assert_eq!(keymap.lookup(&unbound), None);
    }

    #[test]
    fn test_conflicting_binding_keeps_first() {
        let config = KeymapConfig {
            nav_news: "q".to_string(),
            ..KeymapConfig::default()
        };
        let keymap = Keymap::from_config(&config);
        assert_eq!(
            keymap.get(&KeyBinding::simple(KeyCode::Char('q'))),
            Some(&Action::Quit)
        );
    }
}
