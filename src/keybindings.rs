//! Global keyboard shortcuts.
//!
//! Shortcuts are deliberately unscoped: they apply regardless of which UI
//! element has focus, which is acceptable for a single-document tool.

/// A key press as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Delete,
    Backspace,
    /// Any character key, lowercased by the host.
    Char(char),
}

/// Action bound to a keyboard shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    /// Escape: close any open modal dialogs.
    CloseModals,
    /// Delete/Backspace: remove the most recent box.
    RemoveLastBox,
    /// Ctrl/Cmd+S: save the current annotations.
    Save,
    /// Ctrl/Cmd+Z: undo the most recent box.
    Undo,
}

impl ShortcutAction {
    /// Resolve a key press to its bound action, if any.
    /// `ctrl_or_cmd` covers both Ctrl and the macOS Cmd modifier.
    pub fn for_key(key: Key, ctrl_or_cmd: bool) -> Option<Self> {
        match key {
            Key::Escape => Some(ShortcutAction::CloseModals),
            Key::Delete | Key::Backspace => Some(ShortcutAction::RemoveLastBox),
            Key::Char('s') if ctrl_or_cmd => Some(ShortcutAction::Save),
            Key::Char('z') if ctrl_or_cmd => Some(ShortcutAction::Undo),
            Key::Char(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shortcut_lookup() {
        assert_eq!(
            ShortcutAction::for_key(Key::Escape, false),
            Some(ShortcutAction::CloseModals)
        );
        assert_eq!(
            ShortcutAction::for_key(Key::Delete, false),
            Some(ShortcutAction::RemoveLastBox)
        );
        assert_eq!(
            ShortcutAction::for_key(Key::Backspace, false),
            Some(ShortcutAction::RemoveLastBox)
        );
        assert_eq!(
            ShortcutAction::for_key(Key::Char('s'), true),
            Some(ShortcutAction::Save)
        );
        assert_eq!(
            ShortcutAction::for_key(Key::Char('z'), true),
            Some(ShortcutAction::Undo)
        );
    }

    #[test]
    fn test_plain_letters_are_not_shortcuts() {
        assert_eq!(ShortcutAction::for_key(Key::Char('s'), false), None);
        assert_eq!(ShortcutAction::for_key(Key::Char('z'), false), None);
        assert_eq!(ShortcutAction::for_key(Key::Char('a'), true), None);
    }
}
