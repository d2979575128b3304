//! Global keyboard shortcuts.

use crate::reducer::DesktopAction;
use crate::taskbar::Taskbar;

/// Physical key code plus modifier state of a key press.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyChord {
    /// `KeyboardEvent.code`, for example `"KeyW"` or `"Digit3"`.
    pub code: String,
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl KeyChord {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            ..Self::default()
        }
    }

    pub fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn alt(mut self) -> Self {
        self.alt = true;
        self
    }
}

/// Resolves a key press to a shell action; `None` lets the event through to the focused app.
///
/// | Chord | Action |
/// |---|---|
/// | `Ctrl+Space` | toggle start menu |
/// | `Ctrl+W` | close the focused window |
/// | `Ctrl+D` | show desktop |
/// | `Escape` | close start menu |
/// | `Alt+1`..`Alt+9` | focus the Nth taskbar indicator |
pub fn shortcut_action(chord: &KeyChord, taskbar: &Taskbar) -> Option<DesktopAction> {
    if chord.ctrl && !chord.alt {
        return match chord.code.as_str() {
            "Space" => Some(DesktopAction::ToggleStartMenu),
            "KeyW" => Some(DesktopAction::CloseTopmost),
            "KeyD" => Some(DesktopAction::MinimizeAll),
            _ => None,
        };
    }
    if chord.alt && !chord.ctrl {
        let position = chord
            .code
            .strip_prefix("Digit")
            .and_then(|digit| digit.parse::<usize>().ok())
            .filter(|n| (1..=9).contains(n))?;
        return taskbar.activate(position);
    }
    if chord.code == "Escape" {
        return Some(DesktopAction::CloseStartMenu);
    }
    None
}
