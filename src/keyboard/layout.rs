/// One key on the on-screen keyboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VirtualKey {
    /// Positional identifier, matched against physical key codes.
    pub code: &'static str,
    pub label: &'static str,
    /// Value carried by a simulated press of this key.
    pub key: &'static str,
    /// Width in terminal columns.
    pub width: u16,
}

const UNIT: u16 = 5;

const fn key(code: &'static str, label: &'static str, value: &'static str) -> VirtualKey {
    VirtualKey {
        code,
        label,
        key: value,
        width: UNIT,
    }
}

const fn wide(
    code: &'static str,
    label: &'static str,
    value: &'static str,
    width: u16,
) -> VirtualKey {
    VirtualKey {
        code,
        label,
        key: value,
        width,
    }
}

#[derive(Clone, Debug)]
pub struct KeyboardLayout {
    pub name: String,
    pub rows: Vec<Vec<VirtualKey>>,
}

impl KeyboardLayout {
    pub fn ansi() -> Self {
        Self {
            name: "ANSI".to_string(),
            rows: vec![
                vec![
                    key("Escape", "Esc", "Escape"),
                    key("F1", "F1", "F1"),
                    key("F2", "F2", "F2"),
                    key("F3", "F3", "F3"),
                    key("F4", "F4", "F4"),
                    key("F5", "F5", "F5"),
                    key("F6", "F6", "F6"),
                    key("F7", "F7", "F7"),
                    key("F8", "F8", "F8"),
                    key("F9", "F9", "F9"),
                    key("F10", "F10", "F10"),
                    key("F11", "F11", "F11"),
                    key("F12", "F12", "F12"),
                ],
                vec![
                    key("Backquote", "`", "`"),
                    key("Digit1", "1", "1"),
                    key("Digit2", "2", "2"),
                    key("Digit3", "3", "3"),
                    key("Digit4", "4", "4"),
                    key("Digit5", "5", "5"),
                    key("Digit6", "6", "6"),
                    key("Digit7", "7", "7"),
                    key("Digit8", "8", "8"),
                    key("Digit9", "9", "9"),
                    key("Digit0", "0", "0"),
                    key("Minus", "-", "-"),
                    key("Equal", "=", "="),
                    wide("Backspace", "Bksp", "Backspace", 9),
                ],
                vec![
                    wide("Tab", "Tab", "Tab", 7),
                    key("KeyQ", "q", "q"),
                    key("KeyW", "w", "w"),
                    key("KeyE", "e", "e"),
                    key("KeyR", "r", "r"),
                    key("KeyT", "t", "t"),
                    key("KeyY", "y", "y"),
                    key("KeyU", "u", "u"),
                    key("KeyI", "i", "i"),
                    key("KeyO", "o", "o"),
                    key("KeyP", "p", "p"),
                    key("BracketLeft", "[", "["),
                    key("BracketRight", "]", "]"),
                    wide("Backslash", "\\", "\\", 7),
                ],
                vec![
                    wide("CapsLock", "Caps", "CapsLock", 8),
                    key("KeyA", "a", "a"),
                    key("KeyS", "s", "s"),
                    key("KeyD", "d", "d"),
                    key("KeyF", "f", "f"),
                    key("KeyG", "g", "g"),
                    key("KeyH", "h", "h"),
                    key("KeyJ", "j", "j"),
                    key("KeyK", "k", "k"),
                    key("KeyL", "l", "l"),
                    key("Semicolon", ";", ";"),
                    key("Quote", "'", "'"),
                    wide("Enter", "Enter", "Enter", 11),
                ],
                vec![
                    wide("ShiftLeft", "Shift", "Shift", 11),
                    key("KeyZ", "z", "z"),
                    key("KeyX", "x", "x"),
                    key("KeyC", "c", "c"),
                    key("KeyV", "v", "v"),
                    key("KeyB", "b", "b"),
                    key("KeyN", "n", "n"),
                    key("KeyM", "m", "m"),
                    key("Comma", ",", ","),
                    key("Period", ".", "."),
                    key("Slash", "/", "/"),
                    wide("ShiftRight", "Shift", "Shift", 14),
                ],
                vec![
                    wide("ControlLeft", "Ctrl", "Control", 6),
                    wide("MetaLeft", "Meta", "Meta", 6),
                    wide("AltLeft", "Alt", "Alt", 6),
                    wide("Space", "Space", " ", 29),
                    wide("AltRight", "Alt", "Alt", 6),
                    wide("MetaRight", "Meta", "Meta", 6),
                    wide("ContextMenu", "Menu", "ContextMenu", 6),
                    wide("ControlRight", "Ctrl", "Control", 6),
                ],
                vec![
                    key("ArrowLeft", "<", "ArrowLeft"),
                    key("ArrowDown", "v", "ArrowDown"),
                    key("ArrowUp", "^", "ArrowUp"),
                    key("ArrowRight", ">", "ArrowRight"),
                ],
            ],
        }
    }

    pub fn find(&self, code: &str) -> Option<&VirtualKey> {
        self.keys().find(|k| k.code == code)
    }

    pub fn keys(&self) -> impl Iterator<Item = &VirtualKey> {
        self.rows.iter().flatten()
    }

    /// Columns needed to show every key of the widest row, one column gap
    /// between keys.
    pub fn width(&self) -> u16 {
        self.rows
            .iter()
            .map(|row| {
                let keys: u16 = row.iter().map(|k| k.width).sum();
                keys + row.len().saturating_sub(1) as u16
            })
            .max()
            .unwrap_or(0)
    }

    pub fn height(&self) -> u16 {
        self.rows.len() as u16
    }
}

impl Default for KeyboardLayout {
    fn default() -> Self {
        Self::ansi()
    }
}
